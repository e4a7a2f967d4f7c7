//! Result logging for document-level relation extraction runs.
//!
//! A test harness constructs one [`ResultLogger`] per run, feeds it one
//! predicted-vs-coded comparison per document relation, and finalizes the
//! session with [`ResultLogger::save_results`]. Finalization prints summary
//! accuracy, renders a CSV result sheet, and uploads it to the shared test
//! suite repository, writing the sheet to a local file when the upload fails.
//!
//! Enabled sessions are pinned to a fresh commit of the pipeline repository,
//! so every result sheet names the exact code that produced it.

pub mod cli;
pub mod error;
pub mod input;
pub mod logger;
pub mod provenance;
pub mod record;
pub mod report;
pub mod store;

pub use error::Error;
pub use logger::ResultLogger;
pub use record::{Classification, ResultRow, ResultSet};
