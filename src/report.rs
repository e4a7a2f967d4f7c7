//! Result sheet assembly for a finished session.
//!
//! The CSV layout is a compatibility contract: readers of historical result
//! sheets depend on the exact row order, so changes here break consumers.

use std::time::Duration;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::Error;
use crate::provenance::RunContext;
use crate::record::ResultSet;

pub(crate) const RESULT_HEADER: [&str; 5] = [
    "Document Name",
    "Independent Variable",
    "Dependent Variable",
    "Predicted Classification",
    "Coded Classification",
];

/// Render the artifact: five metadata rows, one blank line, the column
/// header, then one row per logged result in insertion order. Every field is
/// quoted.
pub fn render_csv(
    context: &RunContext,
    results: &ResultSet,
    runtime: &str,
) -> Result<String, Error> {
    // The blank separator line is written by hand: a csv writer renders an
    // empty record as a single empty field, not an empty line.
    let mut metadata = quoting_writer();
    metadata.write_record(["Pipeline", context.pipeline_ref().as_str()])?;
    metadata.write_record(["Executed By", context.author.as_str()])?;
    metadata.write_record(["Date", context.timestamp.as_str()])?;
    metadata.write_record(["Runtime", runtime])?;
    metadata.write_record([
        "Total Documents",
        results.distinct_documents().to_string().as_str(),
    ])?;

    let mut body = quoting_writer();
    body.write_record(RESULT_HEADER)?;
    for row in results.rows() {
        body.write_record(row.fields())?;
    }

    let mut bytes = into_bytes(metadata)?;
    bytes.push(b'\n');
    bytes.extend(into_bytes(body)?);
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn quoting_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new())
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, Error> {
    writer
        .into_inner()
        .map_err(|err| Error::Csv(err.into_error().into()))
}

/// Format an elapsed duration the way the result sheets expect,
/// `H:MM:SS.micros`.
pub fn format_runtime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        total / 3600,
        (total % 3600) / 60,
        total % 60,
        elapsed.subsec_micros()
    )
}
