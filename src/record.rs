//! Result rows and in-memory aggregation for one logging session.

use std::collections::BTreeSet;

use crate::error::Error;

/// Vocabulary the coding sheets use for relation classifications.
///
/// [`crate::ResultLogger::log_result`] accepts opaque strings and compares
/// them by literal equality; this enum only names the expected symbols for
/// callers that want them spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Positive,
    Negative,
    Indeterminate,
    NotApplicable,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Positive => "+",
            Classification::Negative => "-",
            Classification::Indeterminate => "I",
            Classification::NotApplicable => "N/A",
        }
    }
}

/// One predicted-vs-coded comparison for a single document relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub document_name: String,
    pub independent_variable: String,
    pub dependent_variable: String,
    pub predicted: String,
    pub coded: String,
}

impl ResultRow {
    pub(crate) fn fields(&self) -> [&str; 5] {
        [
            &self.document_name,
            &self.independent_variable,
            &self.dependent_variable,
            &self.predicted,
            &self.coded,
        ]
    }
}

/// Ordered results plus the running aggregates for one session.
///
/// Fields are instance-scoped: every session starts from an empty set, and
/// two loggers never share state.
#[derive(Debug, Default)]
pub struct ResultSet {
    rows: Vec<ResultRow>,
    documents: BTreeSet<String>,
    correct: usize,
}

impl ResultSet {
    pub fn push(&mut self, row: ResultRow) {
        self.documents.insert(row.document_name.clone());
        if row.predicted == row.coded {
            self.correct += 1;
        }
        self.rows.push(row);
    }

    /// Rows in insertion order. Duplicate document names are kept.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct document names seen so far.
    pub fn distinct_documents(&self) -> usize {
        self.documents.len()
    }

    /// Rows where the predicted classification matched the coded one.
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Fraction of rows where predicted == coded. An empty set has no
    /// defined accuracy.
    pub fn accuracy(&self) -> Result<f64, Error> {
        if self.rows.is_empty() {
            return Err(Error::NoResults);
        }
        Ok(self.correct as f64 / self.rows.len() as f64)
    }
}
