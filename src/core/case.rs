//! Test cases loaded from a CSV table

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Column holding the issue title
pub const TITLE_COLUMN: &str = "title";

/// Column holding the issue body
pub const BODY_COLUMN: &str = "issue";

/// Error types for loading the case table
#[derive(Debug, Error)]
pub enum CaseLoadError {
    #[error("Failed to read data file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed data file: {0}")]
    Csv(#[from] csv::Error),
}

/// A single test case: one simulated issue fed to the program under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Zero-based position among the data rows
    pub index: usize,

    /// Issue title
    pub title: String,

    /// Issue body
    pub body: String,
}

/// Row shape as it appears in the file. Both fields stay strings so
/// numeric-looking values are passed through untouched.
#[derive(Debug, Deserialize)]
struct CaseRow {
    title: String,
    issue: String,
}

/// Ordered set of test cases making up one batch
#[derive(Debug, Clone, Default)]
pub struct CaseTable {
    cases: Vec<TestCase>,
}

impl CaseTable {
    /// Load the case table from a comma-separated file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CaseLoadError> {
        Self::from_file_with_delimiter(path, b',')
    }

    /// Load the case table from a file using the given field delimiter
    pub fn from_file_with_delimiter<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
    ) -> Result<Self, CaseLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CaseLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file, delimiter)
    }

    /// Parse a case table from CSV text
    pub fn from_csv(text: &str) -> Result<Self, CaseLoadError> {
        Self::from_reader(text.as_bytes(), b',')
    }

    /// Parse a case table from any reader. The header row must name both the
    /// title and the issue column; other columns are ignored.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, CaseLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in [TITLE_COLUMN, BODY_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(CaseLoadError::MissingColumn(column));
            }
        }

        let mut cases = Vec::new();
        for (index, row) in reader.deserialize::<CaseRow>().enumerate() {
            let row = row.map_err(|source| CaseLoadError::Row { row: index, source })?;
            cases.push(TestCase {
                index,
                title: row.title,
                body: row.issue,
            });
        }

        Ok(Self { cases })
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a CaseTable {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}
