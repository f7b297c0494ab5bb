//! CSV mapping for batch uploads
//!
//! Detects which column holds the URLs and which column receives the
//! extracted email, then writes the rows back out with that column filled.

use crate::batch::BatchError;
use csv::{ReaderBuilder, Writer};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_COLUMN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)url|website|site|link").unwrap());

static EMAIL_COLUMN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)email|e-mail").unwrap());

/// Name of the column appended when the upload has no email column
pub const DEFAULT_EMAIL_COLUMN: &str = "email";

/// One input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Cell values, aligned with the original header
    values: Vec<String>,

    /// Trimmed value of the URL column
    url: String,
}

impl UrlRecord {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    fn set(&mut self, column: usize, value: String) {
        if column >= self.values.len() {
            self.values.resize(column + 1, String::new());
        }
        self.values[column] = value;
    }
}

/// A parsed upload with its column mapping
///
/// The email column is decided once in [`CsvBatch::parse`] and used for
/// every row.
#[derive(Debug, Clone)]
pub struct CsvBatch {
    /// Output header: the original columns, plus `email` when it was appended
    headers: Vec<String>,
    url_column: usize,
    email_column: usize,
    email_appended: bool,
    records: Vec<UrlRecord>,
}

impl CsvBatch {
    /// Parses an uploaded CSV
    ///
    /// Bytes are decoded as UTF-8 with lossy substitution and a leading
    /// byte-order mark is dropped. Short rows are padded with empty cells;
    /// long rows are truncated to the header width.
    ///
    /// # Errors
    ///
    /// * `BatchError::MissingHeader` - empty input or only blank header names
    /// * `BatchError::MissingUrlColumn` - no header matches `url|website|site|link`
    /// * `BatchError::Csv` - the reader could not parse a record
    pub fn parse(bytes: &[u8]) -> Result<Self, BatchError> {
        let decoded = String::from_utf8_lossy(bytes);
        let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        if headers.iter().all(|name| name.trim().is_empty()) {
            return Err(BatchError::MissingHeader);
        }

        let url_column = find_column(&headers, &URL_COLUMN_RE).ok_or(BatchError::MissingUrlColumn)?;

        let width = headers.len();
        let (email_column, email_appended) = match find_column(&headers, &EMAIL_COLUMN_RE) {
            Some(column) => (column, false),
            None => {
                headers.push(DEFAULT_EMAIL_COLUMN.to_string());
                (width, true)
            }
        };

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let mut values: Vec<String> = record.iter().map(str::to_string).collect();

            if values.len() > width {
                tracing::warn!(
                    row = row + 1,
                    cells = values.len(),
                    width,
                    "Row is wider than the header, dropping extra cells"
                );
                values.truncate(width);
            }
            values.resize(width, String::new());

            let url = values[url_column].trim().to_string();
            records.push(UrlRecord { values, url });
        }

        tracing::debug!(
            rows = records.len(),
            url_column = %headers[url_column],
            email_column = %headers[email_column],
            email_appended,
            "Parsed CSV upload"
        );

        Ok(Self {
            headers,
            url_column,
            email_column,
            email_appended,
            records,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn url_column(&self) -> &str {
        &self.headers[self.url_column]
    }

    pub fn email_column(&self) -> &str {
        &self.headers[self.email_column]
    }

    /// True when the upload had no email column and one was appended
    pub fn email_appended(&self) -> bool {
        self.email_appended
    }

    pub fn records(&self) -> &[UrlRecord] {
        &self.records
    }

    /// Number of rows, which is also the `total` of every result
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the email for row `row` (0-based) into the mapped column
    pub fn set_email(&mut self, row: usize, email: impl Into<String>) {
        let column = self.email_column;
        if let Some(record) = self.records.get_mut(row) {
            record.set(column, email.into());
        }
    }

    /// Serializes the header and all rows to CSV text
    ///
    /// Rows that never received an email get an empty cell in the appended
    /// column.
    pub fn to_csv(&self) -> Result<String, BatchError> {
        let width = self.headers.len();
        let mut writer = Writer::from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for record in &self.records {
            let cells = (0..width).map(|column| record.get(column).unwrap_or(""));
            writer.write_record(cells)?;
        }

        let bytes = writer.into_inner().map_err(|e| BatchError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Two-column `URL,Email` CSV for a single lookup
pub fn single_result_csv(url: &str, email: &str) -> Result<String, BatchError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["URL", "Email"])?;
    writer.write_record([url, email])?;

    let bytes = writer.into_inner().map_err(|e| BatchError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Index of the first non-empty header matching the pattern
fn find_column(headers: &[String], pattern: &Regex) -> Option<usize> {
    headers
        .iter()
        .position(|name| !name.is_empty() && pattern.is_match(name))
}
