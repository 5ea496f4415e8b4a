//! Where purchase transactions come from.
//!
//! The transaction feed is either a remote HTTP endpoint that returns a JSON
//! array of records, or a local data file in JSON or CSV format.

use std::path::{Path, PathBuf};

use crate::{Error, transaction::RawTransaction};

/// The default URL of the transaction feed.
pub const DEFAULT_SOURCE_URL: &str = "http://localhost:4000/rewards";

/// A source of raw purchase transactions.
#[derive(Debug, Clone)]
pub enum TransactionSource {
    /// Fetch the records with a GET request to `url`.
    Http {
        /// The client used for requests. Cloning it is cheap, clones share a
        /// connection pool.
        client: reqwest::Client,
        /// The URL of the transaction feed.
        url: String,
    },
    /// Read the records from a `.json` or `.csv` file.
    File(PathBuf),
}

impl TransactionSource {
    /// Create a source that fetches transactions from `url`.
    pub fn http(url: impl Into<String>) -> Self {
        Self::Http {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Create a source that reads transactions from the file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Whether the transactions come from a local data file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Fetch the raw transaction records in feed order.
    ///
    /// # Errors
    /// Returns [Error::SourceUnavailable] or [Error::SourceStatus] if the
    /// HTTP request fails, [Error::DataFile] if the data file cannot be read
    /// and [Error::InvalidFeed] if the data is not a list of records.
    pub async fn fetch(&self) -> Result<Vec<RawTransaction>, Error> {
        match self {
            Self::Http { client, url } => fetch_http(client, url).await,
            Self::File(path) => read_data_file(path).await,
        }
    }
}

async fn fetch_http(client: &reqwest::Client, url: &str) -> Result<Vec<RawTransaction>, Error> {
    tracing::debug!("Fetching transactions from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|error| Error::SourceUnavailable(error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::SourceStatus(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|error| Error::SourceUnavailable(error.to_string()))?;

    let records = parse_json_records(&body)?;
    tracing::debug!("Fetched {} transactions from {url}", records.len());

    Ok(records)
}

async fn read_data_file(path: &Path) -> Result<Vec<RawTransaction>, Error> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    let contents = tokio::fs::read(path)
        .await
        .map_err(|error| Error::DataFile(format!("{}: {error}", path.display())))?;

    let records = match extension.as_deref() {
        Some("json") => parse_json_records(&contents)?,
        Some("csv") => parse_csv_records(&contents)?,
        _ => {
            return Err(Error::DataFile(format!(
                "{}: expected a .json or .csv file",
                path.display()
            )));
        }
    };

    tracing::debug!(
        "Read {} transactions from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}

/// Parse a JSON array of transaction records.
///
/// # Errors
/// Returns [Error::InvalidFeed] if `bytes` is not a JSON array of records.
pub fn parse_json_records(bytes: &[u8]) -> Result<Vec<RawTransaction>, Error> {
    serde_json::from_slice(bytes).map_err(|error| Error::InvalidFeed(error.to_string()))
}

/// Parse CSV transaction records.
///
/// The CSV must have the header `name,customerId,amount,transactionDate`.
/// An empty amount is read as a missing amount.
///
/// # Errors
/// Returns [Error::InvalidFeed] if a row does not match the header.
pub fn parse_csv_records(bytes: &[u8]) -> Result<Vec<RawTransaction>, Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes)
        .deserialize()
        .enumerate()
        .map(|(row, record)| {
            record.map_err(|error| Error::InvalidFeed(format!("CSV row {}: {error}", row + 1)))
        })
        .collect()
}
