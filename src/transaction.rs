//! Purchase transactions as they arrive from the transaction feed and after validation.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Identifies a customer in the transaction feed.
///
/// Feeds are inconsistent about whether IDs are numbers or strings, so both
/// are accepted and written back out in the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    /// A numeric ID, e.g. `1`.
    Number(i64),
    /// A textual ID, e.g. `"C-001"`.
    Text(String),
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerId::Number(id) => write!(f, "{id}"),
            CustomerId::Text(id) => f.write_str(id),
        }
    }
}

/// A purchase record exactly as it appears in the transaction feed.
///
/// Nothing beyond the shape of the record is checked here, see
/// [validate_transactions] for turning these into [Transaction]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// The name of the customer who made the purchase.
    pub name: String,
    /// The ID of the customer who made the purchase.
    pub customer_id: CustomerId,
    /// The amount spent in dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// When the purchase happened, as a date or timestamp string.
    pub transaction_date: String,
}

/// A validated purchase made by a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The name of the customer who made the purchase.
    pub name: String,
    /// The ID of the customer who made the purchase.
    pub customer_id: CustomerId,
    /// The amount spent in dollars, always finite.
    pub amount: f64,
    /// The calendar date of the purchase.
    pub date: Date,
}

impl Transaction {
    /// Create a transaction for `name` with a numeric customer ID.
    pub fn build(name: &str, customer_id: i64, amount: f64, date: Date) -> Self {
        Self {
            name: name.to_owned(),
            customer_id: CustomerId::Number(customer_id),
            amount,
            date,
        }
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = InvalidReason;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let amount = raw.amount.ok_or(InvalidReason::MissingAmount)?;

        if !amount.is_finite() {
            return Err(InvalidReason::NonFiniteAmount);
        }

        let date = parse_transaction_date(&raw.transaction_date)
            .ok_or_else(|| InvalidReason::InvalidDate(raw.transaction_date.clone()))?;

        Ok(Self {
            name: raw.name,
            customer_id: raw.customer_id,
            amount,
            date,
        })
    }
}

/// Why a record from the transaction feed was left out of the reward points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidReason {
    /// The record has no amount.
    #[error("the amount is missing")]
    MissingAmount,

    /// The amount is infinite or NaN.
    #[error("the amount is not a finite number")]
    NonFiniteAmount,

    /// The transaction date is not a date, RFC 3339 timestamp or local date-time.
    #[error("could not parse the transaction date \"{0}\"")]
    InvalidDate(String),
}

impl Serialize for InvalidReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A record from the transaction feed that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidRecord {
    /// The zero-based position of the record in the feed.
    pub index: usize,
    /// The customer name on the record.
    pub name: String,
    /// What was wrong with the record.
    pub reason: InvalidReason,
}

/// The outcome of validating every record in a transaction feed.
#[derive(Debug, Default, PartialEq)]
pub struct ValidationResult {
    /// The valid transactions, in feed order.
    pub transactions: Vec<Transaction>,
    /// The records that were skipped, in feed order.
    pub skipped: Vec<InvalidRecord>,
}

/// Validate each record in `records`, keeping feed order.
///
/// Invalid records are flagged in [ValidationResult::skipped] rather than
/// failing the whole feed, so one bad record does not hide everyone else's
/// reward points.
pub fn validate_transactions(records: Vec<RawTransaction>) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (index, record) in records.into_iter().enumerate() {
        let name = record.name.clone();

        match Transaction::try_from(record) {
            Ok(transaction) => result.transactions.push(transaction),
            Err(reason) => {
                tracing::warn!("skipping transaction {index} for \"{name}\": {reason}");
                result.skipped.push(InvalidRecord {
                    index,
                    name,
                    reason,
                });
            }
        }
    }

    result
}

/// Parse the calendar date from a transaction date string.
///
/// Accepts `2024-01-15`, RFC 3339 timestamps such as `2024-01-15T10:30:00Z`,
/// and date-times without an offset such as `2024-01-15T10:30:00`. The date
/// is taken as written, timestamps are not converted to another timezone.
pub fn parse_transaction_date(text: &str) -> Option<Date> {
    let text = text.trim();

    if let Ok(date) = Date::parse(text, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time.date());
    }

    PrimitiveDateTime::parse(text, DATE_TIME_FORMAT)
        .map(|date_time| date_time.date())
        .ok()
}
