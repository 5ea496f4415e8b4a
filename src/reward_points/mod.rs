//! Reward points module
//!
//! Provides the page showing each customer's reward points with their monthly
//! history, and the same data as JSON.

mod api;
mod handlers;
mod tables;

use serde::Serialize;

use crate::{
    Error,
    aggregation::{CustomerSummary, aggregate},
    source::TransactionSource,
    transaction::{InvalidRecord, RawTransaction, ValidationResult, validate_transactions},
};

pub use api::get_reward_points_json;
pub use handlers::get_reward_points_page;

/// The reward points for every customer in the transaction feed.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct RewardPoints {
    /// One summary per customer, in the order customers first appear in the feed.
    pub customers: Vec<CustomerSummary>,
    /// The records that were left out because they failed validation.
    pub skipped: Vec<InvalidRecord>,
}

impl RewardPoints {
    /// Validate `records` and aggregate the valid ones per customer and month.
    pub fn from_records(records: Vec<RawTransaction>) -> Self {
        let ValidationResult {
            transactions,
            skipped,
        } = validate_transactions(records);

        Self {
            customers: aggregate(&transactions),
            skipped,
        }
    }

    /// Whether the feed had no records at all.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.skipped.is_empty()
    }
}

/// Fetch the transactions from `source` and calculate the reward points.
///
/// # Errors
/// Returns an error if the transactions cannot be fetched, see
/// [TransactionSource::fetch].
async fn load_reward_points(source: &TransactionSource) -> Result<RewardPoints, Error> {
    let records = source
        .fetch()
        .await
        .inspect_err(|error| tracing::error!("could not fetch transactions: {error}"))?;

    let reward_points = RewardPoints::from_records(records);

    tracing::debug!(
        "Calculated reward points for {} customers, skipped {} records",
        reward_points.customers.len(),
        reward_points.skipped.len()
    );

    Ok(reward_points)
}

#[cfg(test)]
mod tests {
    use crate::transaction::{CustomerId, InvalidReason, RawTransaction};

    use super::RewardPoints;

    fn raw(name: &str, customer_id: i64, amount: Option<f64>, date: &str) -> RawTransaction {
        RawTransaction {
            name: name.to_owned(),
            customer_id: CustomerId::Number(customer_id),
            amount,
            transaction_date: date.to_owned(),
        }
    }

    #[test]
    fn aggregates_valid_records_and_reports_invalid_ones() {
        let reward_points = RewardPoints::from_records(vec![
            raw("A", 1, Some(120.0), "2024-01-15"),
            raw("A", 1, Some(60.0), "2024-02-10"),
            raw("B", 2, Some(30.0), "2024-01-20"),
            raw("C", 3, Some(500.0), "sometime"),
        ]);

        assert_eq!(reward_points.customers.len(), 2);
        assert_eq!(reward_points.customers[0].points, 140);
        assert_eq!(reward_points.customers[1].points, 0);
        assert_eq!(reward_points.skipped.len(), 1);
        assert_eq!(reward_points.skipped[0].index, 3);
        assert_eq!(
            reward_points.skipped[0].reason,
            InvalidReason::InvalidDate("sometime".to_owned())
        );
        assert!(!reward_points.is_empty());
    }

    #[test]
    fn empty_feed_is_empty() {
        let reward_points = RewardPoints::from_records(Vec::new());

        assert!(reward_points.is_empty());
        assert_eq!(reward_points, RewardPoints::default());
    }

    #[test]
    fn feed_with_only_invalid_records_is_not_empty() {
        let reward_points = RewardPoints::from_records(vec![raw("A", 1, None, "2024-01-15")]);

        assert!(reward_points.customers.is_empty());
        assert!(!reward_points.is_empty());
    }
}
