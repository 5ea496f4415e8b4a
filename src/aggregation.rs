//! Aggregates purchase transactions into per-customer reward point summaries.
//!
//! Customers are grouped by name and each customer's history is grouped by
//! calendar month name. The year is ignored, so purchases in January 2023 and
//! January 2024 end up in the same history entry.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::{
    reward::calculate_points,
    transaction::{CustomerId, Transaction},
};

/// English month names indexed by zero-based calendar month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The totals for one customer in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthEntry {
    /// The month name, e.g. "January".
    pub month: String,
    /// The total spent in the month.
    pub amount: f64,
    /// The reward points earned in the month.
    pub points: u64,
}

impl MonthEntry {
    fn empty(month: &str) -> Self {
        Self {
            month: month.to_owned(),
            amount: 0.0,
            points: 0,
        }
    }
}

/// The totals and monthly history for one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// The customer's name.
    pub name: String,
    /// The customer ID from the customer's first transaction.
    pub customer_id: CustomerId,
    /// The total spent across all of the customer's transactions.
    pub amount: f64,
    /// The reward points earned across all of the customer's transactions.
    pub points: u64,
    /// Monthly totals in the order each month was first seen.
    pub history: Vec<MonthEntry>,
}

impl CustomerSummary {
    fn empty(transaction: &Transaction) -> Self {
        Self {
            name: transaction.name.clone(),
            customer_id: transaction.customer_id.clone(),
            amount: 0.0,
            points: 0,
            history: Vec::new(),
        }
    }
}

/// Get the English name of the calendar month `date` falls in.
pub fn month_name(date: Date) -> &'static str {
    let zero_based_month = u8::from(date.month()) as usize - 1;
    MONTH_NAMES[zero_based_month]
}

/// Group `transactions` by customer name and then by month, summing amounts
/// and reward points.
///
/// Customers appear in the order their name was first seen, and each
/// customer's history lists months in the order they were first seen for that
/// customer.
pub fn aggregate(transactions: &[Transaction]) -> Vec<CustomerSummary> {
    let mut summaries: Vec<CustomerSummary> = Vec::new();
    // Parallel to `summaries`: month name -> position in that summary's history.
    let mut month_positions: Vec<HashMap<&'static str, usize>> = Vec::new();
    let mut customer_positions: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        let points = calculate_points(transaction.amount);
        let month = month_name(transaction.date);

        let customer = *customer_positions
            .entry(transaction.name.as_str())
            .or_insert_with(|| {
                summaries.push(CustomerSummary::empty(transaction));
                month_positions.push(HashMap::new());
                summaries.len() - 1
            });

        let summary = &mut summaries[customer];
        summary.amount += transaction.amount;
        summary.points = summary.points.saturating_add(points);

        let history = &mut summary.history;
        let entry = *month_positions[customer]
            .entry(month)
            .or_insert_with(|| {
                history.push(MonthEntry::empty(month));
                history.len() - 1
            });

        let month_entry = &mut history[entry];
        month_entry.amount += transaction.amount;
        month_entry.points = month_entry.points.saturating_add(points);
    }

    summaries
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, macros::date};

    use crate::{
        reward::calculate_points,
        transaction::{CustomerId, Transaction},
    };

    use super::{MONTH_NAMES, MonthEntry, aggregate, month_name};

    fn month(month: &str, amount: f64, points: u64) -> MonthEntry {
        MonthEntry {
            month: month.to_owned(),
            amount,
            points,
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build("A", 1, 120.0, date!(2024 - 01 - 15)),
            Transaction::build("A", 1, 60.0, date!(2024 - 02 - 10)),
            Transaction::build("B", 2, 30.0, date!(2024 - 01 - 20)),
        ]
    }

    #[test]
    fn month_names_follow_calendar_order() {
        for (index, name) in MONTH_NAMES.iter().enumerate() {
            let month = Month::try_from(index as u8 + 1).unwrap();
            let date = Date::from_calendar_date(2024, month, 1).unwrap();

            assert_eq!(month_name(date), *name);
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn groups_by_customer_then_month() {
        let summaries = aggregate(&sample_transactions());

        assert_eq!(summaries.len(), 2);

        let a = &summaries[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.customer_id, CustomerId::Number(1));
        assert_eq!(a.amount, 180.0);
        assert_eq!(a.points, 140);
        assert_eq!(
            a.history,
            vec![month("January", 120.0, 90), month("February", 60.0, 50)]
        );

        let b = &summaries[1];
        assert_eq!(b.name, "B");
        assert_eq!(b.customer_id, CustomerId::Number(2));
        assert_eq!(b.amount, 30.0);
        assert_eq!(b.points, 0);
        assert_eq!(b.history, vec![month("January", 30.0, 0)]);
    }

    #[test]
    fn merges_transactions_in_the_same_month() {
        let transactions = vec![
            Transaction::build("A", 1, 120.0, date!(2024 - 03 - 01)),
            Transaction::build("A", 1, 75.0, date!(2024 - 03 - 28)),
        ];

        let summaries = aggregate(&transactions);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].history, vec![month("March", 195.0, 140)]);
    }

    #[test]
    fn merges_the_same_month_across_years() {
        let transactions = vec![
            Transaction::build("A", 1, 10.0, date!(2023 - 06 - 01)),
            Transaction::build("A", 1, 20.0, date!(2024 - 06 - 01)),
        ];

        let summaries = aggregate(&transactions);

        assert_eq!(summaries[0].history, vec![month("June", 30.0, 0)]);
    }

    #[test]
    fn keeps_first_seen_order_of_customers_and_months() {
        let transactions = vec![
            Transaction::build("Zoe", 3, 10.0, date!(2024 - 12 - 01)),
            Transaction::build("Adam", 1, 10.0, date!(2024 - 05 - 01)),
            Transaction::build("Zoe", 3, 10.0, date!(2024 - 02 - 01)),
            Transaction::build("Zoe", 3, 10.0, date!(2024 - 12 - 24)),
        ];

        let summaries = aggregate(&transactions);

        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Adam"]);

        let zoe_months: Vec<_> = summaries[0]
            .history
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(zoe_months, vec!["December", "February"]);
    }

    #[test]
    fn refunds_reduce_amounts_but_not_points() {
        let transactions = vec![
            Transaction::build("A", 1, 120.0, date!(2024 - 01 - 15)),
            Transaction::build("A", 1, -20.0, date!(2024 - 01 - 20)),
            Transaction::build("A", 1, 101.5, date!(2024 - 02 - 02)),
        ];

        let summaries = aggregate(&transactions);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].amount, 201.5);
        assert_eq!(summaries[0].points, 90 + 53);
        assert_eq!(
            summaries[0].history,
            vec![month("January", 100.0, 90), month("February", 101.5, 53)]
        );
    }

    #[test]
    fn groups_by_name_and_keeps_first_customer_id() {
        let transactions = vec![
            Transaction::build("A", 1, 10.0, date!(2024 - 01 - 01)),
            Transaction::build("A", 7, 10.0, date!(2024 - 01 - 02)),
        ];

        let summaries = aggregate(&transactions);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].customer_id, CustomerId::Number(1));
    }

    #[test]
    fn conserves_amounts_and_points() {
        let transactions = vec![
            Transaction::build("A", 1, 120.0, date!(2024 - 01 - 15)),
            Transaction::build("B", 2, 51.0, date!(2024 - 01 - 20)),
            Transaction::build("A", 1, 250.0, date!(2024 - 02 - 10)),
            Transaction::build("C", 3, 0.0, date!(2024 - 03 - 05)),
            Transaction::build("B", 2, 101.0, date!(2024 - 03 - 06)),
            Transaction::build("A", 1, 99.0, date!(2024 - 01 - 30)),
        ];

        let summaries = aggregate(&transactions);

        let input_amount: f64 = transactions.iter().map(|t| t.amount).sum();
        let input_points: u64 = transactions.iter().map(|t| calculate_points(t.amount)).sum();
        let output_amount: f64 = summaries.iter().map(|s| s.amount).sum();
        let output_points: u64 = summaries.iter().map(|s| s.points).sum();

        assert_eq!(output_amount, input_amount);
        assert_eq!(output_points, input_points);

        for summary in &summaries {
            let history_amount: f64 = summary.history.iter().map(|m| m.amount).sum();
            let history_points: u64 = summary.history.iter().map(|m| m.points).sum();
            assert_eq!(history_amount, summary.amount);
            assert_eq!(history_points, summary.points);
        }
    }

    #[test]
    fn reordering_a_customers_transactions_keeps_totals() {
        let mut transactions = sample_transactions();
        let forwards = aggregate(&transactions);

        transactions.swap(0, 1);
        let swapped = aggregate(&transactions);

        assert_eq!(forwards[0].amount, swapped[0].amount);
        assert_eq!(forwards[0].points, swapped[0].points);
        // History follows first-seen order, so it flips with the input.
        assert_eq!(swapped[0].history[0].month, "February");
    }

    #[test]
    fn does_not_mutate_input() {
        let transactions = sample_transactions();
        let before = transactions.clone();

        let _ = aggregate(&transactions);

        assert_eq!(transactions, before);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let summaries = aggregate(&sample_transactions());

        let json = serde_json::to_value(&summaries[1]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "B",
                "customerId": 2,
                "amount": 30.0,
                "points": 0,
                "history": [{"month": "January", "amount": 30.0, "points": 0}]
            })
        );
    }
}
