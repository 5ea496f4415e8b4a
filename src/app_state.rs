//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::source::TransactionSource;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where the purchase transactions are fetched from.
    pub transaction_source: TransactionSource,
}

impl AppState {
    /// Create a new [AppState] that reads transactions from `transaction_source`.
    pub fn new(transaction_source: TransactionSource) -> Self {
        Self { transaction_source }
    }
}

impl FromRef<AppState> for TransactionSource {
    fn from_ref(state: &AppState) -> Self {
        state.transaction_source.clone()
    }
}
