//! Serves the raw transactions from the local data file as a JSON feed.
//!
//! This lets the server stand in for the transaction feed itself when it is
//! started with a data file.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{Error, source::TransactionSource};

/// Respond with the data file's transactions as a JSON array.
///
/// Transactions are passed through unvalidated. Responds with 404 when the
/// server fetches its transactions over HTTP, since there is no local data
/// to serve.
pub async fn get_transactions_feed(
    State(source): State<TransactionSource>,
) -> Result<Response, Error> {
    if !source.is_file() {
        return Err(Error::NotFound);
    }

    let records = source
        .fetch()
        .await
        .inspect_err(|error| tracing::error!("could not read transaction feed: {error}"))?;

    Ok(Json(records).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;

    use crate::{endpoints, source::TransactionSource};

    use super::get_transactions_feed;

    fn get_test_server(source: TransactionSource) -> TestServer {
        let app = Router::new()
            .route(endpoints::TRANSACTIONS_FEED, get(get_transactions_feed))
            .with_state(source);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn serves_data_file_as_json() {
        let path = std::env::temp_dir().join(format!(
            "reward_points_feed_{}.csv",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "name,customerId,amount,transactionDate\nA,1,120,2024-01-15\nB,2,,2024-01-20\n",
        )
        .unwrap();
        let server = get_test_server(TransactionSource::file(&path));

        let response = server.get(endpoints::TRANSACTIONS_FEED).await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!([
            {"name": "A", "customerId": 1, "amount": 120.0, "transactionDate": "2024-01-15"},
            {"name": "B", "customerId": 2, "transactionDate": "2024-01-20"}
        ]));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn not_found_without_data_file() {
        let server = get_test_server(TransactionSource::http("http://127.0.0.1:9/rewards"));

        server
            .get(endpoints::TRANSACTIONS_FEED)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
