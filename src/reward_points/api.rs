//! JSON endpoint for the aggregated reward points.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{reward_points::load_reward_points, source::TransactionSource};

/// Respond with the reward points for every customer as JSON.
///
/// The body has the shape `{"customers": [...], "skipped": [...]}`. Errors are
/// returned as `{"error": "..."}` with a matching status code.
pub async fn get_reward_points_json(State(source): State<TransactionSource>) -> Response {
    match load_reward_points(&source).await {
        Ok(reward_points) => Json(reward_points).into_response(),
        Err(error) => error.into_json_response(),
    }
}
