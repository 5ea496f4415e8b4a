//! Application router configuration.

use axum::{Router, middleware, response::Redirect, routing::get};

use crate::{
    AppState, endpoints,
    error_page::get_internal_server_error_page,
    feed::get_transactions_feed,
    logging::logging_middleware,
    not_found::get_404_not_found,
    reward_points::{get_reward_points_json, get_reward_points_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::REWARD_POINTS_VIEW, get(get_reward_points_page))
        .route(endpoints::REWARD_POINTS_API, get(get_reward_points_json))
        .route(endpoints::TRANSACTIONS_FEED, get(get_transactions_feed))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the reward points page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::REWARD_POINTS_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_reward_points() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::REWARD_POINTS_VIEW);
    }
}
