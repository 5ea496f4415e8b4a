//! The API endpoints URIs.

/// The root route which redirects to the reward points page.
pub const ROOT: &str = "/";
/// The page showing each customer's reward points.
pub const REWARD_POINTS_VIEW: &str = "/reward_points";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for the aggregated reward points as JSON.
pub const REWARD_POINTS_API: &str = "/api/reward_points";
/// The route serving the raw transactions from the local data file.
pub const TRANSACTIONS_FEED: &str = "/rewards";
