//! Reward points HTTP handler and view rendering.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    Error,
    aggregation::CustomerSummary,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    reward_points::{
        RewardPoints, load_reward_points,
        tables::{customers_table, skipped_records_alert},
    },
    source::TransactionSource,
    transaction::InvalidRecord,
};

/// Display a page with each customer's reward points and monthly history.
///
/// The transactions are fetched fresh from the feed on every request.
pub async fn get_reward_points_page(
    State(source): State<TransactionSource>,
) -> Result<Response, Error> {
    let reward_points = load_reward_points(&source).await?;

    if reward_points.is_empty() {
        return Ok(reward_points_no_data_view().into_response());
    }

    let RewardPoints { customers, skipped } = reward_points;

    Ok(reward_points_view(&customers, &skipped).into_response())
}

/// Renders the page when the transaction feed has no transactions.
fn reward_points_no_data_view() -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Reward points will show up here once the transaction feed has some purchases."
            }
        }
    );

    base("Reward Points", &[], &content)
}

/// Renders the main reward points page.
fn reward_points_view(customers: &[CustomerSummary], skipped: &[InvalidRecord]) -> Markup {
    let content = html!(
        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-lg"}
        {
            h1 class="self-start mb-4 text-3xl font-bold" { "Reward Points" }

            (skipped_records_alert(skipped))

            @if customers.is_empty() {
                p { "None of the transactions in the feed could be used." }
            } @else {
                (customers_table(customers))
            }
        }
    );

    let styles = [HeadElement::Style(PreEscaped(
        r#"
        details > summary {
            list-style-position: inside;
        }
        "#
        .to_owned(),
    ))];

    base("Reward Points", &styles, &content)
}
