//! Table views for the reward points page.

use maud::{Markup, html};

use crate::{
    aggregation::{CustomerSummary, MonthEntry},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, format_currency},
    transaction::InvalidRecord,
};

const NUMBER_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";
const NAME_CELL_STYLE: &str = "px-6 py-4 font-medium text-gray-900 dark:text-white";
const HISTORY_CELL_STYLE: &str = "px-6 pb-4 pt-0";
const HISTORY_SUMMARY_STYLE: &str = "cursor-pointer select-none text-blue-600 \
    hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400";

/// Renders the table of customers with an expandable monthly history per customer.
///
/// Each customer gets two rows: one with their totals, and one holding a
/// collapsed `<details>` element with their transaction history. Whether a
/// history is expanded is left entirely to the browser.
pub(super) fn customers_table(customers: &[CustomerSummary]) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded-lg shadow"
        {
            table id="customers" class=(TABLE_STYLE)
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Customer Name" }
                        th scope="col" class=(NUMBER_CELL_STYLE) { "Customer ID" }
                        th scope="col" class=(NUMBER_CELL_STYLE) { "Amount ($)" }
                        th scope="col" class=(NUMBER_CELL_STYLE) { "Reward Points" }
                    }
                }

                tbody
                {
                    @for customer in customers {
                        tr class={"customer-row " (TABLE_ROW_STYLE)}
                        {
                            th scope="row" class=(NAME_CELL_STYLE) { (customer.name) }
                            td class=(NUMBER_CELL_STYLE) { (customer.customer_id) }
                            td class=(NUMBER_CELL_STYLE) { (format_currency(customer.amount)) }
                            td class=(NUMBER_CELL_STYLE) { (customer.points) }
                        }

                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="4" class=(HISTORY_CELL_STYLE)
                            {
                                details
                                {
                                    summary class=(HISTORY_SUMMARY_STYLE)
                                    {
                                        "Transaction History"
                                    }

                                    (history_table(&customer.history))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders one customer's monthly totals.
fn history_table(history: &[MonthEntry]) -> Markup {
    html! {
        table class={"history mt-2 " (TABLE_STYLE)}
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                    th scope="col" class=(NUMBER_CELL_STYLE) { "Amount ($)" }
                    th scope="col" class=(NUMBER_CELL_STYLE) { "Reward Points" }
                }
            }

            tbody
            {
                @for entry in history {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        th scope="row" class=(NAME_CELL_STYLE) { (entry.month) }
                        td class=(NUMBER_CELL_STYLE) { (format_currency(entry.amount)) }
                        td class=(NUMBER_CELL_STYLE) { (entry.points) }
                    }
                }
            }
        }
    }
}

/// Renders a warning listing the feed records that were left out.
///
/// Renders nothing when no records were skipped. Records are identified by
/// the same zero-based index the JSON API reports.
pub(super) fn skipped_records_alert(skipped: &[InvalidRecord]) -> Markup {
    if skipped.is_empty() {
        return html! {};
    }

    html! {
        div
            id="skipped-records"
            role="alert"
            class="w-full p-4 mb-4 text-sm text-yellow-800 rounded-lg bg-yellow-50
                dark:bg-gray-800 dark:text-yellow-300"
        {
            p class="font-medium"
            {
                "Skipped " (skipped.len()) " invalid "
                @if skipped.len() == 1 { "record" } @else { "records" }
                " from the transaction feed:"
            }

            ul class="mt-1.5 list-disc list-inside"
            {
                @for record in skipped {
                    li
                    {
                        "Record at index " (record.index) " (" (record.name) "): " (record.reason)
                    }
                }
            }
        }
    }
}
