use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::endpoints;

// Table styles
pub const TABLE_STYLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";

pub const TABLE_HEADER_STYLE: &str = "text-xs text-white uppercase \
    bg-blue-800 dark:bg-blue-900";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The Tailwind CSS browser build, which generates the styles for the
/// utility classes used in the markup.
const TAILWIND_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";

pub enum HeadElement {
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Reward Points" }

                script src=(TAILWIND_SCRIPT) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href=(endpoints::ROOT)
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Amounts this large or larger are shown in scientific notation.
const LARGEST_GROUPED_AMOUNT: f64 = 1e12;

/// Format a dollar amount rounded to the nearest cent, e.g. "$1,234.50" or "-$0.25".
///
/// Anything that rounds to zero cents is shown as "$0.00", including the float
/// residue left when refunds cancel out purchases. Amounts of a trillion
/// dollars or more are shown as e.g. "$1.00e12".
pub fn format_currency(amount: f64) -> String {
    static DOLLARS: OnceLock<Formatter> = OnceLock::new();

    let rounded = (amount * 100.0).round() / 100.0;

    // Also catches -0.0.
    if rounded == 0.0 {
        return "$0.00".to_owned();
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    let magnitude = rounded.abs();

    // numfmt switches to scientific notation past twelve integer digits and
    // truncates the mantissa, so large amounts are formatted here instead.
    if !magnitude.is_finite() || magnitude >= LARGEST_GROUPED_AMOUNT {
        return format!("{sign}${magnitude:.2e}");
    }

    let dollars = DOLLARS.get_or_init(|| {
        Formatter::currency("$")
            .expect("\"$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let mut formatted = format!("{sign}{}", dollars.fmt_string(magnitude));

    // numfmt drops trailing zeros from the cents, e.g. "$12.3" or "$20.0".
    match formatted.rsplit_once('.').map(|(_, cents)| cents.len()) {
        None => formatted.push_str(".00"),
        Some(1) => formatted.push('0'),
        Some(_) => {}
    }

    formatted
}
