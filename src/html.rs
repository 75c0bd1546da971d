//! The shared page layout, common Tailwind style strings, and currency
//! formatting helpers.

use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

// Card style for the payment summary
pub const CARD_STYLE: &str = "w-full max-w-md bg-white dark:bg-gray-800 border \
    border-gray-200 dark:border-gray-700 rounded-lg p-6 shadow-md";

/// The base layout shared by every page.
///
/// Includes the HTMX scripts and the fixed alert container that endpoint
/// responses swap their alert partials into.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Rently" }

                script src="https://cdn.tailwindcss.com" {}
                script src="https://unpkg.com/htmx.org@2.0.8" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4" {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full-page error view, e.g. for 404 and 500 responses.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900" {
            div class="py-8 px-4 mx-auto max-w-screen-sm lg:py-16 text-center" {
                h1 class="mb-4 text-7xl lg:text-9xl tracking-tight font-extrabold text-blue-600 dark:text-blue-500" {
                    (header)
                }

                p class="mb-4 text-3xl md:text-4xl tracking-tight font-bold text-gray-900 dark:text-white" {
                    (description)
                }

                p class="mb-4 text-1xl md:text-2xl tracking-tight text-gray-900 dark:text-white" {
                    (fix)
                }

                a
                    href="/"
                    class="inline-flex text-white bg-blue-600 hover:bg-blue-800
                        focus:ring-4 focus:outline-hidden focus:ring-blue-300
                        font-medium rounded text-sm px-5 py-2.5 text-center
                        dark:focus:ring-blue-900 my-4"
                {
                    "Back to Homepage"
                }
            }
        }
    );

    base(title, &content)
}

/// The shared card layout for the log-in and registration forms.
pub fn log_in_register(form_title: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto" {
            span class="mb-6 text-2xl font-semibold text-gray-900 dark:text-white" { "Rently" }

            div class="w-full sm:max-w-md bg-white dark:bg-gray-800 rounded-lg shadow dark:border dark:border-gray-700" {
                div class="p-6 sm:p-8 space-y-4 md:space-y-6" {
                    h1 class="text-xl md:text-2xl font-bold leading-tight tracking-tight text-gray-900 dark:text-white" {
                        (form_title)
                    }

                    (form)
                }
            }
        }
    }
}

/// Format `number` as a dollar amount with two decimal places, e.g. `$1,234.50`.
pub fn format_currency(number: f64) -> String {
    // numfmt renders zero as a bare "0"
    if number == 0.0 {
        return "$0.00".to_owned();
    }

    static FORMATTER: OnceLock<Formatter> = OnceLock::new();
    let formatter = FORMATTER.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let sign = if number < 0.0 { "-" } else { "" };
    let mut formatted = format!("{sign}{}", formatter.fmt_string(number.abs()));

    // numfmt also drops a final trailing zero ("12.30" comes out as "12.3")
    if formatted.as_bytes()[formatted.len() - 3] != b'.' {
        formatted.push('0');
    }

    formatted
}

#[cfg(test)]
mod format_currency_tests {
    use super::format_currency;

    #[test]
    fn formats_with_two_decimal_places() {
        assert_eq!(format_currency(1500.0), "$1,500.00");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_currency(-42.25), "-$42.25");
    }
}
