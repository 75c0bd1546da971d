//! Alert partials for displaying success and error messages to users.
//!
//! Endpoints respond with these partials; HTMX swaps them into the
//! `#alert-container` element of the base layout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::notification::{Notification, Severity};

const SUCCESS_STYLE: &str = "flex items-center gap-3 w-full p-4 mb-4 rounded-lg shadow \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";
const ERROR_STYLE: &str = "flex items-center gap-3 w-full p-4 mb-4 rounded-lg shadow \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

/// Render `notification` as an alert partial.
pub fn alert_view(notification: &Notification) -> Markup {
    let style = match notification.severity {
        Severity::Success => SUCCESS_STYLE,
        Severity::Error => ERROR_STYLE,
    };

    html! {
        div class=(style) role="alert"
        {
            @if let Some(icon) = notification.icon {
                span class="shrink-0 text-lg" data-icon=(icon) { (icon_glyph(icon)) }
            }

            div
            {
                p class="font-medium" { (notification.title) }

                @if !notification.description.is_empty() {
                    p class="text-sm" { (notification.description) }
                }
            }
        }
    }
}

/// Build a response carrying the alert partial for `notification`.
pub fn render_alert(status_code: StatusCode, notification: &Notification) -> Response {
    (status_code, alert_view(notification)).into_response()
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "bank" => "🏦",
        "trash" => "🗑",
        _ => "ℹ",
    }
}

#[cfg(test)]
mod alert_view_tests {
    use axum::http::StatusCode;

    use crate::notification::Notification;

    use super::{alert_view, render_alert};

    #[test]
    fn success_alert_contains_title_and_description() {
        let markup = alert_view(&Notification::success(
            "Bank details saved",
            "Your bank details were saved successfully.",
        ));

        let markup = markup.into_string();
        assert!(markup.contains("Bank details saved"));
        assert!(markup.contains("Your bank details were saved successfully."));
        assert!(markup.contains("text-green-800"));
    }

    #[test]
    fn error_alert_uses_error_styling() {
        let markup = alert_view(&Notification::error("Something went wrong", "")).into_string();

        assert!(markup.contains("text-red-800"));
        assert!(!markup.contains("text-sm"), "empty description should be omitted");
    }

    #[test]
    fn icon_token_is_rendered() {
        let markup =
            alert_view(&Notification::success("Saved", "").with_icon("bank")).into_string();

        assert!(markup.contains("data-icon=\"bank\""));
    }

    #[test]
    fn render_alert_sets_status_code() {
        let response = render_alert(
            StatusCode::NOT_FOUND,
            &Notification::error("Not found", "The record could not be found."),
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
