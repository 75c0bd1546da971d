//! The payment summary page: what the tenant owes each month.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
};

/// The state needed for the payment summary page.
#[derive(Debug, Clone)]
pub struct PaymentSummaryPageState {
    pub monthly_rate: f64,
}

impl FromRef<AppState> for PaymentSummaryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            monthly_rate: state.monthly_rate,
        }
    }
}

/// Render the payment summary page.
pub async fn get_payments_page(State(state): State<PaymentSummaryPageState>) -> Response {
    let nav_bar = NavBar::new(endpoints::PAYMENTS_VIEW).into_html();

    let content = html! {
        (nav_bar)
        div class=(PAGE_CONTAINER_STYLE)
        {
            (payment_summary_card(state.monthly_rate))
        }
    };

    base("Payments", &content).into_response()
}

/// The payment summary card: one line item for the rent and a total.
///
/// Pure function of the monthly rate.
pub fn payment_summary_card(monthly_rate: f64) -> Markup {
    let formatted_rate = format_currency(monthly_rate);

    html! {
        div class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-4" { "Payment summary" }

            div class="flex justify-between py-2 border-b border-gray-200 dark:border-gray-700"
            {
                span { "Monthly rent" }
                span { (formatted_rate) }
            }

            div class="flex justify-between py-2 font-bold"
            {
                span { "Total due monthly" }
                span { (formatted_rate) }
            }
        }
    }
}
