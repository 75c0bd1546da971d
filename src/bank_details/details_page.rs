//! The bank details page: a form prefilled with the user's saved record.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState,
    bank_details::{BankDetails, BankDetailsSession, SqliteBankDetailsRepository},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    notification::NotificationLog,
    user::UserID,
};

/// The state needed for the bank details page.
#[derive(Debug, Clone)]
pub struct BankDetailsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BankDetailsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the bank details page for the logged-in user.
pub async fn get_bank_details_page(
    State(state): State<BankDetailsPageState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let repository = SqliteBankDetailsRepository::new(state.db_connection.clone());
    let mut session = BankDetailsSession::new(repository, NotificationLog::new());
    session.set_user(Some(user_id));

    let error_message = session
        .notifier_mut()
        .take_last()
        .map(|notification| notification.description)
        .unwrap_or_default();

    bank_details_view(session.bank_details(), session.use_for_both(), &error_message)
        .into_response()
}

fn bank_details_view(
    bank_details: Option<&BankDetails>,
    use_for_both: bool,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BANK_DETAILS_VIEW).into_html();
    let form = bank_details_form_view(bank_details, use_for_both, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Bank Details", &content)
}

fn bank_details_form_view(
    bank_details: Option<&BankDetails>,
    use_for_both: bool,
    error_message: &str,
) -> Markup {
    let field = |id: &str, label: &str, value: &str| {
        html! {
            div
            {
                label for=(id) class=(FORM_LABEL_STYLE) { (label) }

                input
                    id=(id)
                    type="text"
                    name=(id)
                    placeholder=(label)
                    value=(value)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    };

    html! {
        form
            hx-post=(endpoints::SAVE_BANK_DETAILS)
            hx-target="#alert-container"
            hx-swap="innerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 dark:text-white"
            {
                "Bank details"
            }

            (field(
                "account_name",
                "Account holder",
                bank_details.map(|record| record.account_name.as_str()).unwrap_or_default(),
            ))
            (field(
                "account_number",
                "Account number",
                bank_details.map(|record| record.account_number.as_str()).unwrap_or_default(),
            ))
            (field(
                "routing_number",
                "Routing number",
                bank_details.map(|record| record.routing_number.as_str()).unwrap_or_default(),
            ))
            (field(
                "bank_name",
                "Bank name",
                bank_details.map(|record| record.bank_name.as_str()).unwrap_or_default(),
            ))

            div class="flex items-center gap-2"
            {
                input
                    id="use_for_both"
                    type="checkbox"
                    name="use_for_both"
                    checked[use_for_both]
                    class="w-4 h-4 rounded border-gray-300";

                label for="use_for_both" class=(FORM_LABEL_STYLE)
                {
                    "Use these details for both receiving and paying rent"
                }
            }

            @if !error_message.is_empty() {
                p
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save bank details" }

            @if bank_details.is_some() {
                button
                    type="button"
                    hx-delete=(endpoints::DELETE_BANK_DETAILS)
                    hx-target="#alert-container"
                    hx-swap="innerHTML"
                    hx-confirm="Delete your saved bank details?"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete bank details"
                }
            }
        }
    }
}
