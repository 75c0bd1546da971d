//! Endpoint for saving (creating or updating) a user's bank details.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    alert::render_alert,
    bank_details::{BankDetailsFields, BankDetailsSession, SqliteBankDetailsRepository},
    notification::{Notification, NotificationLog},
    user::UserID,
};

use super::session::Outcome;

/// The state needed for saving bank details.
#[derive(Debug, Clone)]
pub struct SaveBankDetailsEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SaveBankDetailsEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The bank details form payload.
///
/// The checkbox is only present in the form data when ticked.
#[derive(Debug, Deserialize)]
pub struct BankDetailsFormData {
    pub account_name: String,
    pub account_number: String,
    pub routing_number: String,
    pub bank_name: String,
    pub use_for_both: Option<String>,
}

/// Handle bank details form submission. Responds with an alert partial.
pub async fn save_bank_details_endpoint(
    State(state): State<SaveBankDetailsEndpointState>,
    Extension(user_id): Extension<UserID>,
    Form(form_data): Form<BankDetailsFormData>,
) -> Response {
    let fields = BankDetailsFields {
        account_name: form_data.account_name,
        account_number: form_data.account_number,
        routing_number: form_data.routing_number,
        bank_name: form_data.bank_name,
    };

    let repository = SqliteBankDetailsRepository::new(state.db_connection.clone());
    let mut session = BankDetailsSession::new(repository, NotificationLog::new());
    session.set_user(Some(user_id));
    session.set_use_for_both(form_data.use_for_both.is_some());

    let outcome = session.save(&fields);
    alert_for_outcome(outcome, session.notifier_mut())
}

/// Turn a session outcome and its recorded notification into an alert
/// response.
pub(super) fn alert_for_outcome(outcome: Outcome, notifier: &mut NotificationLog) -> Response {
    match (outcome, notifier.take_last()) {
        (Outcome::Completed, Some(notification)) => render_alert(StatusCode::OK, &notification),
        (Outcome::Failed, Some(notification)) => {
            render_alert(StatusCode::INTERNAL_SERVER_ERROR, &notification)
        }
        _ => {
            // A precondition failure here means the auth middleware did not
            // run; there is nothing useful to show the user.
            tracing::error!("bank details operation ran without a user in scope");
            render_alert(
                StatusCode::UNAUTHORIZED,
                &Notification::error("Not logged in", "Please log in and try again."),
            )
        }
    }
}
