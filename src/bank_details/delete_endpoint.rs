//! Endpoint for deleting a user's bank details.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState,
    alert::render_alert,
    bank_details::{
        BankDetailsSession, SqliteBankDetailsRepository, save_endpoint::alert_for_outcome,
        session::Outcome,
    },
    notification::{Notification, NotificationLog},
    user::UserID,
};

/// The state needed for deleting bank details.
#[derive(Debug, Clone)]
pub struct DeleteBankDetailsEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBankDetailsEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle bank details deletion. Responds with an alert partial.
pub async fn delete_bank_details_endpoint(
    State(state): State<DeleteBankDetailsEndpointState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let repository = SqliteBankDetailsRepository::new(state.db_connection.clone());
    let mut session = BankDetailsSession::new(repository, NotificationLog::new());
    session.set_user(Some(user_id));

    match session.delete() {
        // No record to delete. The page never offers the button in this
        // state, so a stale form is the likely cause.
        Outcome::PreconditionFailed => render_alert(
            StatusCode::NOT_FOUND,
            &Notification::error(
                "No bank details on file",
                "There are no saved bank details to delete.",
            ),
        ),
        outcome => alert_for_outcome(outcome, session.notifier_mut()),
    }
}
