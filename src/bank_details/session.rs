//! The bank details session: in-memory state for one user's bank details
//! record, kept in sync with the row-store.
//!
//! The session owns no data of record. Its state is a disposable cache of
//! whatever the repository holds for the current user, and every operation
//! re-derives it from the repository rather than trusting local payloads.
//! All repository failures are absorbed here: the caller gets an [Outcome]
//! and the user gets at most one notification per operation, nothing is
//! re-thrown.

use tracing::{debug, error};

use crate::{
    bank_details::{
        core::{BankDetails, BankDetailsFields},
        repository::BankDetailsRepository,
    },
    notification::{Notification, Notifier},
    user::UserID,
};

/// The structured result of a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran against the repository and succeeded.
    Completed,
    /// The operation ran against the repository and failed. The user has been
    /// notified; local state is unchanged.
    Failed,
    /// A precondition (user identity, known record id) was unmet. No
    /// repository call was made and no notification was emitted; callers are
    /// expected to disable the relevant action instead.
    PreconditionFailed,
}

/// Holds one user's bank details state and synchronizes it with the
/// repository.
#[derive(Debug)]
pub struct BankDetailsSession<R, N> {
    repository: R,
    notifier: N,
    user_id: Option<UserID>,
    bank_details: Option<BankDetails>,
    use_for_both: bool,
    is_processing: bool,
}

impl<R: BankDetailsRepository, N: Notifier> BankDetailsSession<R, N> {
    /// Create a session with no user and empty state.
    pub fn new(repository: R, notifier: N) -> Self {
        Self {
            repository,
            notifier,
            user_id: None,
            bank_details: None,
            use_for_both: false,
            is_processing: false,
        }
    }

    /// The currently mirrored record, if the user has one.
    pub fn bank_details(&self) -> Option<&BankDetails> {
        self.bank_details.as_ref()
    }

    /// Whether the details should be used for both receiving and paying rent.
    pub fn use_for_both(&self) -> bool {
        self.use_for_both
    }

    /// Whether an operation is in flight.
    ///
    /// Advisory UI state only; it does not prevent a second operation from
    /// being invoked.
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    /// The notifier, for draining recorded notifications after an operation.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Set the flag to store alongside the fields on the next save.
    pub fn set_use_for_both(&mut self, use_for_both: bool) {
        self.use_for_both = use_for_both;
    }

    /// Switch the session to a different user (or to no user).
    ///
    /// Local state is always reset first so a record belonging to the
    /// previous user can never be observed under the new identity. With a
    /// user present the record is then fetched from the repository; with no
    /// user the reset is the whole operation.
    pub fn set_user(&mut self, user_id: Option<UserID>) -> Outcome {
        self.bank_details = None;
        self.use_for_both = false;
        self.user_id = user_id;

        match user_id {
            Some(_) => self.fetch(),
            None => Outcome::Completed,
        }
    }

    /// Mirror the current user's record from the repository into local state.
    ///
    /// A user with no record clears local state. A repository failure leaves
    /// the previous state untouched, emits one error notification, and
    /// reports [Outcome::Failed].
    pub fn fetch(&mut self) -> Outcome {
        let Some(user_id) = self.user_id else {
            return Outcome::PreconditionFailed;
        };

        debug!("fetching bank details for user {user_id}");

        match self.repository.get_by_user(user_id) {
            Ok(Some(bank_details)) => {
                self.use_for_both = bank_details.use_for_both;
                self.bank_details = Some(bank_details);
                debug!("found bank details for user {user_id}");
                Outcome::Completed
            }
            Ok(None) => {
                self.bank_details = None;
                self.use_for_both = false;
                debug!("no bank details on file for user {user_id}");
                Outcome::Completed
            }
            Err(fetch_error) => {
                error!("could not fetch bank details for user {user_id}: {fetch_error}");
                self.notifier.notify(Notification::error(
                    "Could not load bank details",
                    "Your saved bank details could not be loaded. Please try again later.",
                ));
                Outcome::Failed
            }
        }
    }

    /// Create or update the current user's record with `fields` and the
    /// session's `use_for_both` flag.
    ///
    /// Whether to insert or update is decided by looking the record up first;
    /// updates are additionally scoped by the owning user. On success the
    /// record is re-fetched from the repository rather than assembled from
    /// the submitted payload.
    pub fn save(&mut self, fields: &BankDetailsFields) -> Outcome {
        let Some(user_id) = self.user_id else {
            return Outcome::PreconditionFailed;
        };

        self.is_processing = true;
        let outcome = self.save_inner(user_id, fields);
        self.is_processing = false;

        outcome
    }

    fn save_inner(&mut self, user_id: UserID, fields: &BankDetailsFields) -> Outcome {
        let existing_id = match self.repository.get_by_user(user_id) {
            Ok(existing) => existing.map(|bank_details| bank_details.id),
            Err(lookup_error) => {
                error!("could not look up bank details for user {user_id}: {lookup_error}");
                self.notify_save_failed();
                return Outcome::Failed;
            }
        };

        let write_result = match existing_id {
            Some(id) => self
                .repository
                .update(id, user_id, fields, self.use_for_both),
            None => self
                .repository
                .insert(user_id, fields, self.use_for_both)
                .map(|_| ()),
        };

        if let Err(write_error) = write_result {
            error!("could not save bank details for user {user_id}: {write_error}");
            self.notify_save_failed();
            return Outcome::Failed;
        }

        debug!("saved bank details for user {user_id}");
        self.notifier.notify(
            Notification::success(
                "Bank details saved",
                "Your bank details were saved successfully.",
            )
            .with_icon("bank"),
        );

        // Resynchronize from the repository instead of trusting the payload.
        self.fetch();

        Outcome::Completed
    }

    fn notify_save_failed(&mut self) {
        self.notifier.notify(Notification::error(
            "Could not save bank details",
            "Your bank details could not be saved. Please try again later.",
        ));
    }

    /// Delete the current user's record.
    ///
    /// Requires a locally-known record id; the delete is scoped by both the
    /// id and the owning user. On success local state is cleared directly,
    /// with no re-fetch, since the record is known gone.
    pub fn delete(&mut self) -> Outcome {
        let Some(user_id) = self.user_id else {
            return Outcome::PreconditionFailed;
        };
        let Some(id) = self.bank_details.as_ref().map(|bank_details| bank_details.id) else {
            return Outcome::PreconditionFailed;
        };

        self.is_processing = true;
        let outcome = match self.repository.delete(id, user_id) {
            Ok(()) => {
                debug!("deleted bank details for user {user_id}");
                self.bank_details = None;
                self.use_for_both = false;
                self.notifier.notify(
                    Notification::success(
                        "Bank details deleted",
                        "Your bank details were removed.",
                    )
                    .with_icon("trash"),
                );
                Outcome::Completed
            }
            Err(delete_error) => {
                error!("could not delete bank details for user {user_id}: {delete_error}");
                self.notifier.notify(Notification::error(
                    "Could not delete bank details",
                    "Your bank details could not be deleted. Please try again later.",
                ));
                Outcome::Failed
            }
        };
        self.is_processing = false;

        outcome
    }
}
