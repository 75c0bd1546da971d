//! The remote row-store interface for bank details, and its SQLite
//! implementation.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    bank_details::core::{BankDetails, BankDetailsFields, map_row_to_bank_details},
    database_id::DatabaseId,
    user::UserID,
};

/// The four capability methods the bank details session needs from the
/// row-store.
///
/// Every method takes explicit identity parameters; mutations are scoped by
/// both the record id and the owning user so a mismatched id can never touch
/// another user's row.
pub trait BankDetailsRepository {
    /// Retrieve the record owned by `user_id`, or `None` if the user has no
    /// record. "No rows" is a non-error outcome.
    fn get_by_user(&self, user_id: UserID) -> Result<Option<BankDetails>, Error>;

    /// Insert a new record owned by `user_id` and return it with its
    /// generated id.
    fn insert(
        &mut self,
        user_id: UserID,
        fields: &BankDetailsFields,
        use_for_both: bool,
    ) -> Result<BankDetails, Error>;

    /// Update the record matching both `id` and `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::UpdateMissingBankDetails] if no row matched.
    fn update(
        &mut self,
        id: DatabaseId,
        user_id: UserID,
        fields: &BankDetailsFields,
        use_for_both: bool,
    ) -> Result<(), Error>;

    /// Delete the record matching both `id` and `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::DeleteMissingBankDetails] if no row matched.
    fn delete(&mut self, id: DatabaseId, user_id: UserID) -> Result<(), Error>;
}

/// Stores bank details in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBankDetailsRepository {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteBankDetailsRepository {
    /// Create a new repository from the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl BankDetailsRepository for SqliteBankDetailsRepository {
    fn get_by_user(&self, user_id: UserID) -> Result<Option<BankDetails>, Error> {
        let result = self
            .lock()?
            .prepare(
                "SELECT id, user_id, account_name, account_number, routing_number, bank_name, use_for_both
                FROM bank_details WHERE user_id = :user_id;",
            )?
            .query_row(
                &[(":user_id", &user_id.as_i64())],
                map_row_to_bank_details,
            );

        match result {
            Ok(bank_details) => Ok(Some(bank_details)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn insert(
        &mut self,
        user_id: UserID,
        fields: &BankDetailsFields,
        use_for_both: bool,
    ) -> Result<BankDetails, Error> {
        let connection = self.lock()?;

        connection.execute(
            "INSERT INTO bank_details
                (user_id, account_name, account_number, routing_number, bank_name, use_for_both)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            (
                user_id.as_i64(),
                &fields.account_name,
                &fields.account_number,
                &fields.routing_number,
                &fields.bank_name,
                use_for_both,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(BankDetails {
            id,
            user_id,
            account_name: fields.account_name.clone(),
            account_number: fields.account_number.clone(),
            routing_number: fields.routing_number.clone(),
            bank_name: fields.bank_name.clone(),
            use_for_both,
        })
    }

    fn update(
        &mut self,
        id: DatabaseId,
        user_id: UserID,
        fields: &BankDetailsFields,
        use_for_both: bool,
    ) -> Result<(), Error> {
        let rows_affected = self.lock()?.execute(
            "UPDATE bank_details
                SET account_name = ?1, account_number = ?2, routing_number = ?3,
                    bank_name = ?4, use_for_both = ?5
                WHERE id = ?6 AND user_id = ?7;",
            (
                &fields.account_name,
                &fields.account_number,
                &fields.routing_number,
                &fields.bank_name,
                use_for_both,
                id,
                user_id.as_i64(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingBankDetails);
        }

        Ok(())
    }

    fn delete(&mut self, id: DatabaseId, user_id: UserID) -> Result<(), Error> {
        let rows_affected = self.lock()?.execute(
            "DELETE FROM bank_details WHERE id = ?1 AND user_id = ?2;",
            (id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingBankDetails);
        }

        Ok(())
    }
}
