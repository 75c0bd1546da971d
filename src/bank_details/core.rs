//! The bank details record and its table.

use serde::Deserialize;

use crate::{database_id::DatabaseId, user::UserID};

/// The bank details a tenant uses for paying and receiving rent.
///
/// At most one record is kept per user. Uniqueness is enforced by looking up
/// the user's record before writing, not by a schema constraint, so two
/// concurrent first-time saves for the same user can still race into
/// duplicate rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BankDetails {
    /// The id for the record, assigned by the database on insert.
    pub id: DatabaseId,
    /// The user that owns the record.
    pub user_id: UserID,
    /// The name on the bank account.
    pub account_name: String,
    /// The account number. Stored as-is, no format validation.
    pub account_number: String,
    /// The routing number. Stored as-is, no format validation.
    pub routing_number: String,
    /// The name of the bank.
    pub bank_name: String,
    /// Whether the same details are used for both receiving and paying rent.
    pub use_for_both: bool,
}

/// The editable field set of a bank details record, as submitted by the form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BankDetailsFields {
    /// The name on the bank account.
    pub account_name: String,
    /// The account number.
    pub account_number: String,
    /// The routing number.
    pub routing_number: String,
    /// The name of the bank.
    pub bank_name: String,
}

pub fn create_bank_details_table(connection: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS bank_details (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id),
            account_name TEXT NOT NULL,
            account_number TEXT NOT NULL,
            routing_number TEXT NOT NULL,
            bank_name TEXT NOT NULL,
            use_for_both INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_bank_details_user_id ON bank_details(user_id);",
    )?;

    Ok(())
}

pub fn map_row_to_bank_details(row: &rusqlite::Row) -> Result<BankDetails, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_user_id: i64 = row.get(1)?;
    let account_name = row.get(2)?;
    let account_number = row.get(3)?;
    let routing_number = row.get(4)?;
    let bank_name = row.get(5)?;
    let use_for_both = row.get(6)?;

    Ok(BankDetails {
        id,
        user_id: UserID::new(raw_user_id),
        account_name,
        account_number,
        routing_number,
        bank_name,
        use_for_both,
    })
}
