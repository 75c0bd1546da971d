//! Bank details for receiving and paying rent.
//!
//! Each user has at most one bank details record. The record lives in the
//! database behind [BankDetailsRepository]; [BankDetailsSession] mirrors it
//! into memory for the duration of a request and funnels user-facing
//! feedback through a [crate::Notifier].

mod core;
mod delete_endpoint;
mod details_page;
mod repository;
mod save_endpoint;
mod session;

pub use core::{BankDetails, BankDetailsFields, create_bank_details_table};
pub use delete_endpoint::delete_bank_details_endpoint;
pub use details_page::get_bank_details_page;
pub use repository::{BankDetailsRepository, SqliteBankDetailsRepository};
pub use save_endpoint::save_bank_details_endpoint;
pub use session::{BankDetailsSession, Outcome};
