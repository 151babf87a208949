//! Spreadsheet reader
//!
//! Loads every sheet of a Google spreadsheet with a service-account
//! credential and normalizes the contents into [`SpreadsheetDocument`].

pub mod auth;
pub mod client;
pub mod document;
pub mod error;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use auth::ServiceAccountAuth;
pub use client::SheetsClient;
pub use document::{SheetTable, SpreadsheetDocument};
pub use error::SpreadsheetAccessError;
pub use source::SpreadsheetSource;
