//! Source trait for spreadsheet readers

use async_trait::async_trait;

use super::{document::SpreadsheetDocument, error::SpreadsheetAccessError};

/// Anything that can load a spreadsheet by identifier
#[async_trait]
pub trait SpreadsheetSource: Send + Sync {
    /// Fetch every sheet of the spreadsheet
    ///
    /// Implementations must not cache: each call reads the document in full.
    ///
    /// # Arguments
    /// * `spreadsheet_id` - Opaque document identifier
    ///
    /// # Returns
    /// The normalized document, or an error if authentication fails, the
    /// identifier is invalid or the service cannot be reached
    async fn fetch(&self, spreadsheet_id: &str)
        -> Result<SpreadsheetDocument, SpreadsheetAccessError>;
}
