//! Service-account authentication for the Sheets API

use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::path::Path;
use std::sync::Arc;

use super::error::SpreadsheetAccessError;

/// OAuth scope granting spreadsheet read/write access
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Issues bearer tokens for the Sheets API from a service-account key
///
/// The key is loaded once at startup and shared by every request. Tokens are
/// cached by `gcp_auth` and refreshed when they expire.
#[derive(Clone)]
pub struct ServiceAccountAuth {
    inner: Arc<dyn TokenProvider>,
}

impl ServiceAccountAuth {
    /// Load a service-account key file (`client_email` + `private_key`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpreadsheetAccessError> {
        let path = path.as_ref();
        let account = CustomServiceAccount::from_file(path).map_err(|e| {
            SpreadsheetAccessError::Authentication(format!(
                "Failed to load service account from {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::from_provider(Arc::new(account)))
    }

    /// Parse service-account key contents
    ///
    /// # Errors
    /// Returns an error if the JSON is not a valid key.
    pub fn from_json(json: &str) -> Result<Self, SpreadsheetAccessError> {
        let account = CustomServiceAccount::from_json(json).map_err(|e| {
            SpreadsheetAccessError::Authentication(format!(
                "Failed to parse service account key: {}",
                e
            ))
        })?;

        Ok(Self::from_provider(Arc::new(account)))
    }

    /// Wrap any token provider
    pub fn from_provider(inner: Arc<dyn TokenProvider>) -> Self {
        Self { inner }
    }

    /// Get an access token for the spreadsheets scope
    ///
    /// # Errors
    /// Returns an error if token retrieval or refresh fails.
    pub async fn get_token(&self) -> Result<String, SpreadsheetAccessError> {
        let token = self.inner.token(&[SPREADSHEETS_SCOPE]).await?;
        Ok(token.as_str().to_string())
    }
}
