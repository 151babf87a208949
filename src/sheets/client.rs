//! Google Sheets REST client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::auth::ServiceAccountAuth;
use super::document::{SheetTable, SpreadsheetDocument};
use super::error::SpreadsheetAccessError;
use super::source::SpreadsheetSource;
use super::types::{SpreadsheetMetadata, ValueRange};

/// Public Sheets API host
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Field mask for the metadata call; keeps cell data out of the response
const METADATA_FIELDS: &str = "spreadsheetId,properties.title,sheets.properties";

/// Client for reading whole spreadsheets through the Sheets API v4
pub struct SheetsClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Service-account token source
    auth: ServiceAccountAuth,
    /// API host, without the `/v4` prefix
    base_url: Url,
}

impl SheetsClient {
    /// Create a new Sheets client against the public API
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(auth: ServiceAccountAuth) -> Result<Self, SpreadsheetAccessError> {
        Self::with_base_url(auth, DEFAULT_BASE_URL)
    }

    /// Create a client against a different host (emulators, proxies)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_base_url(
        auth: ServiceAccountAuth,
        base_url: &str,
    ) -> Result<Self, SpreadsheetAccessError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            SpreadsheetAccessError::InvalidRequest(format!("Invalid base URL {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SpreadsheetAccessError::InvalidRequest(format!(
                "Invalid base URL {}",
                base_url
            )));
        }

        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                SpreadsheetAccessError::Network(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            auth,
            base_url,
        })
    }

    /// Authenticated GET returning a decoded JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SpreadsheetAccessError> {
        let token = self.auth.get_token().await?;

        let response = self.http_client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpreadsheetAccessError::from_status(status.as_u16(), &body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| SpreadsheetAccessError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl SpreadsheetSource for SheetsClient {
    async fn fetch(
        &self,
        spreadsheet_id: &str,
    ) -> Result<SpreadsheetDocument, SpreadsheetAccessError> {
        if spreadsheet_id.trim().is_empty() {
            return Err(SpreadsheetAccessError::InvalidRequest(
                "Spreadsheet ID is empty".to_string(),
            ));
        }

        let metadata: SpreadsheetMetadata =
            self.get_json(metadata_url(&self.base_url, spreadsheet_id)).await?;

        let mut sheets = Vec::with_capacity(metadata.sheets.len());
        for sheet in metadata.sheets {
            let properties = sheet.properties;
            if !properties.has_cells() {
                tracing::debug!(sheet = %properties.title, "skipping chart-only sheet");
                continue;
            }

            let range: ValueRange = self
                .get_json(values_url(&self.base_url, spreadsheet_id, &properties.title))
                .await?;
            let grid = properties.grid_properties.unwrap_or_default();

            sheets.push(SheetTable::from_values(
                properties.title,
                grid.row_count,
                grid.column_count,
                range.values,
            ));
        }

        tracing::debug!(
            spreadsheet_id,
            sheet_count = sheets.len(),
            "spreadsheet fetched"
        );

        Ok(SpreadsheetDocument {
            id: spreadsheet_id.to_string(),
            title: metadata.properties.map(|p| p.title),
            sheets,
        })
    }
}

/// `/v4/spreadsheets/{id}` with the metadata field mask
fn metadata_url(base_url: &Url, spreadsheet_id: &str) -> Url {
    let mut url = spreadsheet_url(base_url, spreadsheet_id, &[]);
    url.query_pairs_mut().append_pair("fields", METADATA_FIELDS);
    url
}

/// `/v4/spreadsheets/{id}/values/{range}` covering a whole sheet
fn values_url(base_url: &Url, spreadsheet_id: &str, sheet_title: &str) -> Url {
    let range = a1_sheet_range(sheet_title);
    let mut url = spreadsheet_url(base_url, spreadsheet_id, &["values", range.as_str()]);
    url.query_pairs_mut()
        .append_pair("majorDimension", "ROWS")
        .append_pair("valueRenderOption", "FORMATTED_VALUE");
    url
}

fn spreadsheet_url(base_url: &Url, spreadsheet_id: &str, rest: &[&str]) -> Url {
    let mut url = base_url.clone();
    // cannot_be_a_base is rejected in the constructor
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id])
            .extend(rest);
    }
    url
}

/// A1 range selecting every cell of a sheet: the quoted title alone
fn a1_sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}
