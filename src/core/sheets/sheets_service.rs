// Spreadsheet listing and reading, independent of any concrete Google client.
// The core defines WHAT it needs from the identity and spreadsheet APIs;
// the infra layer provides the actual implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use super::range::quote_sheet_title;

/// Fixed fetch window requested for every read: columns A-Z, rows 1-1000.
///
/// Sheets larger than this are silently truncated. Known limitation: the
/// window is not grown to the sheet's actual extent and no truncation
/// warning is surfaced.
pub const FETCH_RANGE: &str = "A1:Z1000";

// ============================================================================
// DOMAIN MODELS
// ============================================================================

/// One spreadsheet as returned by the listing call.
///
/// Held in memory for the lifetime of the popup session only; nothing here
/// is persisted.
#[derive(Debug, Clone)]
pub struct SpreadsheetSummary {
    pub id: String,
    pub name: String,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
}

impl SpreadsheetSummary {
    /// Browser URL of the spreadsheet.
    pub fn web_url(&self) -> String {
        format!("https://docs.google.com/spreadsheets/d/{}", self.id)
    }
}

/// The first sheet's title plus its cell values, fetched fresh per run.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub title: String,
    pub values: Vec<Vec<Value>>,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum SheetsError {
    /// The identity provider could not produce a bearer token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A Drive or Sheets call came back with a non-success status. Carries
    /// the provider's embedded error message when the body supplied one.
    #[error("{0}")]
    Remote(String),
}

// ============================================================================
// PORTS
// ============================================================================

/// Produces an OAuth bearer token for the Google APIs.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, SheetsError>;
}

/// The three remote calls the popup needs from Drive and Sheets.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// List the user's spreadsheets, most recently modified first.
    async fn list_spreadsheets(
        &self,
        token: &str,
    ) -> Result<Vec<SpreadsheetSummary>, SheetsError>;

    /// Title of the spreadsheet's first sheet by declared index.
    async fn first_sheet_title(
        &self,
        spreadsheet_id: &str,
        token: &str,
    ) -> Result<String, SheetsError>;

    /// Cell values for an A1 range. An absent `values` field means an
    /// empty grid, not an error.
    async fn values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        token: &str,
    ) -> Result<Vec<Vec<Value>>, SheetsError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Sequences token retrieval with the Drive/Sheets calls.
///
/// Every operation is a strictly sequential chain; nothing here runs
/// concurrently, retries, or caches sheet data.
pub struct SheetsService<T: TokenProvider, A: SheetsApi> {
    tokens: T,
    api: A,
}

impl<T: TokenProvider, A: SheetsApi> SheetsService<T, A> {
    pub fn new(tokens: T, api: A) -> Self {
        Self { tokens, api }
    }

    /// Token, then the spreadsheet listing.
    pub async fn list(&self) -> Result<Vec<SpreadsheetSummary>, SheetsError> {
        let token = self.tokens.access_token().await?;
        let sheets = self.api.list_spreadsheets(&token).await?;
        tracing::debug!(count = sheets.len(), "listed spreadsheets");
        Ok(sheets)
    }

    /// Token, first sheet title, then the fixed-window cell values.
    pub async fn fetch_first_sheet(&self, spreadsheet_id: &str) -> Result<SheetData, SheetsError> {
        let token = self.tokens.access_token().await?;
        let title = self.api.first_sheet_title(spreadsheet_id, &token).await?;
        let range = format!("{}!{}", quote_sheet_title(&title), FETCH_RANGE);
        let values = self.api.values(spreadsheet_id, &range, &token).await?;
        tracing::debug!(%title, rows = values.len(), "fetched sheet values");
        Ok(SheetData { title, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct FixedToken;

    #[async_trait]
    impl TokenProvider for FixedToken {
        async fn access_token(&self) -> Result<String, SheetsError> {
            Ok("token-1".to_string())
        }
    }

    struct FakeApi {
        requested_ranges: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SheetsApi for FakeApi {
        async fn list_spreadsheets(
            &self,
            _token: &str,
        ) -> Result<Vec<SpreadsheetSummary>, SheetsError> {
            Ok(vec![])
        }

        async fn first_sheet_title(
            &self,
            _spreadsheet_id: &str,
            _token: &str,
        ) -> Result<String, SheetsError> {
            Ok("Q3 Budget".to_string())
        }

        async fn values(
            &self,
            _spreadsheet_id: &str,
            range: &str,
            _token: &str,
        ) -> Result<Vec<Vec<Value>>, SheetsError> {
            self.requested_ranges
                .lock()
                .unwrap()
                .push(range.to_string());
            Ok(vec![vec![json!("a")]])
        }
    }

    #[tokio::test]
    async fn fetch_requests_the_fixed_window_on_the_first_sheet() {
        let api = FakeApi {
            requested_ranges: Mutex::new(Vec::new()),
        };
        let service = SheetsService::new(FixedToken, api);

        let data = service.fetch_first_sheet("sheet-id").await.unwrap();

        assert_eq!(data.title, "Q3 Budget");
        assert_eq!(data.values, vec![vec![json!("a")]]);
        let ranges = service.api.requested_ranges.lock().unwrap();
        assert_eq!(ranges.as_slice(), ["'Q3 Budget'!A1:Z1000"]);
    }

    #[test]
    fn web_url_points_at_the_document() {
        let summary = SpreadsheetSummary {
            id: "abc123".to_string(),
            name: "Budget".to_string(),
            created_time: None,
            modified_time: None,
        };
        assert_eq!(
            summary.web_url(),
            "https://docs.google.com/spreadsheets/d/abc123"
        );
    }
}
