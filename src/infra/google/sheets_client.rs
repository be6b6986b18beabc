// Drive + Sheets REST client. It deliberately exposes only the three calls
// the core layer needs: file search, first-sheet metadata, and cell values.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::core::sheets::{SheetsApi, SheetsError, SpreadsheetSummary};

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

pub struct DriveSheetsClient {
    client: Client,
    drive_base: String,
    sheets_base: String,
}

impl DriveSheetsClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            drive_base: "https://www.googleapis.com/drive/v3".to_string(),
            sheets_base: "https://sheets.googleapis.com/v4".to_string(),
        }
    }

    fn parse_datetime(value: Option<String>) -> Option<DateTime<Utc>> {
        value
            .as_deref()
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Map a non-success response into a Remote error, preferring the
    /// message Google embeds at `error.message` in the body.
    async fn remote_error(what: &str, response: reqwest::Response) -> SheetsError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = embedded_error_message(&body)
            .unwrap_or_else(|| format!("{} failed with status {}", what, status));
        SheetsError::Remote(message)
    }
}

impl Default for DriveSheetsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Google error bodies look like `{"error": {"message": "..."}}`.
fn embedded_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .pointer("/error/message")?
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl SheetsApi for DriveSheetsClient {
    async fn list_spreadsheets(
        &self,
        token: &str,
    ) -> Result<Vec<SpreadsheetSummary>, SheetsError> {
        let url = format!("{}/files", self.drive_base);
        let query = format!("mimeType='{}'", SPREADSHEET_MIME);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name,createdTime,modifiedTime)"),
                ("orderBy", "modifiedTime desc"),
            ])
            .send()
            .await
            .map_err(|e| SheetsError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::remote_error("spreadsheet listing", response).await);
        }

        let list: ApiFileList = response
            .json()
            .await
            .map_err(|e| SheetsError::Remote(e.to_string()))?;

        Ok(list
            .files
            .into_iter()
            .map(|file| SpreadsheetSummary {
                id: file.id,
                name: file.name.unwrap_or_else(|| "Untitled spreadsheet".to_string()),
                created_time: Self::parse_datetime(file.created_time),
                modified_time: Self::parse_datetime(file.modified_time),
            })
            .collect())
    }

    async fn first_sheet_title(
        &self,
        spreadsheet_id: &str,
        token: &str,
    ) -> Result<String, SheetsError> {
        let url = format!("{}/spreadsheets/{}", self.sheets_base, spreadsheet_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties(title,index)")])
            .send()
            .await
            .map_err(|e| SheetsError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::remote_error("spreadsheet metadata", response).await);
        }

        let meta: ApiSpreadsheet = response
            .json()
            .await
            .map_err(|e| SheetsError::Remote(e.to_string()))?;

        meta.sheets
            .into_iter()
            .min_by_key(|sheet| sheet.properties.index)
            .map(|sheet| sheet.properties.title)
            .ok_or_else(|| SheetsError::Remote("spreadsheet has no sheets".to_string()))
    }

    async fn values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        token: &str,
    ) -> Result<Vec<Vec<Value>>, SheetsError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.sheets_base,
            spreadsheet_id,
            urlencoding::encode(range)
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetsError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::remote_error("value fetch", response).await);
        }

        let values: ApiValueRange = response
            .json()
            .await
            .map_err(|e| SheetsError::Remote(e.to_string()))?;

        Ok(values.values)
    }
}

// ============================================================================
// API RESPONSE STRUCTURES
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiFileList {
    #[serde(default)]
    files: Vec<ApiFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFile {
    id: String,
    name: Option<String>,
    created_time: Option<String>,
    modified_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSpreadsheet {
    #[serde(default)]
    sheets: Vec<ApiSheet>,
}

#[derive(Debug, Deserialize)]
struct ApiSheet {
    properties: ApiSheetProperties,
}

#[derive(Debug, Deserialize)]
struct ApiSheetProperties {
    title: String,
    #[serde(default)]
    index: u32,
}

#[derive(Debug, Deserialize)]
struct ApiValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_error_message_reads_google_error_bodies() {
        let body = r#"{"error": {"code": 403, "message": "The caller does not have permission"}}"#;
        assert_eq!(
            embedded_error_message(body),
            Some("The caller does not have permission".to_string())
        );
        assert_eq!(embedded_error_message("not json"), None);
        assert_eq!(embedded_error_message("{\"error\": \"plain\"}"), None);
    }

    #[test]
    fn file_list_tolerates_missing_fields() {
        let list: ApiFileList = serde_json::from_value(json!({
            "files": [
                {"id": "a", "name": "Budget", "createdTime": "2024-03-01T10:00:00Z"},
                {"id": "b"}
            ]
        }))
        .unwrap();

        assert_eq!(list.files.len(), 2);
        assert_eq!(list.files[1].name, None);
        assert!(
            DriveSheetsClient::parse_datetime(list.files[0].created_time.clone()).is_some()
        );
        assert!(DriveSheetsClient::parse_datetime(None).is_none());
    }

    #[test]
    fn value_range_defaults_to_an_empty_grid() {
        let values: ApiValueRange =
            serde_json::from_value(json!({"range": "'S'!A1:Z1000"})).unwrap();
        assert!(values.values.is_empty());
    }
}
