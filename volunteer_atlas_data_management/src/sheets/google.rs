use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::{DataManagerError, SPREADSHEETS_URL};

use super::{Credential, SheetSource, Worksheet};

/// Reads worksheets through the Google Sheets v4 `values` endpoint. Built once
/// at startup and shared by every render.
pub struct GoogleSheetsClient {
    client: reqwest::Client,
    spreadsheet_key: String,
    credential: Credential,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheetsClient {
    pub fn new(spreadsheet_key: impl Into<String>, credential: Credential) -> Result<Self, DataManagerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| DataManagerError::Configuration(format!("Failed to create HTTP client: {err}")))?;

        Ok(Self {
            client,
            spreadsheet_key: spreadsheet_key.into(),
            credential,
        })
    }

    fn values_url(&self, worksheet: &str) -> Result<Url, DataManagerError> {
        let mut url = Url::parse(SPREADSHEETS_URL)
            .map_err(|err| DataManagerError::Configuration(format!("Invalid Sheets API url: {err}")))?;

        url.path_segments_mut()
            .map_err(|_| DataManagerError::Configuration("Sheets API url cannot be a base".to_string()))?
            .extend([self.spreadsheet_key.as_str(), "values", worksheet]);

        Ok(url)
    }
}

impl SheetSource for GoogleSheetsClient {
    async fn fetch_worksheet(&self, title: &str) -> Result<Worksheet, DataManagerError> {
        let fetch_error = |reason: String| DataManagerError::Fetch {
            worksheet: title.to_string(),
            reason,
        };

        let request = self.client.get(self.values_url(title)?);
        let request = match &self.credential {
            Credential::ApiKey(key) => request.query(&[("key", key)]),
            Credential::AccessToken(token) => request.bearer_auth(token),
        };

        let response = request.send().await.map_err(|err| fetch_error(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("upstream answered {status}")));
        }

        let range: ValueRange = response.json().await.map_err(|err| fetch_error(format!("unreadable body: {err}")))?;
        tracing::debug!("Fetched {} rows from worksheet {}", range.values.len(), title);

        Ok(Worksheet::from_values(title, range.values.into_iter().map(|row| row.into_iter().map(cell_text).collect()).collect()))
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
