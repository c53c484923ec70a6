use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::STORE_REQUEST_TIMEOUT_SECS;

use super::{RowStore, StoreError};

/// Google Sheets v4 `values` API client
///
/// Speaks only the two operations the registration flow needs: read a
/// column range and append a row. The bearer token comes from
/// configuration; token acquisition belongs to the deployment, not this
/// service.
pub struct SheetsClient {
    http: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    token: String,
}

/// Subset of the `values.get` response body
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsClient {
    pub fn new(api_base: &str, spreadsheet_id: &str, token: &str) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(STORE_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
        })
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        // Range names carry '!' and ':', which must not be eaten by the path
        format!(
            "{}/v4/spreadsheets/{}/values/{}{}",
            self.api_base,
            self.spreadsheet_id,
            urlencoding::encode(range),
            suffix
        )
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        tracing::warn!("Row store returned {}: {}", status, message);
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RowStore for SheetsClient {
    async fn read_column(&self, range: &str) -> Result<Vec<String>, StoreError> {
        let url = self.values_url(range, "");
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let body: ValueRange = Self::check_status(response).await?.json().await?;

        // Row-major response over a single-column range: each row carries at
        // most one cell. Cells may come back as numbers, so stringify.
        let cells = body
            .values
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .map(|cell| match cell {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();

        Ok(cells)
    }

    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<(), StoreError> {
        let url = self.values_url(range, ":append");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [row] }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}
