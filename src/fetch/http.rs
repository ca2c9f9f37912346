//! Sheets API fetcher over HTTPS.

use super::api::{SpreadsheetPayload, ValuesPayload};
use super::retry::RetryPolicy;
use super::{FetchMode, Fetcher};
use crate::config::SheetConfig;
use crate::constants::{
    DATE_TIME_RENDER_OPTION, GRID_FIELDS, SHEETS_API_BASE_URL, SHEETS_READONLY_SCOPE,
    VALUE_RENDER_OPTION,
};
use crate::error::{ExportError, Result};
use crate::models::SpreadsheetGrid;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How requests authenticate against the Sheets API
#[derive(Debug, Clone)]
pub enum Credentials {
    /// OAuth2 access token, sent as a bearer token
    AccessToken(String),
    /// API key, sufficient for publicly readable spreadsheets
    ApiKey(String),
    /// Service-account key file, exchanged for a read-only access token
    ServiceAccountFile(PathBuf),
}

/// What each request carries once credentials are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
enum Authorization {
    Bearer(String),
    Key(String),
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    credentials: Credentials,
    retry: RetryPolicy,
    base_url: String,
    mode: FetchMode,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl HttpFetcher {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sheet-export/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            credentials,
            retry: RetryPolicy::default(),
            base_url: SHEETS_API_BASE_URL.to_string(),
            mode: FetchMode::Grid,
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    async fn authorize(&self) -> Result<Authorization> {
        match &self.credentials {
            Credentials::AccessToken(token) => Ok(Authorization::Bearer(token.clone())),
            Credentials::ApiKey(key) => Ok(Authorization::Key(key.clone())),
            Credentials::ServiceAccountFile(path) => {
                service_account_token(path).await.map(Authorization::Bearer)
            }
        }
    }

    async fn fetch_grid(
        &self,
        auth: &Authorization,
        spreadsheet_id: &str,
        sheets: &[SheetConfig],
    ) -> Result<SpreadsheetGrid> {
        let url = format!("{}/{}", self.base_url, spreadsheet_id);
        let mut query = vec![
            ("includeGridData", "true".to_string()),
            ("fields", GRID_FIELDS.join(",")),
        ];
        query.extend(sheets.iter().map(|sheet| ("ranges", sheet.fetch_range())));

        let payload: SpreadsheetPayload = self.get_json(auth, &url, &query).await?;
        Ok(payload.into())
    }

    async fn fetch_values(
        &self,
        auth: &Authorization,
        spreadsheet_id: &str,
        sheets: &[SheetConfig],
    ) -> Result<SpreadsheetGrid> {
        let properties_url = format!("{}/{}", self.base_url, spreadsheet_id);
        let properties: SpreadsheetPayload = self
            .get_json(auth, &properties_url, &[("fields", "properties.timeZone".to_string())])
            .await?;

        let values_url = format!("{}/{}/values:batchGet", self.base_url, spreadsheet_id);
        let mut query = vec![
            ("valueRenderOption", VALUE_RENDER_OPTION.to_string()),
            ("dateTimeRenderOption", DATE_TIME_RENDER_OPTION.to_string()),
        ];
        query.extend(sheets.iter().map(|sheet| ("ranges", sheet.fetch_range())));

        let mut values: ValuesPayload = self.get_json(auth, &values_url, &query).await?;
        values.time_zone = properties.properties.and_then(|p| p.time_zone);
        Ok(values.into())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        auth: &Authorization,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.retry.run(move || self.get_once(auth, url, query)).await
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        auth: &Authorization,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {}", url);

        let request = self.client.get(url).query(query);
        let request = match auth {
            Authorization::Bearer(token) => request.bearer_auth(token),
            Authorization::Key(key) => request.query(&[("key", key)]),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExportError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, spreadsheet_id: &str, sheets: &[SheetConfig]) -> Result<SpreadsheetGrid> {
        let auth = self.authorize().await?;
        match self.mode {
            FetchMode::Grid => self.fetch_grid(&auth, spreadsheet_id, sheets).await,
            FetchMode::ValuesOnly => self.fetch_values(&auth, spreadsheet_id, sheets).await,
        }
    }
}

/// Exchange a service-account key file for a read-only access token
async fn service_account_token(path: &Path) -> Result<String> {
    info!("Authenticating with service account key {}", path.display());

    let key = yup_oauth2::read_service_account_key(path)
        .await
        .map_err(|e| ExportError::io(path, e))?;
    let authenticator = yup_oauth2::ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| ExportError::Auth {
            message: e.to_string(),
        })?;
    let token = authenticator
        .token(&[SHEETS_READONLY_SCOPE])
        .await
        .map_err(|e| ExportError::Auth {
            message: e.to_string(),
        })?;

    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| ExportError::Auth {
            message: "token response carried no access token".to_string(),
        })
}

/// Pull the human-readable message out of a Google API error body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
