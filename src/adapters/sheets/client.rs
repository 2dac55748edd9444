//! Google Sheets v4 REST client
//!
//! Reads worksheet values by stable worksheet id. The Sheets API addresses
//! ranges by title, so every read first resolves the `gid` to the worksheet's
//! current title.

use super::models::{SpreadsheetMetadata, ValueRange};
use super::traits::SpreadsheetService;
use crate::config::SheetsConfig;
use crate::domain::ids::WorksheetId;
use crate::domain::{Result, Row, SpreadsheetError, SyncError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Google Sheets client
///
/// # Example
///
/// ```no_run
/// use sheetsync::adapters::sheets::{GoogleSheetsClient, SpreadsheetService};
/// use sheetsync::config::SheetsConfig;
/// use sheetsync::domain::WorksheetId;
///
/// # async fn example() -> sheetsync::domain::Result<()> {
/// let client = GoogleSheetsClient::new(SheetsConfig::default())?;
/// let rows = client
///     .get_all_values(
///         "https://docs.google.com/spreadsheets/d/1AbC/edit#gid=0",
///         WorksheetId::new(0),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GoogleSheetsClient {
    /// HTTP client for making requests
    client: Client,

    /// Sheets configuration
    config: SheetsConfig,
}

impl GoogleSheetsClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SyncError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Build `{base}/spreadsheets/{key}[/values/{range}]` with encoded path segments
    fn endpoint(&self, key: &str, range: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            SyncError::Configuration(format!(
                "Invalid sheets.base_url '{}': {e}",
                self.config.base_url
            ))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SyncError::Configuration(format!(
                    "sheets.base_url '{}' cannot be a base URL",
                    self.config.base_url
                ))
            })?;
            segments.pop_if_empty().push("spreadsheets").push(key);
            if let Some(range) = range {
                segments.push("values").push(range);
            }
        }

        Ok(url)
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transient failures are retried; 4xx responses fail immediately.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= retry.max_retries || !is_retryable(&e) {
                        return Err(e);
                    }

                    let delay_ms = retry.initial_delay_ms
                        * (retry.backoff_multiplier.powf((attempt - 1) as f64) as u64);
                    let delay_ms = delay_ms.min(retry.max_delay_ms);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = retry.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying spreadsheet request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        self.retry_request(|| async {
            let response = self
                .authorize(self.client.get(url.clone()))
                .send()
                .await
                .map_err(map_transport_error)?;

            let response = check_status(response).await?;

            response.json::<T>().await.map_err(|e| {
                SyncError::Spreadsheet(SpreadsheetError::InvalidResponse(e.to_string()))
            })
        })
        .await
    }

    /// Resolve a worksheet id to its current title
    async fn worksheet_title(&self, key: &str, worksheet_id: WorksheetId) -> Result<String> {
        let mut url = self.endpoint(key, None)?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");

        let metadata: SpreadsheetMetadata = self.get_json(&url).await?;

        metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .find(|properties| properties.sheet_id == worksheet_id.value())
            .map(|properties| properties.title)
            .ok_or_else(|| {
                SyncError::Spreadsheet(SpreadsheetError::WorksheetNotFound(format!(
                    "no worksheet with id {worksheet_id} in spreadsheet {key}"
                )))
            })
    }

    async fn get_range(&self, key: &str, range: &str) -> Result<Vec<Row>> {
        let url = self.endpoint(key, Some(range))?;
        let values: ValueRange = self.get_json(&url).await?;
        Ok(values.into_rows())
    }
}

#[async_trait]
impl SpreadsheetService for GoogleSheetsClient {
    async fn get_all_values(
        &self,
        spreadsheet_url: &str,
        worksheet_id: WorksheetId,
    ) -> Result<Vec<Row>> {
        let key = spreadsheet_key(spreadsheet_url)?;
        let title = self.worksheet_title(&key, worksheet_id).await?;

        let rows = self.get_range(&key, &quote_title(&title)).await?;

        tracing::debug!(
            spreadsheet = %key,
            worksheet_id = %worksheet_id,
            rows = rows.len(),
            "Fetched worksheet values"
        );

        Ok(rows)
    }

    async fn get_header_row(&self, spreadsheet_url: &str, worksheet_id: WorksheetId) -> Result<Row> {
        let key = spreadsheet_key(spreadsheet_url)?;
        let title = self.worksheet_title(&key, worksheet_id).await?;

        let range = format!("{}!1:1", quote_title(&title));
        let rows = self.get_range(&key, &range).await?;

        Ok(rows.into_iter().next().unwrap_or_default())
    }
}

/// Extract the spreadsheet key from a spreadsheet URL
///
/// Accepts `https://docs.google.com/spreadsheets/d/{key}/...` or a bare key.
pub fn spreadsheet_key(spreadsheet_url: &str) -> Result<String> {
    let invalid = || {
        SyncError::Spreadsheet(SpreadsheetError::InvalidUrl(spreadsheet_url.to_string()))
    };

    let trimmed = spreadsheet_url.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if !trimmed.contains("://") {
        let is_key = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        return if is_key { Ok(trimmed.to_string()) } else { Err(invalid()) };
    }

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    let segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();

    segments
        .windows(3)
        .find(|w| w[0] == "spreadsheets" && w[1] == "d" && !w[2].is_empty())
        .map(|w| w[2].to_string())
        .ok_or_else(invalid)
}

/// Quote a worksheet title for A1 notation
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn map_transport_error(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::Spreadsheet(SpreadsheetError::Timeout(e.to_string()))
    } else {
        SyncError::Spreadsheet(SpreadsheetError::ConnectionFailed(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let message = response.text().await.unwrap_or_default();

    let err = if status.is_server_error() {
        SpreadsheetError::ServerError {
            status: code,
            message,
        }
    } else {
        SpreadsheetError::ClientError {
            status: code,
            message,
        }
    };

    Err(SyncError::Spreadsheet(err))
}

fn is_retryable(err: &SyncError) -> bool {
    match err {
        SyncError::Spreadsheet(SpreadsheetError::ConnectionFailed(_))
        | SyncError::Spreadsheet(SpreadsheetError::Timeout(_))
        | SyncError::Spreadsheet(SpreadsheetError::ServerError { .. }) => true,
        SyncError::Spreadsheet(SpreadsheetError::ClientError { status, .. }) => *status == 429,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, RetryConfig};

    const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1AbC-key_9/edit#gid=1523";

    fn test_config(base_url: String) -> SheetsConfig {
        SheetsConfig {
            base_url,
            access_token: Some(secret_string("token-123".to_string())),
            timeout_seconds: 5,
            retry: RetryConfig {
                max_retries: 2,
                initial_delay_ms: 1,
                max_delay_ms: 5,
                backoff_multiplier: 1.0,
            },
        }
    }

    const METADATA: &str = r#"{"sheets":[
        {"properties":{"sheetId":0,"title":"Sheet1"}},
        {"properties":{"sheetId":1523,"title":"Orders"}}
    ]}"#;

    #[test]
    fn test_spreadsheet_key_from_url() {
        assert_eq!(spreadsheet_key(SHEET_URL).unwrap(), "1AbC-key_9");
        assert_eq!(
            spreadsheet_key("https://docs.google.com/spreadsheets/u/1/d/XyZ/edit").unwrap(),
            "XyZ"
        );
    }

    #[test]
    fn test_spreadsheet_key_bare() {
        assert_eq!(spreadsheet_key("1AbC-key_9").unwrap(), "1AbC-key_9");
    }

    #[test]
    fn test_spreadsheet_key_invalid() {
        assert!(spreadsheet_key("").is_err());
        assert!(spreadsheet_key("https://example.com/not/a/sheet").is_err());
        assert!(spreadsheet_key("has spaces").is_err());
    }

    #[test]
    fn test_quote_title() {
        assert_eq!(quote_title("Orders"), "'Orders'");
        assert_eq!(quote_title("Bob's sheet"), "'Bob''s sheet'");
    }

    #[tokio::test]
    async fn test_get_all_values() {
        let mut server = mockito::Server::new_async().await;

        let meta = server
            .mock("GET", "/spreadsheets/1AbC-key_9")
            .match_query(mockito::Matcher::UrlEncoded(
                "fields".into(),
                "sheets.properties".into(),
            ))
            .match_header("authorization", "Bearer token-123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(METADATA)
            .create_async()
            .await;

        let values = server
            .mock("GET", "/spreadsheets/1AbC-key_9/values/'Orders'")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"values":[["ID","Name"],["1","Alice"],["2"]]}"#)
            .create_async()
            .await;

        let client = GoogleSheetsClient::new(test_config(server.url())).unwrap();
        let rows = client
            .get_all_values(SHEET_URL, WorksheetId::new(1523))
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec!["2", ""]);
        meta.assert_async().await;
        values.assert_async().await;
    }

    #[tokio::test]
    async fn test_worksheet_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/spreadsheets/1AbC-key_9")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(METADATA)
            .create_async()
            .await;

        let client = GoogleSheetsClient::new(test_config(server.url())).unwrap();
        let err = client
            .get_all_values(SHEET_URL, WorksheetId::new(42))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SyncError::Spreadsheet(SpreadsheetError::WorksheetNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_client_error_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let meta = server
            .mock("GET", "/spreadsheets/1AbC-key_9")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .with_body("forbidden")
            .expect(1)
            .create_async()
            .await;

        let client = GoogleSheetsClient::new(test_config(server.url())).unwrap();
        let err = client
            .get_header_row(SHEET_URL, WorksheetId::new(0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SyncError::Spreadsheet(SpreadsheetError::ClientError { status: 403, .. })
        ));
        meta.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_retried() {
        let mut server = mockito::Server::new_async().await;
        let meta = server
            .mock("GET", "/spreadsheets/1AbC-key_9")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let client = GoogleSheetsClient::new(test_config(server.url())).unwrap();
        let err = client
            .get_all_values(SHEET_URL, WorksheetId::new(0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SyncError::Spreadsheet(SpreadsheetError::ServerError { status: 503, .. })
        ));
        meta.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_request() {
        let client = GoogleSheetsClient::new(test_config("http://127.0.0.1:9".to_string())).unwrap();
        let err = client
            .get_all_values("not a url", WorksheetId::new(0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SyncError::Spreadsheet(SpreadsheetError::InvalidUrl(_))
        ));
    }
}
