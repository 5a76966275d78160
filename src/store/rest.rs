//! HTTP client for a PostgREST-style hosted record store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{DateWindow, Holiday, Period, WorkShiftRecord};

use super::{ShiftStore, ShiftWrite};

const SHIFTS_TABLE: &str = "work_records";
const HOLIDAYS_TABLE: &str = "holidays";

/// Store client speaking the PostgREST dialect under `{url}/rest/v1/`.
///
/// Loads use inclusive `gte`/`lte` filters on the `date` column. Writes ask
/// for `return=representation` so the stored row comes back in the response.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct InsertRow {
    date: NaiveDate,
    period: Period,
    is_working: bool,
}

#[derive(Serialize)]
struct UpdateRow {
    is_working: bool,
    updated_at: chrono::DateTime<Utc>,
}

impl RestStore {
    /// Builds a client from the store section of the configuration.
    pub fn new(config: &StoreConfig) -> TrackerResult<Self> {
        let base_url = parse_base_url(&config.url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("apikey", header_value("store.api_key", &config.api_key)?);
        headers.insert(
            AUTHORIZATION,
            header_value("store.api_key", &format!("Bearer {}", config.api_key))?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TrackerError::InvalidConfig {
                field: "store".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, base_url })
    }

    /// The endpoint for a collection.
    pub fn table_url(&self, table: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["rest", "v1", table]);
        }
        url
    }

    async fn load_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        window: DateWindow,
    ) -> TrackerResult<Vec<T>> {
        let url = self.table_url(table);
        let request = self.http.get(url.clone()).query(&[
            ("select", "*".to_string()),
            ("date", format!("gte.{}", window.start)),
            ("date", format!("lte.{}", window.end)),
        ]);

        let rows: Vec<T> = send_json(request).await.map_err(|message| {
            warn!(url = %url, error = %message, "Store load failed");
            TrackerError::DataUnavailable {
                resource: table.to_string(),
                message,
            }
        })?;

        debug!(url = %url, rows = rows.len(), "Store load completed");
        Ok(rows)
    }
}

#[async_trait]
impl ShiftStore for RestStore {
    async fn load_shifts(&self, window: DateWindow) -> TrackerResult<Vec<WorkShiftRecord>> {
        self.load_rows(SHIFTS_TABLE, window).await
    }

    async fn load_holidays(&self, window: DateWindow) -> TrackerResult<Vec<Holiday>> {
        self.load_rows(HOLIDAYS_TABLE, window).await
    }

    async fn write_shift(&self, write: ShiftWrite) -> TrackerResult<WorkShiftRecord> {
        let url = self.table_url(SHIFTS_TABLE);
        let request = match &write {
            ShiftWrite::Insert {
                date,
                period,
                is_working,
            } => self.http.post(url.clone()).json(&InsertRow {
                date: *date,
                period: *period,
                is_working: *is_working,
            }),
            ShiftWrite::Update { id, is_working, .. } => self
                .http
                .patch(url.clone())
                .query(&[("id", format!("eq.{}", id))])
                .json(&UpdateRow {
                    is_working: *is_working,
                    updated_at: Utc::now(),
                }),
        }
        .header("Prefer", "return=representation");

        let rejected = |message: String| TrackerError::WriteRejected {
            date: write.date(),
            period: write.period(),
            message,
        };

        let rows: Vec<WorkShiftRecord> = send_json(request).await.map_err(|message| {
            warn!(url = %url, error = %message, "Store write failed");
            rejected(message)
        })?;

        rows.into_iter()
            .next()
            .ok_or_else(|| rejected("store returned no row".to_string()))
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, String> {
    let response = request.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("status {}: {}", status, body));
    }
    response.json::<T>().await.map_err(|e| e.to_string())
}

pub(crate) fn parse_base_url(raw: &str) -> TrackerResult<Url> {
    let url = Url::parse(raw).map_err(|e| TrackerError::InvalidConfig {
        field: "store.url".to_string(),
        message: format!("'{}' is not a valid URL: {}", raw, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TrackerError::InvalidConfig {
            field: "store.url".to_string(),
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn header_value(field: &str, value: &str) -> TrackerResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| TrackerError::InvalidConfig {
        field: field.to_string(),
        message: e.to_string(),
    })
}
