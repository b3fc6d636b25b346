//! HTTP client for a networked furnace sensor.
//!
//! The sensor exposes a single endpoint, `GET /current_temperature`, that
//! answers `{"temperature": <number>}`. The furnace service in this workspace
//! serves the same shape, so a client can point at either.
//!
//! # Example
//!
//! ```no_run
//! use furnace_core::SensorClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SensorClient::new("http://192.168.1.40:8080")?;
//! let reading = client.current_temperature().await?;
//! println!("Furnace at {:.1} °C", reading.temperature);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::{TemperatureSource, positive_or_none};

/// Request timeout used by [`SensorClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the temperature endpoint, relative to the base URL.
pub const CURRENT_TEMPERATURE_PATH: &str = "/current_temperature";

/// Body of a successful temperature response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResponse {
    pub temperature: f64,
}

/// HTTP client for the sensor endpoint.
#[derive(Debug, Clone)]
pub struct SensorClient {
    client: Client,
    base_url: String,
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let base_url = base_url.trim().trim_end_matches('/').to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }

    Ok(base_url)
}

impl SensorClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the sensor host (e.g., "http://localhost:8080")
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(Error::Request)?;

        Ok(Self { client, base_url })
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw temperature response.
    pub async fn current_temperature(&self) -> Result<TemperatureResponse> {
        let url = format!("{}{}", self.base_url, CURRENT_TEMPERATURE_PATH);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| status.to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl TemperatureSource for SensorClient {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn read_temperature(&self) -> Result<Option<f64>> {
        let response = self.current_temperature().await?;
        Ok(positive_or_none(response.temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_client_creation() {
        let client = SensorClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_invalid_url() {
        let result = SensorClient::new("localhost:8080");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_reads_temperature() {
        let base = serve(Router::new().route(
            CURRENT_TEMPERATURE_PATH,
            get(|| async { Json(TemperatureResponse { temperature: 812.25 }) }),
        ))
        .await;

        let client = SensorClient::new(&base).unwrap();
        assert_eq!(client.read_temperature().await.unwrap(), Some(812.25));
    }

    #[tokio::test]
    async fn test_zero_is_no_data() {
        let base = serve(Router::new().route(
            CURRENT_TEMPERATURE_PATH,
            get(|| async { Json(TemperatureResponse { temperature: 0.0 }) }),
        ))
        .await;

        let client = SensorClient::new(&base).unwrap();
        assert_eq!(client.read_temperature().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let base = serve(Router::new().route(
            CURRENT_TEMPERATURE_PATH,
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({ "error": "probe disconnected" })),
                )
            }),
        ))
        .await;

        let client = SensorClient::new(&base).unwrap();
        match client.read_temperature().await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "probe disconnected");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let base = serve(Router::new().route(
            CURRENT_TEMPERATURE_PATH,
            get(|| async { "hot" }),
        ))
        .await;

        let client = SensorClient::new(&base).unwrap();
        assert!(matches!(
            client.read_temperature().await,
            Err(Error::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SensorClient::new(&format!("http://{}", addr)).unwrap();
        assert!(matches!(
            client.read_temperature().await,
            Err(Error::NotReachable { .. })
        ));
    }
}
