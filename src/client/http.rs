//! `reqwest` implementation of [`AssetApi`].

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::AssetApi;
use crate::config::ClientConfig;
use crate::domain::{
    Asset, AssetAttributes, AssetId, AssetUpdate, HistoryEntry, MaintenanceRecord,
    NewMaintenanceRecord,
};
use crate::error::{ClientError, ErrorResponse};

/// Asset API client over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpAssetApi {
    client: Client,
    base_url: String,
}

impl HttpAssetApi {
    /// Creates a client with the configured base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }
}

/// Decodes a successful JSON body, or maps an error response.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(error_from(response).await)
    }
}

/// Maps a non-success response to a [`ClientError`], preferring the
/// message of a structured error body.
async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => body.error.message,
        Err(_) if text.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
        Err(_) => text,
    };
    tracing::debug!(status = status.as_u16(), %message, "asset api error response");
    ClientError::from_status(status.as_u16(), message)
}

impl AssetApi for HttpAssetApi {
    async fn get_asset(&self, id: AssetId) -> Result<Asset, ClientError> {
        let response = self.client.get(self.url(&format!("/assets/{id}"))).send().await?;
        decode(response).await
    }

    async fn list_assets(&self) -> Result<Vec<Asset>, ClientError> {
        let response = self.client.get(self.url("/assets")).send().await?;
        decode(response).await
    }

    async fn register_asset(&self, attributes: &AssetAttributes) -> Result<Asset, ClientError> {
        let response = self
            .client
            .post(self.url("/assets"))
            .json(attributes)
            .send()
            .await?;
        decode(response).await
    }

    async fn update_asset(
        &self,
        id: AssetId,
        expected_version: u64,
        attributes: &AssetAttributes,
    ) -> Result<Asset, ClientError> {
        let body = AssetUpdate {
            expected_version,
            asset: attributes.clone(),
        };
        let response = self
            .client
            .put(self.url(&format!("/assets/{id}")))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_asset(&self, id: AssetId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/assets/{id}")))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    async fn list_maintenance(&self, id: AssetId) -> Result<Vec<MaintenanceRecord>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/assets/{id}/maintenances")))
            .send()
            .await?;
        decode(response).await
    }

    async fn create_maintenance(
        &self,
        id: AssetId,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/assets/{id}/maintenances")))
            .json(record)
            .send()
            .await?;
        decode(response).await
    }

    async fn list_history(&self, id: AssetId) -> Result<Vec<HistoryEntry>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/assets/{id}/history")))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from(response).await);
        }
        let body = response.bytes().await?;
        HistoryEntry::from_response(&body).map_err(|e| ClientError::Server {
            status: status.as_u16(),
            message: format!("malformed response: {e}"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn builds_versioned_urls() {
        let config = ClientConfig::default().with_base_url("http://parks.example/");
        let Ok(api) = HttpAssetApi::new(&config) else {
            panic!("client should build");
        };
        assert_eq!(api.base_url(), "http://parks.example");
        assert_eq!(api.url("/assets/3"), "http://parks.example/api/v1/assets/3");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        // Port 9 (discard) on loopback is closed on test machines.
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(2),
            notification_capacity: 8,
        };
        let Ok(api) = HttpAssetApi::new(&config) else {
            panic!("client should build");
        };
        let Err(err) = api.get_asset(AssetId::new(1)).await else {
            panic!("request must fail");
        };
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn server_side_timeout_is_a_retryable_network_error() {
        use axum::Router;
        use axum::http::StatusCode;
        use axum::routing::get;
        use tower_http::timeout::TimeoutLayer;

        let slow = Router::new()
            .route(
                "/api/v1/assets/{id}",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    "{}"
                }),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(100),
            ));
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, slow).await;
        });

        let config = ClientConfig::default().with_base_url(format!("http://{addr}"));
        let Ok(api) = HttpAssetApi::new(&config) else {
            panic!("client should build");
        };
        let Err(err) = api.get_asset(AssetId::new(1)).await else {
            panic!("request must time out");
        };
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
    }
}
