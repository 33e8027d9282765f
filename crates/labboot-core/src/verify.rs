//! Verify stage: best-effort check that the seed routine took effect.

use crate::config::{BootstrapConfig, TOKEN_ENV};
use crate::error::{BootstrapError, Result};
use serde_json::Value;
use tracing::{info, warn};

/// Queries the inventory's device listing and reports the record count.
///
/// Purely informational: a connect or parse failure is logged and reported
/// as zero, never propagated. The count does not gate the handoff.
#[derive(Debug)]
pub struct Verifier {
    client: reqwest::Client,
    devices_url: String,
    token: String,
}

impl Verifier {
    pub fn new(config: &BootstrapConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .ok_or(BootstrapError::MissingToken(TOKEN_ENV))?;

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("labboot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            devices_url: format!("{}/api/dcim/devices/", config.base_url),
            token,
        })
    }

    /// Fetch the device count, defaulting to zero on any failure.
    pub async fn device_count(&self) -> u64 {
        let response = self
            .client
            .get(&self.devices_url)
            .header("Authorization", format!("Token {}", self.token))
            .send()
            .await;

        let count = match response {
            Ok(response) => match response.json::<Value>().await {
                Ok(body) => body["count"].as_u64().unwrap_or(0),
                Err(e) => {
                    warn!(error = %e, "could not parse device listing, assuming 0");
                    0
                }
            },
            Err(e) => {
                warn!(error = %e, "could not query device listing, assuming 0");
                0
            }
        };

        info!(count, "Found {} devices", count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(base_url: &str) -> BootstrapConfig {
        let mut config = BootstrapConfig::from_env()
            .with_base_url(base_url)
            .with_token("testtoken");
        config.http_timeout = Duration::from_millis(500);
        config
    }

    #[tokio::test]
    async fn test_count_extracted_from_listing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/dcim/devices/")
            .match_header("authorization", "Token testtoken")
            .with_header("content-type", "application/json")
            .with_body(r#"{"count": 7, "results": []}"#)
            .create_async()
            .await;

        let verifier = Verifier::new(&test_config(&server.url())).unwrap();
        assert_eq!(verifier.device_count().await, 7);
    }

    #[tokio::test]
    async fn test_malformed_body_defaults_to_zero() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/dcim/devices/")
            .with_body("not json")
            .create_async()
            .await;

        let verifier = Verifier::new(&test_config(&server.url())).unwrap();
        assert_eq!(verifier.device_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_count_field_defaults_to_zero() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/dcim/devices/")
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await;

        let verifier = Verifier::new(&test_config(&server.url())).unwrap();
        assert_eq!(verifier.device_count().await, 0);
    }

    #[tokio::test]
    async fn test_unreachable_service_defaults_to_zero() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let verifier = Verifier::new(&test_config(&format!("http://{}", addr))).unwrap();
        assert_eq!(verifier.device_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_token_is_config_error() {
        let mut config = BootstrapConfig::from_env();
        config.token = None;
        assert!(matches!(
            Verifier::new(&config).unwrap_err(),
            BootstrapError::MissingToken(_)
        ));
    }
}
