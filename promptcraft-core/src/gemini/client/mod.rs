pub mod config;

pub use config::ClientConfig;

use crate::config::constants::headers;
use crate::gemini::models::{GenerateContentRequest, GenerateContentResponse};
use reqwest::Client as ReqwestClient;
use std::time::Instant;

/// Fallback text when an error body carries no message
const DEFAULT_STATUS_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct Client {
    api_key: String,
    http: ReqwestClient,
    config: ClientConfig,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"[REDACTED]")
            .field("config", &self.config)
            .finish()
    }
}

impl Client {
    /// Create a client with custom configuration
    pub fn with_config(api_key: String, config: ClientConfig) -> Result<Self, ClientError> {
        let http = ReqwestClient::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            api_key,
            http,
            config,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }

    /// Generate content with the Gemini API
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ClientError> {
        let start_time = Instant::now();

        let response = self
            .http
            .post(self.endpoint(model))
            .header(headers::GOOG_API_KEY, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body_text = response.text().await.map_err(classify_transport_error)?;

        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "gemini response received"
        );

        if !status.is_success() {
            let message = extract_error_message(&body_text).unwrap_or_else(|| {
                if body_text.trim().is_empty() {
                    DEFAULT_STATUS_MESSAGE.to_string()
                } else {
                    body_text.clone()
                }
            });
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body_text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn classify_transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout(error.to_string())
    } else if error.is_decode() {
        ClientError::Decode(error.to_string())
    } else {
        ClientError::Network(error.to_string())
    }
}

/// Pull `error.message` (or a top-level `message`) out of a JSON error body
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed
        .get("message")
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> Client {
        Client::with_config(
            "test-key".to_string(),
            ClientConfig::default().with_base_url(server.url()),
        )
        .unwrap()
    }

    #[test]
    fn extracts_nested_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("API key not valid."));
        assert_eq!(extract_error_message("plain text"), None);
        assert_eq!(extract_error_message("  "), None);
    }

    #[tokio::test]
    async fn posts_to_model_endpoint_with_api_key_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"ok"}]}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let response = client_for(&server)
            .generate(
                "gemini-2.5-flash",
                &GenerateContentRequest::user_prompt("hi", 1.0),
            )
            .await
            .unwrap();

        assert_eq!(response.text().as_deref(), Some("ok"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_carries_service_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-1.5-pro:generateContent")
            .with_status(403)
            .with_body(r#"{"error":{"message":"Permission denied"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("gemini-1.5-pro", &GenerateContentRequest::user_prompt("hi", 1.0))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ClientError::Status {
                status: 403,
                message: "Permission denied".into()
            }
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("gemini-2.5-flash", &GenerateContentRequest::user_prompt("hi", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
