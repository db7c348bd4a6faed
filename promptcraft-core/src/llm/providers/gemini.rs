use crate::config::constants::{defaults, models};
use crate::gemini::{Client, ClientConfig, ClientError, GenerateContentRequest};
use crate::llm::provider::{LLMError, LLMProvider, LLMRequest, LLMResponse};
use async_trait::async_trait;

pub struct GeminiProvider {
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Result<Self, LLMError> {
        Self::with_config(api_key, ClientConfig::default())
    }

    pub fn with_config(api_key: String, config: ClientConfig) -> Result<Self, LLMError> {
        let client = Client::with_config(api_key, config).map_err(LLMError::from)?;
        Ok(Self { client })
    }
}

impl From<ClientError> for LLMError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, message } if (400..500).contains(&status) => {
                LLMError::InvalidRequest {
                    status: Some(status),
                    message,
                }
            }
            ClientError::Status { status, message } => LLMError::Provider { status, message },
            ClientError::Decode(message) => LLMError::InvalidResponse(message),
            ClientError::Build(message) | ClientError::Network(message) => {
                LLMError::Network(message)
            }
            ClientError::Timeout(message) => LLMError::Network(format!("timeout: {message}")),
        }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &str {
        defaults::DEFAULT_PROVIDER
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;

        let gemini_request = GenerateContentRequest::user_prompt(&request.document, request.temperature);
        let response = self.client.generate(&request.model, &gemini_request).await?;

        if let Some(usage) = &response.usage_metadata {
            tracing::debug!(model = %request.model, %usage, "token usage");
        }

        let finish_reason = response
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.clone());

        let content = response.text().ok_or_else(|| {
            let reason = finish_reason
                .clone()
                .or_else(|| {
                    response
                        .prompt_feedback
                        .as_ref()
                        .map(|feedback| feedback.to_string())
                })
                .unwrap_or_else(|| "no candidates".to_string());
            LLMError::InvalidResponse(format!("response contained no text ({reason})"))
        })?;

        Ok(LLMResponse {
            content,
            finish_reason,
        })
    }

    fn supported_models(&self) -> Vec<String> {
        models::google::SUPPORTED_MODELS
            .iter()
            .map(|model| model.to_string())
            .collect()
    }
}
