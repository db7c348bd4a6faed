//! End-to-end generation flow
//!
//! validate -> sanitize -> resolve context -> compose -> wait for slot ->
//! call provider -> record call -> update history.
//!
//! History and the latest output change only on success. Every completed
//! outbound call, successful or not, consumes a rate-limit slot.

use crate::config::constants::{defaults, session as session_limits};
use crate::context::ContextSource;
use crate::error::{GenerationError, GenerationWarning};
use crate::llm::{LLMProvider, LLMRequest};
use crate::prompts::{Sanitized, compose, sanitize};
use crate::session::{HistoryEntry, Session};
use crate::techniques::TechniqueConfig;
use std::sync::Arc;

/// Everything needed for one generation besides the session
#[derive(Debug, Clone)]
pub struct EnhanceRequest {
    pub raw_task: String,
    pub config: TechniqueConfig,
    pub role_persona: String,
    pub tone_style: String,
    pub context: ContextSource,
    pub model: String,
    pub temperature: f32,
}

impl EnhanceRequest {
    /// Request with default persona, tone, model and temperature
    pub fn new(raw_task: impl Into<String>, config: TechniqueConfig) -> Self {
        Self {
            raw_task: raw_task.into(),
            config,
            role_persona: defaults::DEFAULT_ROLE_PERSONA.to_string(),
            tone_style: defaults::DEFAULT_TONE_STYLE.to_string(),
            context: ContextSource::None,
            model: defaults::DEFAULT_MODEL.to_string(),
            temperature: defaults::DEFAULT_TEMPERATURE,
        }
    }
}

/// A successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub text: String,
    /// The document that was sent
    pub document: String,
    pub model: String,
    pub temperature: f32,
    pub warnings: Vec<GenerationWarning>,
}

/// Outcome of one variation
#[derive(Debug, Clone, PartialEq)]
pub struct VariationOutcome {
    pub temperature: f32,
    pub result: Result<Generated, GenerationError>,
}

/// Input after validation, sanitizing and composition
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPrompt {
    pub task: String,
    /// Context text the document was composed with
    pub context_text: String,
    pub document: String,
    pub warnings: Vec<GenerationWarning>,
}

fn sanitize_task(raw_task: &str, max_input_length: usize) -> Result<Sanitized, GenerationError> {
    let sanitized = sanitize(raw_task, max_input_length);
    // Also rejects input made only of null characters.
    if raw_task.trim().is_empty() || sanitized.text.is_empty() {
        return Err(GenerationError::validation(
            "Please enter some raw input to enhance.",
        ));
    }
    Ok(sanitized)
}

/// Validate, sanitize and compose without calling the service
pub async fn prepare_prompt(
    request: &EnhanceRequest,
    max_input_length: usize,
) -> Result<PreparedPrompt, GenerationError> {
    let sanitized = sanitize_task(&request.raw_task, max_input_length)?;

    let mut warnings = Vec::new();
    if sanitized.truncated {
        tracing::warn!(max_length = max_input_length, "input truncated");
        warnings.push(GenerationWarning::InputTruncated {
            max_length: max_input_length,
        });
    }

    let context = request.context.resolve().await;
    warnings.extend(context.warning);

    let document = compose(
        &sanitized.text,
        &request.config,
        &request.role_persona,
        &request.tone_style,
        &context.text,
    );

    Ok(PreparedPrompt {
        task: sanitized.text,
        context_text: context.text,
        document,
        warnings,
    })
}

pub struct PromptEnhancer {
    provider: Arc<dyn LLMProvider>,
    max_input_length: usize,
}

impl PromptEnhancer {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            max_input_length: defaults::DEFAULT_MAX_INPUT_LENGTH,
        }
    }

    pub fn with_max_input_length(mut self, max_input_length: usize) -> Self {
        self.max_input_length = max_input_length;
        self
    }

    /// Validate, sanitize and compose without calling the service
    pub async fn prepare(&self, request: &EnhanceRequest) -> Result<PreparedPrompt, GenerationError> {
        prepare_prompt(request, self.max_input_length).await
    }

    /// Run one generation at the request's temperature
    pub async fn generate(
        &self,
        session: &mut Session,
        request: &EnhanceRequest,
    ) -> Result<Generated, GenerationError> {
        let prepared = self.prepare(request).await?;
        self.call(session, request, prepared, request.temperature)
            .await
    }

    /// Run the full pipeline once per variation temperature, sequentially.
    ///
    /// An empty task fails once up front; after that each variation is
    /// recomposed and succeeds or fails on its own.
    pub async fn generate_variations(
        &self,
        session: &mut Session,
        request: &EnhanceRequest,
    ) -> Result<Vec<VariationOutcome>, GenerationError> {
        sanitize_task(&request.raw_task, self.max_input_length)?;

        let mut outcomes = Vec::with_capacity(session_limits::VARIATION_TEMPERATURES.len());
        for temperature in session_limits::VARIATION_TEMPERATURES {
            let result = match self.prepare(request).await {
                Ok(prepared) => self.call(session, request, prepared, temperature).await,
                Err(err) => Err(err),
            };
            outcomes.push(VariationOutcome {
                temperature,
                result,
            });
        }
        Ok(outcomes)
    }

    async fn call(
        &self,
        session: &mut Session,
        request: &EnhanceRequest,
        prepared: PreparedPrompt,
        temperature: f32,
    ) -> Result<Generated, GenerationError> {
        if !(defaults::MIN_TEMPERATURE..=defaults::MAX_TEMPERATURE).contains(&temperature) {
            return Err(GenerationError::validation(format!(
                "Temperature must be between {} and {}",
                defaults::MIN_TEMPERATURE,
                defaults::MAX_TEMPERATURE
            )));
        }

        session.rate_limiter.await_slot().await;

        tracing::info!(
            provider = self.provider.name(),
            model = %request.model,
            temperature,
            "API call"
        );

        let outcome = self
            .provider
            .generate(LLMRequest {
                model: request.model.clone(),
                document: prepared.document.clone(),
                temperature,
            })
            .await;

        session.rate_limiter.record_call();

        match outcome {
            Ok(response) => {
                session.history.push(HistoryEntry {
                    input: prepared.task,
                    output: response.content.clone(),
                    model: request.model.clone(),
                    techniques: request.config.active_keys(),
                    temperature,
                });
                session.set_latest_output(response.content.clone());
                tracing::info!(model = %request.model, temperature, "Successfully generated prompt");

                Ok(Generated {
                    text: response.content,
                    document: prepared.document,
                    model: request.model.clone(),
                    temperature,
                    warnings: prepared.warnings,
                })
            }
            Err(err) => {
                tracing::error!(model = %request.model, temperature, error = %err, "API call failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LLMError, LLMResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records requests and answers from a script of results
    #[derive(Default)]
    struct ScriptedProvider {
        requests: Mutex<Vec<LLMRequest>>,
        failures: Mutex<Vec<Option<LLMError>>>,
    }

    impl ScriptedProvider {
        fn failing_with(failures: Vec<Option<LLMError>>) -> Self {
            Self {
                requests: Mutex::default(),
                failures: Mutex::new(failures),
            }
        }

        fn calls(&self) -> Vec<LLMRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
            let temperature = request.temperature;
            self.requests.lock().unwrap().push(request);
            let mut failures = self.failures.lock().unwrap();
            let failure = if failures.is_empty() {
                None
            } else {
                failures.remove(0)
            };
            match failure {
                Some(err) => Err(err),
                None => Ok(LLMResponse {
                    content: format!("enhanced at {temperature}"),
                    finish_reason: Some("STOP".into()),
                }),
            }
        }

        fn supported_models(&self) -> Vec<String> {
            vec![defaults::DEFAULT_MODEL.to_string()]
        }
    }

    fn tagline_request() -> EnhanceRequest {
        let mut request = EnhanceRequest::new(
            "Write a tagline",
            TechniqueConfig {
                role: true,
                format: true,
                format_details: "bullet points".into(),
                ..Default::default()
            },
        );
        request.role_persona = "A branding expert".into();
        request.tone_style = "Playful".into();
        request
    }

    fn setup(provider: ScriptedProvider) -> (Arc<ScriptedProvider>, PromptEnhancer, Session) {
        let provider = Arc::new(provider);
        let enhancer = PromptEnhancer::new(provider.clone());
        let session = Session::with_min_interval(Duration::from_secs(1));
        (provider, enhancer, session)
    }

    #[tokio::test(start_paused = true)]
    async fn empty_task_is_rejected_without_calls() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::default());
        let mut request = tagline_request();
        request.raw_task = "   \n".into();

        let err = enhancer.generate(&mut session, &request).await.unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
        assert!(provider.calls().is_empty());
        assert!(session.history.is_empty());
        assert!(session.rate_limiter.last_call().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn success_records_history_and_latest_output() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::default());

        let generated = enhancer
            .generate(&mut session, &tagline_request())
            .await
            .unwrap();

        assert_eq!(generated.text, "enhanced at 1");
        assert!(generated.document.contains("**ROLE/EXPERTISE:** A branding expert"));
        assert_eq!(provider.calls().len(), 1);
        assert_eq!(provider.calls()[0].document, generated.document);

        let entry = session.history.latest().unwrap();
        assert_eq!(entry.input, "Write a tagline");
        assert_eq!(entry.output, "enhanced at 1");
        assert_eq!(entry.model, defaults::DEFAULT_MODEL);
        assert_eq!(entry.techniques, vec!["role", "format"]);
        assert_eq!(session.latest_output(), Some("enhanced at 1"));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_leaves_history_untouched_but_consumes_slot() {
        let (_provider, enhancer, mut session) =
            setup(ScriptedProvider::failing_with(vec![Some(LLMError::InvalidRequest {
                status: Some(400),
                message: "API key not valid".into(),
            })]));

        let err = enhancer
            .generate(&mut session, &tagline_request())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::Client {
                status: Some(400),
                message: "API key not valid".into()
            }
        );
        assert!(session.history.is_empty());
        assert!(session.latest_output().is_none());
        assert!(session.rate_limiter.last_call().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn server_failure_is_unclassified() {
        let (_provider, enhancer, mut session) =
            setup(ScriptedProvider::failing_with(vec![Some(LLMError::Network(
                "connection reset".into(),
            ))]));

        let err = enhancer
            .generate(&mut session, &tagline_request())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Unclassified { .. }));
        assert!(err.detail().unwrap().contains("connection reset"));
    }

    #[tokio::test(start_paused = true)]
    async fn truncation_is_reported_as_warning() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::default());
        let enhancer = enhancer.with_max_input_length(5);
        let mut request = tagline_request();
        request.raw_task = "abcdefghij".into();

        let generated = enhancer.generate(&mut session, &request).await.unwrap();
        assert_eq!(
            generated.warnings,
            vec![GenerationWarning::InputTruncated { max_length: 5 }]
        );
        assert!(provider.calls()[0].document.contains("**TASK:**\nabcde\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn unreadable_context_still_generates() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::default());
        let mut request = tagline_request();
        request.config.context = true;
        request.context = ContextSource::Bytes(vec![0xc3, 0x28]);

        let generated = enhancer.generate(&mut session, &request).await.unwrap();
        assert!(matches!(
            generated.warnings.as_slice(),
            [GenerationWarning::ContextUnreadable { .. }]
        ));
        assert!(provider.calls()[0].document.contains("Error reading context file."));
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_generations_respect_min_interval() {
        let (_provider, enhancer, mut session) = setup(ScriptedProvider::default());

        enhancer.generate(&mut session, &tagline_request()).await.unwrap();
        let first = session.rate_limiter.last_call().unwrap();
        enhancer.generate(&mut session, &tagline_request()).await.unwrap();
        let second = session.rate_limiter.last_call().unwrap();

        assert!(second - first >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn variations_use_three_temperatures_in_order() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::default());

        let outcomes = enhancer
            .generate_variations(&mut session, &tagline_request())
            .await
            .unwrap();

        let temperatures: Vec<f32> = provider.calls().iter().map(|r| r.temperature).collect();
        assert_eq!(temperatures, vec![0.7, 1.0, 1.5]);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        assert_eq!(session.history.len(), 3);
        assert_eq!(session.history.latest().unwrap().temperature, 1.5);
    }

    #[tokio::test(start_paused = true)]
    async fn a_failed_variation_does_not_stop_the_rest() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::failing_with(vec![
            None,
            Some(LLMError::Provider {
                status: 500,
                message: "boom".into(),
            }),
            None,
        ]));

        let outcomes = enhancer
            .generate_variations(&mut session, &tagline_request())
            .await
            .unwrap();

        assert_eq!(provider.calls().len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
        assert_eq!(session.history.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn variations_reject_empty_task_once() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::default());
        let mut request = tagline_request();
        request.raw_task = String::new();

        let err = enhancer
            .generate_variations(&mut session, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
        assert!(provider.calls().is_empty());
    }

    /// Rewrites the context file after every call
    struct RewritingProvider {
        path: std::path::PathBuf,
        documents: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LLMProvider for RewritingProvider {
        fn name(&self) -> &str {
            "rewriting"
        }

        async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
            let mut documents = self.documents.lock().unwrap();
            documents.push(request.document);
            std::fs::write(&self.path, format!("notes v{}", documents.len() + 1)).unwrap();
            Ok(LLMResponse {
                content: "ok".into(),
                finish_reason: None,
            })
        }

        fn supported_models(&self) -> Vec<String> {
            vec![defaults::DEFAULT_MODEL.to_string()]
        }
    }

    #[tokio::test]
    async fn each_variation_recomposes_from_current_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "notes v1").unwrap();

        let provider = Arc::new(RewritingProvider {
            path: path.clone(),
            documents: Mutex::default(),
        });
        let enhancer = PromptEnhancer::new(provider.clone());
        let mut session = Session::with_min_interval(Duration::ZERO);
        let mut request = tagline_request();
        request.config.context = true;
        request.context = ContextSource::File(path);

        let outcomes = enhancer
            .generate_variations(&mut session, &request)
            .await
            .unwrap();

        assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
        let documents = provider.documents.lock().unwrap();
        assert_eq!(documents.len(), 3);
        for (index, document) in documents.iter().enumerate() {
            assert!(document.contains(&format!("**CONTEXT:**\nnotes v{}", index + 1)));
        }
    }

    #[tokio::test]
    async fn prepared_prompt_keeps_the_context_it_was_composed_with() {
        let mut request = tagline_request();
        request.config.context = true;
        request.context = ContextSource::Text("Q3 launch notes".into());

        let prepared = prepare_prompt(&request, defaults::DEFAULT_MAX_INPUT_LENGTH)
            .await
            .unwrap();
        assert_eq!(prepared.context_text, "Q3 launch notes");
        assert!(crate::prompts::sections(&request.config, &prepared.context_text)
            .contains(&crate::prompts::Section::Context));

        request.context = ContextSource::Bytes(vec![0xff]);
        let prepared = prepare_prompt(&request, defaults::DEFAULT_MAX_INPUT_LENGTH)
            .await
            .unwrap();
        assert_eq!(prepared.context_text, "Error reading context file.");
        assert_eq!(prepared.warnings.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_temperature_is_a_validation_error() {
        let (provider, enhancer, mut session) = setup(ScriptedProvider::default());
        let mut request = tagline_request();
        request.temperature = 2.5;

        let err = enhancer.generate(&mut session, &request).await.unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
        assert!(provider.calls().is_empty());
    }
}
