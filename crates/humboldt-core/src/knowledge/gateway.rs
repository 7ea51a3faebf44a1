//! Knowledge query gateway.
//!
//! Turns (prompt, transcript, topic) into one retrieval-and-generation call:
//! resolves the topic's knowledge-base handle, prepends the fixed instruction
//! preamble, attaches the model reference and generation parameters, bounds
//! the call with a timeout, and converts the response citations into
//! markdown reference lines.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{Instrument, debug, info, info_span, warn};

use humboldt_types::citation::QueryResult;
use humboldt_types::config::{CitationConfig, GenerationConfig, RetryConfig};
use humboldt_types::error::RemoteServiceError;
use humboldt_types::knowledge::{GenerationRequest, GenerationResponse};
use humboldt_types::topic::TopicBucket;

use super::client::KnowledgeBaseClient;
use super::retry::RetryHandler;
use crate::citation::collect_references;

/// Instruction text placed ahead of every transcript.
pub const INSTRUCTION_PREAMBLE: &str = "You are a helpful assistant. \
     Always respond in clear, concise sentences. \
     Use the conversation history to understand context. \
     List any references separately after your response.";

/// Everything the gateway needs besides the client itself.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Knowledge-base handle per topic.
    pub knowledge_bases: BTreeMap<TopicBucket, String>,
    /// Foundation-model reference passed with every call.
    pub model_reference: String,
    pub generation: GenerationConfig,
    pub citations: CitationConfig,
    pub retry: RetryConfig,
    pub request_timeout: Duration,
}

/// Sends questions to the knowledge base on behalf of the assistant.
///
/// Owns the injected client for its whole lifetime; the client is never
/// rebuilt per request.
pub struct KnowledgeQueryGateway<C: KnowledgeBaseClient> {
    client: C,
    config: GatewayConfig,
}

impl<C: KnowledgeBaseClient> KnowledgeQueryGateway<C> {
    pub fn new(client: C, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Preamble, blank line, transcript.
    pub fn build_instruction(history: &str) -> String {
        format!("{INSTRUCTION_PREAMBLE}\n\n{history}")
    }

    /// Assemble the outbound request for a topic.
    pub fn build_request(
        &self,
        history: &str,
        bucket: TopicBucket,
    ) -> Result<GenerationRequest, RemoteServiceError> {
        let knowledge_base_id = self
            .config
            .knowledge_bases
            .get(&bucket)
            .ok_or(RemoteServiceError::UnconfiguredTopic(bucket))?;

        Ok(GenerationRequest {
            instruction_text: Self::build_instruction(history),
            knowledge_base_id: knowledge_base_id.clone(),
            model_reference: self.config.model_reference.clone(),
            generation: self.config.generation.clone(),
        })
    }

    /// Ask the knowledge base for `bucket` and format its citations.
    ///
    /// `history` must already end with the `User: <prompt>` line; `prompt`
    /// itself is only used for logging.
    pub async fn query(
        &self,
        prompt: &str,
        history: &str,
        bucket: TopicBucket,
    ) -> Result<QueryResult, RemoteServiceError> {
        let request = self.build_request(history, bucket)?;

        let span = info_span!(
            "gen_ai.retrieve_and_generate",
            gen_ai.system = self.client.name(),
            gen_ai.request.model = %request.model_reference,
            gen_ai.request.max_tokens = request.generation.max_tokens,
            gen_ai.request.temperature = request.generation.temperature,
            gen_ai.request.top_p = request.generation.top_p,
            knowledge_base.topic = %bucket,
        );

        async move {
            debug!(
                prompt_chars = prompt.chars().count(),
                instruction_chars = request.instruction_text.chars().count(),
                "Querying knowledge base"
            );

            let response = self.call_with_retry(&request).await?;
            let group_count = response.citations.len();
            let references = collect_references(&response.citations, &self.config.citations);

            info!(
                citation_groups = group_count,
                references = references.len(),
                "Knowledge base answered"
            );

            Ok(QueryResult {
                answer_text: response.answer_text,
                references,
            })
        }
        .instrument(span)
        .await
    }

    async fn call_with_retry(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, RemoteServiceError> {
        let mut attempt = 1;
        loop {
            match self.call_once(request).await {
                Ok(response) => return Ok(response),
                Err(err) if RetryHandler::should_retry(&self.config.retry, attempt, &err) => {
                    let delay = RetryHandler::backoff(&self.config.retry, attempt);
                    warn!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "Knowledge base call failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "Knowledge base call failed");
                    return Err(err);
                }
            }
        }
    }

    async fn call_once(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, RemoteServiceError> {
        let timeout = self.config.request_timeout;
        match tokio::time::timeout(timeout, self.client.retrieve_and_generate(request)).await {
            Ok(result) => result,
            Err(_) => Err(RemoteServiceError::Timeout(
                timeout.as_millis().div_ceil(1000) as u64,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use humboldt_types::citation::{CitationGroup, RetrievedReference};

    /// Replays scripted results and records every request it receives.
    struct ScriptedClient {
        script: Mutex<VecDeque<Result<GenerationResponse, RemoteServiceError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
        delay: Option<Duration>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<GenerationResponse, RemoteServiceError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                requests: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new(vec![Ok(GenerationResponse::default())])
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl KnowledgeBaseClient for ScriptedClient {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn retrieve_and_generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResponse, RemoteServiceError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RemoteServiceError::Malformed("script exhausted".into())))
        }
    }

    fn config() -> GatewayConfig {
        let mut knowledge_bases = BTreeMap::new();
        knowledge_bases.insert(TopicBucket::Research, "KB-RESEARCH".to_string());
        knowledge_bases.insert(TopicBucket::MeetingMinutes, "KB-MINUTES".to_string());
        GatewayConfig {
            knowledge_bases,
            model_reference: "arn:aws:bedrock:us-west-2::foundation-model/m1".to_string(),
            generation: GenerationConfig::default(),
            citations: CitationConfig::default(),
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }

    fn answer(text: &str, citations: Vec<CitationGroup>) -> GenerationResponse {
        GenerationResponse {
            answer_text: text.to_string(),
            citations,
        }
    }

    #[test]
    fn test_instruction_is_preamble_then_history() {
        let text = KnowledgeQueryGateway::<ScriptedClient>::build_instruction("User: Hi");
        assert!(text.starts_with("You are a helpful assistant. Always respond in clear, concise sentences."));
        assert!(text.contains("List any references separately after your response.\n\nUser: Hi"));
    }

    #[tokio::test]
    async fn test_query_shapes_request_for_topic() {
        let gateway = KnowledgeQueryGateway::new(
            ScriptedClient::new(vec![Ok(answer("Minutes are posted monthly.", vec![]))]),
            config(),
        );

        let result = gateway
            .query("minutes?", "User: minutes?", TopicBucket::MeetingMinutes)
            .await
            .unwrap();
        assert_eq!(result.answer_text, "Minutes are posted monthly.");
        assert!(result.references.is_empty());

        let requests = gateway.client().requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.knowledge_base_id, "KB-MINUTES");
        assert_eq!(
            request.model_reference,
            "arn:aws:bedrock:us-west-2::foundation-model/m1"
        );
        assert_eq!(request.generation.max_tokens, 700);
        assert!(request.instruction_text.ends_with("\n\nUser: minutes?"));
    }

    #[tokio::test]
    async fn test_query_formats_citations() {
        let citations = vec![CitationGroup {
            retrieved_references: vec![
                RetrievedReference::web("https://x.edu/grants", "Grant calendar\nJan: ..."),
                RetrievedReference::default(),
            ],
        }];
        let gateway = KnowledgeQueryGateway::new(
            ScriptedClient::new(vec![Ok(answer("See the calendar.", citations))]),
            config(),
        );

        let result = gateway
            .query("grants", "User: grants", TopicBucket::Research)
            .await
            .unwrap();
        assert_eq!(
            result.references,
            vec!["- [Grant calendar...](https://x.edu/grants)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_topic_fails_without_calling_client() {
        let gateway = KnowledgeQueryGateway::new(ScriptedClient::new(vec![]), config());
        let err = gateway
            .query("enroll", "User: enroll", TopicBucket::PeopleSoft)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteServiceError::UnconfiguredTopic(TopicBucket::PeopleSoft));
        assert_eq!(gateway.client().calls(), 0);
    }

    #[tokio::test]
    async fn test_fail_fast_by_default() {
        let gateway = KnowledgeQueryGateway::new(
            ScriptedClient::new(vec![
                Err(RemoteServiceError::Throttled),
                Ok(answer("never reached", vec![])),
            ]),
            config(),
        );
        let err = gateway
            .query("q", "User: q", TopicBucket::Research)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteServiceError::Throttled);
        assert_eq!(gateway.client().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_errors_when_enabled() {
        let mut config = config();
        config.retry.max_attempts = 3;
        let gateway = KnowledgeQueryGateway::new(
            ScriptedClient::new(vec![
                Err(RemoteServiceError::Throttled),
                Err(RemoteServiceError::Status {
                    status: 503,
                    body: "unavailable".into(),
                }),
                Ok(answer("third time lucky", vec![])),
            ]),
            config,
        );
        let result = gateway
            .query("q", "User: q", TopicBucket::Research)
            .await
            .unwrap();
        assert_eq!(result.answer_text, "third time lucky");
        assert_eq!(gateway.client().calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_not_retried() {
        let mut config = config();
        config.retry.max_attempts = 3;
        let gateway = KnowledgeQueryGateway::new(
            ScriptedClient::new(vec![Err(RemoteServiceError::Malformed(
                "missing output.text".into(),
            ))]),
            config,
        );
        let err = gateway
            .query("q", "User: q", TopicBucket::Research)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteServiceError::Malformed(_)));
        assert_eq!(gateway.client().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_remote_error() {
        let mut config = config();
        config.request_timeout = Duration::from_secs(5);
        let gateway = KnowledgeQueryGateway::new(
            ScriptedClient::slow(Duration::from_secs(30)),
            config,
        );
        let err = gateway
            .query("q", "User: q", TopicBucket::Research)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteServiceError::Timeout(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_second_timeout_reports_whole_seconds_rounded_up() {
        let mut config = config();
        config.request_timeout = Duration::from_millis(250);
        let gateway = KnowledgeQueryGateway::new(
            ScriptedClient::slow(Duration::from_secs(30)),
            config,
        );
        let err = gateway
            .query("q", "User: q", TopicBucket::Research)
            .await
            .unwrap_err();
        assert_eq!(err, RemoteServiceError::Timeout(1));
    }
}
