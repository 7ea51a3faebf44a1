//! BedrockKnowledgeBase -- concrete [`KnowledgeBaseClient`] for AWS Bedrock Agent Runtime.
//!
//! Sends `RetrieveAndGenerate` requests signed with SigV4. The HTTP client and
//! credentials are built once and reused for every request.

use std::time::Duration;

use humboldt_core::knowledge::client::KnowledgeBaseClient;
use humboldt_types::error::RemoteServiceError;
use humboldt_types::knowledge::{GenerationRequest, GenerationResponse};

use super::sigv4::{self, AwsCredentials, SignableRequest};
use super::types::{
    InferenceConfig, KnowledgeBaseConfiguration, RetrieveAndGenerateConfiguration,
    RetrieveAndGenerateInput, RetrieveAndGenerateRequest, RetrieveAndGenerateResponse,
    ServiceErrorBody, TextInferenceConfig, WireGenerationConfiguration,
};

/// AWS Bedrock Agent Runtime knowledge-base client.
///
/// Does not derive `Debug`; it owns the credentials.
pub struct BedrockKnowledgeBase {
    client: reqwest::Client,
    credentials: AwsCredentials,
    region: String,
    timeout: Duration,
}

impl BedrockKnowledgeBase {
    /// SigV4 service name for Bedrock endpoints.
    const SERVICE: &'static str = "bedrock";

    const PATH: &'static str = "/retrieveAndGenerate";

    const CONTENT_TYPE: &'static str = "application/json";

    pub fn new(
        credentials: AwsCredentials,
        region: String,
        timeout: Duration,
    ) -> Result<Self, RemoteServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteServiceError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            region,
            timeout,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn host(&self) -> String {
        format!("bedrock-agent-runtime.{}.amazonaws.com", self.region)
    }

    fn url(&self) -> String {
        format!("https://{}{}", self.host(), Self::PATH)
    }

    /// Map a transport-neutral request onto the service's JSON body.
    pub fn to_wire_request(request: &GenerationRequest) -> RetrieveAndGenerateRequest {
        RetrieveAndGenerateRequest {
            input: RetrieveAndGenerateInput {
                text: request.instruction_text.clone(),
            },
            retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration {
                config_type: "KNOWLEDGE_BASE".to_string(),
                knowledge_base_configuration: KnowledgeBaseConfiguration {
                    knowledge_base_id: request.knowledge_base_id.clone(),
                    model_arn: request.model_reference.clone(),
                    generation_configuration: WireGenerationConfiguration {
                        inference_config: InferenceConfig {
                            text_inference_config: TextInferenceConfig {
                                temperature: request.generation.temperature,
                                top_p: request.generation.top_p,
                                max_tokens: request.generation.max_tokens,
                            },
                        },
                    },
                },
            },
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> RemoteServiceError {
        if err.is_timeout() {
            RemoteServiceError::Timeout(self.timeout.as_millis().div_ceil(1000) as u64)
        } else {
            RemoteServiceError::Transport(format!("HTTP request failed: {err}"))
        }
    }
}

/// Map a non-2xx status and body to an error.
pub fn status_error(status: u16, body: &str) -> RemoteServiceError {
    let message = serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => RemoteServiceError::Authentication(message),
        429 => RemoteServiceError::Throttled,
        _ => RemoteServiceError::Status {
            status,
            body: message,
        },
    }
}

/// Parse a successful response body.
///
/// A body that is not JSON, or has no `output.text`, is malformed.
pub fn parse_response(body: &str) -> Result<GenerationResponse, RemoteServiceError> {
    let parsed: RetrieveAndGenerateResponse = serde_json::from_str(body)
        .map_err(|e| RemoteServiceError::Malformed(format!("failed to parse response: {e}")))?;

    let answer_text = parsed
        .output
        .and_then(|output| output.text)
        .ok_or_else(|| RemoteServiceError::Malformed("response has no output.text".to_string()))?;

    Ok(GenerationResponse {
        answer_text,
        citations: parsed.citations,
    })
}

impl KnowledgeBaseClient for BedrockKnowledgeBase {
    fn name(&self) -> &str {
        "aws.bedrock"
    }

    async fn retrieve_and_generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, RemoteServiceError> {
        let body = serde_json::to_vec(&Self::to_wire_request(request))
            .map_err(|e| RemoteServiceError::Transport(format!("failed to encode request: {e}")))?;

        let host = self.host();
        let signed = sigv4::sign(
            &self.credentials,
            &self.region,
            Self::SERVICE,
            &SignableRequest {
                method: "POST",
                host: &host,
                path: Self::PATH,
                content_type: Self::CONTENT_TYPE,
                body: &body,
            },
            chrono::Utc::now(),
        )
        .map_err(|e| RemoteServiceError::Authentication(format!("failed to sign request: {e}")))?;

        let url = self.url();
        tracing::debug!(url = %url, knowledge_base_id = %request.knowledge_base_id, "Bedrock retrieveAndGenerate request");

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", Self::CONTENT_TYPE);
        for (name, value) in signed.pairs() {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            tracing::warn!(status = %status, body = %text, "Bedrock API error response");
            return Err(status_error(status.as_u16(), &text));
        }

        parse_response(&text)
    }
}
