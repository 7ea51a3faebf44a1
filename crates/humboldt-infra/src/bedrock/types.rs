//! Wire types for the Bedrock Agent Runtime `RetrieveAndGenerate` operation.
//!
//! Request structs serialize to the service's camelCase JSON. The response
//! reuses [`CitationGroup`] from `humboldt-types`, which already mirrors the
//! service's citation shape; unknown fields such as `generatedResponsePart`
//! and `sessionId` are ignored.

use serde::{Deserialize, Serialize};

use humboldt_types::citation::{CitationGroup, null_as_empty};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateRequest {
    pub input: RetrieveAndGenerateInput,
    pub retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrieveAndGenerateInput {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateConfiguration {
    /// Always `KNOWLEDGE_BASE`.
    #[serde(rename = "type")]
    pub config_type: String,
    pub knowledge_base_configuration: KnowledgeBaseConfiguration,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseConfiguration {
    pub knowledge_base_id: String,
    pub model_arn: String,
    pub generation_configuration: WireGenerationConfiguration,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGenerationConfiguration {
    pub inference_config: InferenceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub text_inference_config: TextInferenceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInferenceConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateResponse {
    #[serde(default)]
    pub output: Option<RetrieveAndGenerateOutput>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub citations: Vec<CitationGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveAndGenerateOutput {
    #[serde(default)]
    pub text: Option<String>,
}

/// Error body returned with non-2xx statuses, e.g. `{"message": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default, alias = "Message")]
    pub message: Option<String>,
}
