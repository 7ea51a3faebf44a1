//! Request/response types for the retrieval-and-generation port.
//!
//! These are transport-neutral: the infra adapter maps them onto the wire
//! format of the concrete service.

use serde::{Deserialize, Serialize};

use crate::citation::CitationGroup;
use crate::config::GenerationConfig;

/// A single retrieval-and-generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Instruction preamble followed by the conversation transcript.
    pub instruction_text: String,
    /// Opaque knowledge-base handle resolved from the topic bucket.
    pub knowledge_base_id: String,
    /// Model reference, e.g. `arn:aws:bedrock:us-west-2::foundation-model/<id>`.
    pub model_reference: String,
    pub generation: GenerationConfig,
}

/// Parsed result of a retrieval-and-generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub answer_text: String,
    #[serde(default)]
    pub citations: Vec<CitationGroup>,
}

/// Build the foundation-model ARN for a region and model id.
pub fn foundation_model_arn(region: &str, model_id: &str) -> String {
    format!("arn:aws:bedrock:{region}::foundation-model/{model_id}")
}
