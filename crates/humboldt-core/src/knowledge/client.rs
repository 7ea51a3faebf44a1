//! KnowledgeBaseClient trait definition.
//!
//! The single outbound port of the assistant. Uses RPITIT for the call so
//! concrete clients stay zero-cost; `BoxKnowledgeBaseClient` adds dynamic
//! dispatch where the concrete type must be erased.

use humboldt_types::error::RemoteServiceError;
use humboldt_types::knowledge::{GenerationRequest, GenerationResponse};

/// Trait for retrieval-and-generation backends.
///
/// Implementations live in humboldt-infra (e.g., `BedrockKnowledgeBase`).
/// A client is constructed once per process and shared; implementations
/// must not rebuild connections or credentials per call.
pub trait KnowledgeBaseClient: Send + Sync {
    /// Human-readable backend name (e.g., "bedrock-agent-runtime").
    fn name(&self) -> &str;

    /// Retrieve relevant documents and generate a grounded answer.
    fn retrieve_and_generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, RemoteServiceError>> + Send;
}
