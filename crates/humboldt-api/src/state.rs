//! Application state wiring the assistant together.
//!
//! AppState holds the concrete assistant used by both CLI and REST API. The
//! assistant is generic over its knowledge-base client; AppState pins it to
//! the type-erased [`BoxKnowledgeBaseClient`] so tests can substitute a mock.

use std::path::Path;
use std::sync::Arc;

use humboldt_core::assistant::ChatAssistant;
use humboldt_core::knowledge::box_client::BoxKnowledgeBaseClient;
use humboldt_core::knowledge::gateway::{GatewayConfig, KnowledgeQueryGateway};
use humboldt_infra::bedrock::BedrockKnowledgeBase;
use humboldt_infra::config::{RuntimeConfig, load_settings};

pub type ConcreteAssistant = ChatAssistant<BoxKnowledgeBaseClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<ConcreteAssistant>,
}

impl AppState {
    /// Read settings and environment, build the Bedrock client once, wire the assistant.
    pub async fn init(settings_path: &Path) -> anyhow::Result<Self> {
        let settings = load_settings(settings_path).await;
        let runtime = RuntimeConfig::from_env()?;
        let gateway_config = runtime.gateway_config(&settings);

        tracing::info!(
            region = %runtime.region,
            model = %gateway_config.model_reference,
            knowledge_bases = gateway_config.knowledge_bases.len(),
            "Configuration loaded"
        );

        let client = BedrockKnowledgeBase::new(
            runtime.credentials,
            runtime.region,
            gateway_config.request_timeout,
        )?;

        Ok(Self::with_client(
            BoxKnowledgeBaseClient::new(client),
            gateway_config,
        ))
    }

    /// Wire the assistant around an already-built client.
    pub fn with_client(client: BoxKnowledgeBaseClient, gateway_config: GatewayConfig) -> Self {
        let gateway = KnowledgeQueryGateway::new(client, gateway_config);
        Self {
            assistant: Arc::new(ChatAssistant::new(gateway)),
        }
    }
}
