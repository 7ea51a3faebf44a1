//! BoxKnowledgeBaseClient -- object-safe dynamic dispatch wrapper for KnowledgeBaseClient.
//!
//! 1. Define an object-safe `KnowledgeBaseClientDyn` trait with boxed futures
//! 2. Blanket-impl `KnowledgeBaseClientDyn` for all `T: KnowledgeBaseClient`
//! 3. `BoxKnowledgeBaseClient` wraps `Box<dyn KnowledgeBaseClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use humboldt_types::error::RemoteServiceError;
use humboldt_types::knowledge::{GenerationRequest, GenerationResponse};

use super::client::KnowledgeBaseClient;

/// Object-safe version of [`KnowledgeBaseClient`] with boxed futures.
pub trait KnowledgeBaseClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn retrieve_and_generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResponse, RemoteServiceError>> + Send + 'a>>;
}

impl<T: KnowledgeBaseClient> KnowledgeBaseClientDyn for T {
    fn name(&self) -> &str {
        KnowledgeBaseClient::name(self)
    }

    fn retrieve_and_generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResponse, RemoteServiceError>> + Send + 'a>>
    {
        Box::pin(self.retrieve_and_generate(request))
    }
}

/// Type-erased knowledge-base client.
///
/// Lets the application state hold "some client" without naming the
/// concrete type, so the HTTP and CLI layers can run against a test double.
pub struct BoxKnowledgeBaseClient {
    inner: Box<dyn KnowledgeBaseClientDyn + Send + Sync>,
}

impl BoxKnowledgeBaseClient {
    /// Wrap a concrete client in a type-erased box.
    pub fn new<T: KnowledgeBaseClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }
}

impl KnowledgeBaseClient for BoxKnowledgeBaseClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn retrieve_and_generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, RemoteServiceError> {
        self.inner.retrieve_and_generate_boxed(request).await
    }
}
