//! Knowledge-base access for Humboldt Helper.
//!
//! - `KnowledgeBaseClient`: RPITIT port for the external retrieval-and-generation service
//! - `BoxKnowledgeBaseClient`: object-safe wrapper for dynamic dispatch
//! - `KnowledgeQueryGateway`: request shaping, retry, and citation extraction

pub mod box_client;
pub mod client;
pub mod gateway;
pub mod retry;
