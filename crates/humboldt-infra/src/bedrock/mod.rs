//! AWS Bedrock Agent Runtime knowledge-base client.
//!
//! Implements [`KnowledgeBaseClient`](humboldt_core::knowledge::client::KnowledgeBaseClient)
//! for the `RetrieveAndGenerate` operation, signing each request with AWS
//! Signature Version 4.

mod client;
pub mod sigv4;
pub mod types;

pub use client::{BedrockKnowledgeBase, parse_response};
