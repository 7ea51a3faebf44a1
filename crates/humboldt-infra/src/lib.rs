//! Infrastructure layer for Humboldt Helper.
//!
//! Contains the concrete [`KnowledgeBaseClient`](humboldt_core::knowledge::client::KnowledgeBaseClient)
//! for AWS Bedrock Agent Runtime (reqwest + SigV4 signing) and the loaders
//! for environment credentials and the optional `humboldt.toml` settings file.

pub mod bedrock;
pub mod config;
