//! Shared domain types for Humboldt Helper.
//!
//! This crate contains the types passed between the assistant logic and its
//! adapters: chat turns, topic buckets, citation records, query results,
//! settings, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod chat;
pub mod citation;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod topic;
