//! Assistant logic and port definitions for Humboldt Helper.
//!
//! This crate holds everything the repository itself decides: topic routing,
//! transcript building, small-talk replies, citation formatting, and the
//! `KnowledgeBaseClient` port that the infrastructure layer implements. It
//! depends only on `humboldt-types` -- never on `humboldt-infra` or any
//! network crate.

pub mod assistant;
pub mod citation;
pub mod conversation;
pub mod history;
pub mod knowledge;
pub mod small_talk;
pub mod topic;
