//! Chat assistant entry point.
//!
//! Decides how a single user prompt is answered: a canned small-talk reply
//! when the prompt is a greeting, farewell or thanks, otherwise a
//! knowledge-base query routed by topic.

use serde::Serialize;
use tracing::debug;

use humboldt_types::chat::ChatTurn;
use humboldt_types::error::RemoteServiceError;
use humboldt_types::topic::TopicBucket;

use crate::history::build_history;
use crate::knowledge::client::KnowledgeBaseClient;
use crate::knowledge::gateway::KnowledgeQueryGateway;
use crate::small_talk::detect_small_talk;
use crate::topic::classify;

/// Separator placed between an answer and its reference list.
pub const REFERENCES_HEADER: &str = "\n\n---\n**References**\n";

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    SmallTalk,
    Knowledge,
    Error,
}

/// One assistant reply, ready for any presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    pub answer_text: String,
    pub references: Vec<String>,
    /// Topic the question was routed to; `None` for small talk.
    pub topic: Option<TopicBucket>,
    pub kind: ReplyKind,
}

impl AssistantReply {
    pub fn small_talk(reply: &str) -> Self {
        Self {
            answer_text: reply.to_string(),
            references: Vec::new(),
            topic: None,
            kind: ReplyKind::SmallTalk,
        }
    }

    /// Inline text shown in place of a reply when the remote call failed.
    pub fn from_error(error: &RemoteServiceError, topic: Option<TopicBucket>) -> Self {
        Self {
            answer_text: format!("Sorry, I couldn't get an answer right now ({error})."),
            references: Vec::new(),
            topic,
            kind: ReplyKind::Error,
        }
    }

    /// Answer followed by the reference section, if there are references.
    pub fn display_text(&self) -> String {
        if self.references.is_empty() {
            return self.answer_text.clone();
        }
        format!(
            "{}{REFERENCES_HEADER}{}",
            self.answer_text,
            self.references.join("\n")
        )
    }
}

/// Answers user prompts, short-circuiting small talk.
pub struct ChatAssistant<C: KnowledgeBaseClient> {
    gateway: KnowledgeQueryGateway<C>,
}

impl<C: KnowledgeBaseClient> ChatAssistant<C> {
    pub fn new(gateway: KnowledgeQueryGateway<C>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &KnowledgeQueryGateway<C> {
        &self.gateway
    }

    /// Answer `prompt` given the prior `turns`.
    ///
    /// `turns` must not yet contain `prompt`; the transcript's final line is
    /// built from `prompt` itself. `topic_override` bypasses keyword
    /// classification.
    pub async fn handle_user_prompt(
        &self,
        prompt: &str,
        turns: &[ChatTurn],
        topic_override: Option<TopicBucket>,
    ) -> Result<AssistantReply, RemoteServiceError> {
        if let Some(reply) = detect_small_talk(prompt) {
            debug!("Answered with small talk");
            return Ok(AssistantReply::small_talk(reply));
        }

        let topic = topic_override.unwrap_or_else(|| classify(prompt));
        debug!(%topic, overridden = topic_override.is_some(), "Routing question");

        let history = build_history(turns, prompt);
        let result = self.gateway.query(prompt, &history, topic).await?;

        Ok(AssistantReply {
            answer_text: result.answer_text,
            references: result.references,
            topic: Some(topic),
            kind: ReplyKind::Knowledge,
        })
    }
}
