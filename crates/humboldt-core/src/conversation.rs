//! Append-only turn log kept by interactive presenters.

use humboldt_types::chat::ChatTurn;

/// Opening assistant message of every conversation.
pub const INITIAL_GREETING: &str = "Hi! I'm Humboldt Helper. I can help you locate research documents, \
     funding opportunities, and resources regarding research. How can I assist you?";

/// Ordered chat turns, starting with the assistant's greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            turns: vec![ChatTurn::assistant(INITIAL_GREETING)],
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(content));
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop everything and start over from the greeting.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humboldt_types::chat::TurnRole;

    #[test]
    fn test_seeded_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.turns()[0].role, TurnRole::Assistant);
        assert_eq!(conversation.turns()[0].content, INITIAL_GREETING);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("What grants are open?");
        conversation.push_assistant("The NSF grant.");

        let roles: Vec<TurnRole> = conversation.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![TurnRole::Assistant, TurnRole::User, TurnRole::Assistant]
        );
        assert_eq!(conversation.turns()[2].content, "The NSF grant.");
    }

    #[test]
    fn test_reset_returns_to_greeting() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");
        conversation.reset();
        assert_eq!(conversation, Conversation::new());
    }
}
