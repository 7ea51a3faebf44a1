//! Line input for `humboldt chat`.
//!
//! The prompt shows the pinned topic, if any (`You [peoplesoft] >`), so the
//! user can see where the next question goes. Questions are kept in the
//! readline history for the session.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use humboldt_types::topic::TopicBucket;

/// What the user did at the prompt.
#[derive(Debug)]
pub enum InputEvent {
    /// A question or slash command, trimmed.
    Message(String),
    /// Ctrl+D.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

/// Prompt text for the given routing mode.
pub fn prompt_for(topic: Option<TopicBucket>) -> String {
    match topic {
        Some(topic) => format!(
            "  {} {} ",
            style(format!("You [{}]", topic.slug())).green().bold(),
            style(">").green().bold()
        ),
        None => format!("  {} ", style("You >").green().bold()),
    }
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Start reading with the prompt for `topic`.
    pub fn new(topic: Option<TopicBucket>) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt_for(topic))?;
        Ok((Self { rl }, writer))
    }

    /// Re-render the prompt after `/topic`.
    pub fn set_topic(&mut self, topic: Option<TopicBucket>) {
        let _ = self.rl.update_prompt(&prompt_for(topic));
    }

    /// Next line from the user. Non-empty questions go into history; a read
    /// error ends the session like Ctrl+D.
    pub async fn read_line(&mut self) -> InputEvent {
        let line = match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => line,
            Ok(ReadlineEvent::Eof) | Err(_) => return InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => return InputEvent::Interrupted,
        };
        let question = line.trim().to_string();
        if !question.is_empty() {
            self.rl.add_history_entry(question.clone());
        }
        InputEvent::Message(question)
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Flush pending output before the terminal is restored.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_shows_pinned_topic_slug() {
        let pinned = console::strip_ansi_codes(&prompt_for(Some(TopicBucket::MeetingMinutes)))
            .to_string();
        assert_eq!(pinned, "  You [meeting-minutes] > ");

        let routed = console::strip_ansi_codes(&prompt_for(None)).to_string();
        assert_eq!(routed, "  You > ");
    }
}
