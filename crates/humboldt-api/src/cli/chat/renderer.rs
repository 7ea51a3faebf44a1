//! Terminal markdown rendering for assistant replies.
//!
//! Replies are markdown: prose from the model plus a `**References**` section
//! of `- [excerpt...](url)` links. `termimad` renders them for the terminal.

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use humboldt_types::topic::TopicBucket;

/// Terminal markdown renderer.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render a complete markdown reply.
    pub fn render_final(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print the footer after a reply: `| <topic> . <refs> references . <time>s`.
    pub fn print_reply_footer(
        &self,
        topic: Option<TopicBucket>,
        reference_count: usize,
        response_ms: u64,
    ) {
        let seconds = response_ms as f64 / 1000.0;
        let topic = topic.map(|t| t.to_string()).unwrap_or_else(|| "small talk".to_string());
        println!(
            "\n  {} {} {} {} references {} {:.1}s",
            style("|").dim(),
            style(topic).dim(),
            style("\u{00b7}").dim(),
            style(reference_count).dim(),
            style("\u{00b7}").dim(),
            style(seconds).dim(),
        );
    }
}
