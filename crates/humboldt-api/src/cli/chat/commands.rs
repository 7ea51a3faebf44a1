//! Slash command parsing and execution for the chat loop.
//!
//! Commands start with `/` and control routing, history, and the session.

use console::style;

use humboldt_types::topic::TopicBucket;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Pin questions to a topic, or `None` to return to keyword routing.
    Topic(Option<TopicBucket>),
    /// Show the conversation so far.
    History,
    /// Clear the screen and start over from the greeting.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command or bad argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/topic" | "/t" => match arg.as_deref() {
            None => Some(ChatCommand::Unknown(
                "/topic requires a topic name or 'auto'".to_string(),
            )),
            Some(name) if name.eq_ignore_ascii_case("auto") => Some(ChatCommand::Topic(None)),
            Some(name) => match name.parse::<TopicBucket>() {
                Ok(topic) => Some(ChatCommand::Topic(Some(topic))),
                Err(e) => Some(ChatCommand::Unknown(e)),
            },
        },
        "/history" => Some(ChatCommand::History),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}            {}", style("/help").cyan(), "Show this help message");
    println!(
        "  {}    {}",
        style("/topic <name>").cyan(),
        "Ask one knowledge base (research, meeting-minutes, peoplesoft)"
    );
    println!(
        "  {}     {}",
        style("/topic auto").cyan(),
        "Route questions by keyword again"
    );
    println!("  {}         {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {}           {}", style("/clear").cyan(), "Clear the screen and start over");
    println!("  {}            {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
