//! Welcome banner display for chat sessions.

use console::style;

use humboldt_types::topic::TopicBucket;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the model in use and how questions will be routed.
pub fn print_welcome_banner(model_reference: &str, pinned_topic: Option<TopicBucket>) {
    let routing = match pinned_topic {
        Some(topic) => format!("pinned to {topic}"),
        None => "automatic (by keyword)".to_string(),
    };

    println!();
    println!("  🌲 {}", style("Humboldt Helper").cyan().bold());
    println!(
        "  {}",
        style("Research documents, funding opportunities, and campus resources").dim()
    );
    println!();
    println!("  {}    {}", style("Model:").bold(), style(model_reference).dim());
    println!("  {}  {}", style("Routing:").bold(), style(routing).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
