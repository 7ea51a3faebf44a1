//! One-shot question command.

use anyhow::Result;
use console::style;

use humboldt_types::topic::TopicBucket;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;
use super::thinking_spinner;

/// Ask one question without prior history and print the reply.
pub async fn ask(
    state: &AppState,
    question: &str,
    topic: Option<TopicBucket>,
    json: bool,
) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("question must not be empty");
    }

    let spinner = (!json).then(thinking_spinner);
    let result = state
        .assistant
        .handle_user_prompt(question, &[], topic)
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let reply = result?;

    if json {
        let output = serde_json::json!({
            "answer": reply.answer_text,
            "references": reply.references,
            "topic": reply.topic,
            "kind": reply.kind,
            "display_text": reply.display_text(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    println!();
    if let Some(topic) = reply.topic {
        println!("  {} {}", style("Topic:").bold(), style(topic).dim());
        println!();
    }
    println!("{}", renderer.render_final(&reply.display_text()));

    Ok(())
}
