//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: welcome banner, greeting, input
//! loop with slash commands, one assistant call per prompt, and rendering.
//! Remote failures are shown inline and never end the session; the failed
//! prompt is still recorded as a user turn.

use std::time::Instant;

use console::style;
use tracing::warn;

use humboldt_core::assistant::AssistantReply;
use humboldt_core::conversation::Conversation;
use humboldt_types::chat::TurnRole;
use humboldt_types::topic::TopicBucket;

use crate::cli::thinking_spinner;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Longest content shown per turn by `/history`.
const HISTORY_PREVIEW_CHARS: usize = 100;

fn preview(content: &str) -> String {
    let single_line = content.replace('\n', " ");
    if single_line.chars().count() > HISTORY_PREVIEW_CHARS {
        let cut: String = single_line.chars().take(HISTORY_PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        single_line
    }
}

fn print_greeting(renderer: &ChatRenderer, conversation: &Conversation) {
    if let Some(greeting) = conversation.turns().first() {
        println!("  {}", renderer.render_final(&greeting.content).trim());
        println!();
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState, topic: Option<TopicBucket>) -> anyhow::Result<()> {
    let mut pinned_topic = topic;
    let mut conversation = Conversation::new();
    let renderer = ChatRenderer::new();

    print_welcome_banner(
        &state.assistant.gateway().config().model_reference,
        pinned_topic,
    );
    print_greeting(&renderer, &conversation);

    let (mut chat_input, _writer) = ChatInput::new(pinned_topic)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Topic(topic) => {
                            pinned_topic = topic;
                            chat_input.set_topic(topic);
                            let routing = match topic {
                                Some(topic) => format!("Questions now go to {topic}."),
                                None => "Questions are routed by keyword again.".to_string(),
                            };
                            println!("\n  {} {}\n", style("*").cyan().bold(), routing);
                        }
                        ChatCommand::History => {
                            println!();
                            for turn in conversation.turns() {
                                let label = match turn.role {
                                    TurnRole::User => format!("{}", style("You").green()),
                                    TurnRole::Assistant => format!("{}", style("Helper").cyan()),
                                };
                                println!("  {} {}", style(label).bold(), preview(&turn.content));
                            }
                            println!();
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                            conversation.reset();
                            print_greeting(&renderer, &conversation);
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                let spinner = thinking_spinner();
                let start_time = Instant::now();
                let result = state
                    .assistant
                    .handle_user_prompt(&text, conversation.turns(), pinned_topic)
                    .await;
                spinner.finish_and_clear();

                match result {
                    Ok(reply) => {
                        let response_ms = start_time.elapsed().as_millis() as u64;
                        let display = reply.display_text();
                        println!();
                        println!("{}", renderer.render_final(&display));
                        renderer.print_reply_footer(reply.topic, reply.references.len(), response_ms);
                        println!();

                        conversation.push_user(text);
                        conversation.push_assistant(display);
                    }
                    Err(e) => {
                        warn!(error = %e, "Knowledge base query failed");
                        let inline = AssistantReply::from_error(&e, pinned_topic);
                        eprintln!("\n  {} {}", style("!").red().bold(), inline.answer_text);
                        eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
                        println!();

                        // The attempt stays in the log; the error text does not.
                        conversation.push_user(text);
                    }
                }
            }
        }
    }

    chat_input.flush();
    Ok(())
}
