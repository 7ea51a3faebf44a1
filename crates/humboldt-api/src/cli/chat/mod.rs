//! Interactive CLI chat experience for Humboldt Helper.
//!
//! Implements the chat loop: markdown-rendered replies with a reference
//! section, a waiting spinner, a welcome banner, and slash commands.
//! Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
