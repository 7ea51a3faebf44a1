//! Conversation transcript formatting.

use humboldt_types::chat::{ChatTurn, TurnRole};

/// Flatten prior turns plus a new prompt into a plain-text transcript.
///
/// One `"<Role>: <content>"` line per turn in order, followed by
/// `"User: <new_prompt>"`. Lines are joined with `\n`; there is no trailing
/// newline. `turns` must not already contain `new_prompt`.
pub fn build_history(turns: &[ChatTurn], new_prompt: &str) -> String {
    let mut history = String::new();
    for turn in turns {
        history.push_str(turn.role.label());
        history.push_str(": ");
        history.push_str(&turn.content);
        history.push('\n');
    }
    history.push_str(TurnRole::User.label());
    history.push_str(": ");
    history.push_str(new_prompt);
    history
}
