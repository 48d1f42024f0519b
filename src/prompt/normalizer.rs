//! Flattens a role-tagged conversation into one prompt string

use crate::models::{Message, MessageRole};

/// Render `messages` as `User: ...` / `Assistant: ...` lines
///
/// System messages never appear as lines. The last one's content is placed
/// ahead of the conversation followed by a blank line; earlier system
/// messages are dropped.
pub fn normalize_messages(messages: &[Message]) -> String {
    let mut system_prompt: Option<&str> = None;
    let mut conversation = String::new();

    for message in messages {
        let label = match message.role {
            MessageRole::System => {
                system_prompt = Some(&message.content);
                continue;
            }
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
        };

        conversation.push_str(label);
        conversation.push_str(": ");
        conversation.push_str(&message.content);
        conversation.push('\n');
    }

    match system_prompt {
        Some(system) => format!("{}\n\n{}", system, conversation),
        None => conversation,
    }
}
