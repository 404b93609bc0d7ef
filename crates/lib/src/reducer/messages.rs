//! Message sequence of a single thread.

use crate::{
    action::Action,
    state::{Message, Messages},
};

use super::ReduceContext;

/// Appends on `AddMessage`, filters on `DeleteMessage`.
///
/// Both produce a new sequence, even when the delete matches nothing. The new
/// message text is stored verbatim; blank text is not rejected here.
pub fn reduce_messages(messages: Messages, action: &Action, ctx: &ReduceContext<'_>) -> Messages {
    match action {
        Action::AddMessage { text, .. } => {
            let message = Message {
                id: ctx.ids.next_message_id(),
                text: text.clone(),
                timestamp: ctx.clock.now_millis(),
            };
            messages
                .iter()
                .cloned()
                .chain(std::iter::once(message))
                .collect()
        }
        Action::DeleteMessage { id } => messages.iter().filter(|m| &m.id != id).cloned().collect(),
        Action::OpenThread { .. } => messages,
    }
}
