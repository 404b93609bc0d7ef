//! The closed set of state transitions.
//!
//! Every change to [`AppState`](crate::state::AppState) is requested through an
//! [`Action`]. Matching on it is exhaustive, so there is no silent fallthrough
//! for an unexpected kind; unknown kinds can only appear at the wire boundary
//! (see [`wire`](crate::wire)).

use crate::state::{MessageId, ThreadId};

/// A requested state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Make `id` the active thread. The id is not checked against the thread list.
    OpenThread { id: ThreadId },
    /// Append a message with `text` to the thread `thread_id`.
    AddMessage { thread_id: ThreadId, text: String },
    /// Remove the message `id` from whichever thread holds it.
    DeleteMessage { id: MessageId },
}

impl Action {
    pub fn open_thread(id: impl Into<ThreadId>) -> Self {
        Action::OpenThread { id: id.into() }
    }

    pub fn add_message(thread_id: impl Into<ThreadId>, text: impl Into<String>) -> Self {
        Action::AddMessage {
            thread_id: thread_id.into(),
            text: text.into(),
        }
    }

    pub fn delete_message(id: impl Into<MessageId>) -> Self {
        Action::DeleteMessage { id: id.into() }
    }

    /// The wire tag of this action kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::OpenThread { .. } => "OPEN_THREAD",
            Action::AddMessage { .. } => "ADD_MESSAGE",
            Action::DeleteMessage { .. } => "DELETE_MESSAGE",
        }
    }

    /// Returns true if this action can change a thread's messages.
    pub fn touches_messages(&self) -> bool {
        matches!(
            self,
            Action::AddMessage { .. } | Action::DeleteMessage { .. }
        )
    }
}
