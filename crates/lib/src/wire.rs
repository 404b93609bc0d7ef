//! JSON wire format for actions and state.
//!
//! Actions travel as tagged objects:
//!
//! ```json
//! { "type": "OPEN_THREAD", "id": "2-be91" }
//! { "type": "ADD_MESSAGE", "threadId": "1-fca2", "text": "hi" }
//! { "type": "DELETE_MESSAGE", "id": "4b1f..." }
//! ```
//!
//! An object whose `type` is a string other than the three known tags decodes
//! to [`WireAction::Unrecognized`]; the store treats that as an identity
//! transition. Anything else that does not fit these shapes is a
//! [`WireError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    Result,
    action::Action,
    state::{AppState, MessageId, ThreadId},
};

const OPEN_THREAD: &str = "OPEN_THREAD";
const ADD_MESSAGE: &str = "ADD_MESSAGE";
const DELETE_MESSAGE: &str = "DELETE_MESSAGE";

/// Errors raised while decoding wire data.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WireError {
    /// Input is not valid JSON
    #[error("Invalid JSON: {reason}")]
    InvalidJson { reason: String },

    /// An action is not an object with a string `type` field
    #[error("Action has no string 'type' field")]
    MissingType,

    /// A known action type is missing fields or has fields of the wrong type
    #[error("Malformed {kind} action: {reason}")]
    Malformed { kind: String, reason: String },

    /// An action list is not a JSON array
    #[error("Expected a JSON array of actions")]
    NotAnArray,

    /// An element of an action list failed to decode
    #[error("Action at index {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<WireError>,
    },
}

impl WireError {
    /// Position of the failing action within a list, if known
    pub fn index(&self) -> Option<usize> {
        match self {
            WireError::AtIndex { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<WireError> for crate::Error {
    fn from(err: WireError) -> Self {
        crate::Error::Wire(err)
    }
}

/// A decoded wire action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireAction {
    /// One of the known action kinds.
    Known(Action),
    /// A well-formed object whose `type` names no known action.
    Unrecognized { kind: String },
}

impl From<Action> for WireAction {
    fn from(action: Action) -> Self {
        WireAction::Known(action)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum TaggedAction {
    #[serde(rename = "OPEN_THREAD")]
    OpenThread { id: ThreadId },
    #[serde(rename = "ADD_MESSAGE", rename_all = "camelCase")]
    AddMessage { thread_id: ThreadId, text: String },
    #[serde(rename = "DELETE_MESSAGE")]
    DeleteMessage { id: MessageId },
}

impl From<TaggedAction> for Action {
    fn from(tagged: TaggedAction) -> Self {
        match tagged {
            TaggedAction::OpenThread { id } => Action::OpenThread { id },
            TaggedAction::AddMessage { thread_id, text } => Action::AddMessage { thread_id, text },
            TaggedAction::DeleteMessage { id } => Action::DeleteMessage { id },
        }
    }
}

impl From<&Action> for TaggedAction {
    fn from(action: &Action) -> Self {
        match action.clone() {
            Action::OpenThread { id } => TaggedAction::OpenThread { id },
            Action::AddMessage { thread_id, text } => TaggedAction::AddMessage { thread_id, text },
            Action::DeleteMessage { id } => TaggedAction::DeleteMessage { id },
        }
    }
}

fn parse_json(input: &str) -> std::result::Result<Value, WireError> {
    serde_json::from_str(input).map_err(|e| WireError::InvalidJson {
        reason: e.to_string(),
    })
}

/// Decodes one action from an already-parsed JSON value.
pub fn decode_action_value(value: Value) -> std::result::Result<WireAction, WireError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(WireError::MissingType)?
        .to_string();

    if ![OPEN_THREAD, ADD_MESSAGE, DELETE_MESSAGE].contains(&kind.as_str()) {
        return Ok(WireAction::Unrecognized { kind });
    }

    let tagged: TaggedAction = serde_json::from_value(value).map_err(|e| WireError::Malformed {
        kind: kind.clone(),
        reason: e.to_string(),
    })?;
    Ok(WireAction::Known(tagged.into()))
}

/// Decodes one action from JSON text.
pub fn decode_action(input: &str) -> Result<WireAction> {
    Ok(decode_action_value(parse_json(input)?)?)
}

/// Decodes a JSON array of actions, such as a replay script.
pub fn decode_actions(input: &str) -> Result<Vec<WireAction>> {
    let Value::Array(items) = parse_json(input)? else {
        return Err(WireError::NotAnArray.into());
    };

    let actions = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            decode_action_value(item).map_err(|e| WireError::AtIndex {
                index,
                source: Box::new(e),
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(actions)
}

/// Encodes an action into its wire object.
pub fn encode_action(action: &Action) -> Result<Value> {
    Ok(serde_json::to_value(TaggedAction::from(action))?)
}

/// Encodes a state snapshot as pretty-printed JSON.
pub fn encode_state(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Decodes a state snapshot from JSON.
pub fn decode_state(input: &str) -> Result<AppState> {
    Ok(serde_json::from_str(input)?)
}
