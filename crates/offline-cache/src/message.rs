//! Worker Messages
//!
//! `postMessage` protocol between the page and the worker.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    /// Reply with the running version on the supplied port
    GetVersion,
    /// Activate a waiting worker now
    SkipWaiting,
}

impl WorkerMessage {
    /// Parse a JSON message; unknown types yield `None`
    pub fn parse(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReply {
    pub version: String,
}

/// What the worker host should do for a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageAction {
    Reply(VersionReply),
    SkipWaiting,
}
