//! Chat session state
//!
//! An explicit, owned, append-only log of role-tagged turns. The log lives
//! only as long as the interactive session; there is no durable storage.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message in the session log. Never mutated or removed
/// once appended; append order is chronological order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only sequence of chat turns owned by one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    turns: Vec<ChatTurn>,
}

impl SessionLog {
    /// Create an empty session log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the log
    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Iterate over turns in chronological order
    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    /// The most recently appended turn, if any
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Number of turns in the log
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the log holds no turns yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
