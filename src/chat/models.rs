//! The core models for keeping track of a conversation with an LLM.
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One message in the conversation tagged with who said it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: &str) -> Self {
        ChatTurn {
            role,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: &str) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript(Vec<ChatTurn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, turns: impl IntoIterator<Item = ChatTurn>) {
        self.0.extend(turns)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.0.iter()
    }
}

/// Append-only holder of the transcript for a single session.
///
/// Every append publishes the new transcript to subscribers so a view
/// can re-render. There is intentionally no way to remove a turn.
pub struct TranscriptStore {
    tx: watch::Sender<Transcript>,
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(Transcript::new()),
        }
    }

    /// Appends `turns` to the end of the transcript in the order given.
    pub fn append(&self, turns: Vec<ChatTurn>) {
        self.tx.send_modify(|transcript| transcript.extend(turns));
    }

    pub fn snapshot(&self) -> Transcript {
        self.tx.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Receiver that is notified after every append.
    pub fn subscribe(&self) -> watch::Receiver<Transcript> {
        self.tx.subscribe()
    }
}
