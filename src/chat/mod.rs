//! Client side of a conversation: the transcript and the flow that
//! sends it through the relay.
pub mod client;
pub mod flow;
pub mod models;

pub use client::{HttpRelayClient, RelayClient, RelayTransportError};
pub use flow::{Conversation, MIN_MESSAGE_CHARS, SubmitError, ValidationError, validate};
pub use models::{ChatTurn, Role, Transcript, TranscriptStore};
