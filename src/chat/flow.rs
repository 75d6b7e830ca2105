//! One round trip from user input to an updated transcript.
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::watch;

use super::client::{RelayClient, RelayTransportError};
use super::models::{ChatTurn, Transcript, TranscriptStore};

/// Minimum number of characters (after trimming) a message needs.
pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("The minimum length is {min} characters to send a message (got {actual})")]
pub struct ValidationError {
    pub min: usize,
    pub actual: usize,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a message is already waiting for a reply")]
    Busy,

    #[error(transparent)]
    Relay(#[from] RelayTransportError),
}

pub fn validate(raw_input: &str) -> Result<(), ValidationError> {
    let actual = raw_input.trim().chars().count();
    if actual < MIN_MESSAGE_CHARS {
        return Err(ValidationError {
            min: MIN_MESSAGE_CHARS,
            actual,
        });
    }
    Ok(())
}

// Clears the busy flag when the round trip ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single chat session: the transcript plus the submission flow
/// that is allowed to change it.
///
/// At most one submission is in flight at a time. A second call to
/// `submit` while one is outstanding fails with `SubmitError::Busy`
/// instead of queueing.
pub struct Conversation<C: RelayClient> {
    client: C,
    store: TranscriptStore,
    busy: AtomicBool,
}

impl<C: RelayClient> Conversation<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            store: TranscriptStore::new(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn transcript(&self) -> Transcript {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Transcript> {
        self.store.subscribe()
    }

    /// Send `raw_input` to the relay and, if a reply comes back,
    /// commit the user turn followed by the assistant turn.
    ///
    /// The transcript is left untouched on every error path.
    pub async fn submit(&self, raw_input: &str) -> Result<ChatTurn, SubmitError> {
        if self.is_busy() {
            return Err(SubmitError::Busy);
        }
        validate(raw_input)?;

        let user_turn = ChatTurn::user(raw_input);

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        // The request carries exactly what will be displayed on success
        let mut messages_in_context = self.store.snapshot();
        messages_in_context.extend([user_turn.clone()]);

        match self.client.converse(messages_in_context.turns()).await {
            Ok(reply) => {
                self.store.append(vec![user_turn, reply.clone()]);
                Ok(reply)
            }
            Err(e) => {
                tracing::error!("Relay request failed: {}", e);
                Err(SubmitError::Relay(e))
            }
        }
    }
}
