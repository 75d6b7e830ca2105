//! Public types for the conversation relay API
use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;

#[derive(Serialize, Deserialize)]
pub struct ConversationRequest {
    pub messages: Vec<ChatTurn>,
}
