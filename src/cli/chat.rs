use std::time::Duration;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{
    ChatTurn, Conversation, HttpRelayClient, Role, SubmitError, Transcript, validate,
};
use crate::core::logging;

const THINKING: &str = "thinking...";

fn render_turn(turn: &ChatTurn) -> String {
    let label = match turn.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    format!("{}: {}", label, turn.content)
}

/// Remembers how much of the transcript has been printed so each
/// turn is rendered exactly once.
#[derive(Default)]
struct TranscriptView {
    rendered: usize,
}

impl TranscriptView {
    fn drain(&mut self, transcript: &Transcript) -> Vec<String> {
        let lines = transcript.turns()[self.rendered..]
            .iter()
            .map(render_turn)
            .collect();
        self.rendered = transcript.len();
        lines
    }
}

pub async fn run(relay_url: &str, timeout_secs: u64) -> Result<()> {
    // Keep the prompt readable, only warnings and errors by default
    logging::init(&format!("{}=warn", env!("CARGO_CRATE_NAME")));

    let client = HttpRelayClient::new(relay_url, Duration::from_secs(timeout_secs))?;
    let conversation = Conversation::new(client);
    let mut transcript_rx = conversation.subscribe();
    let mut view = TranscriptView::default();
    let mut rl = DefaultEditor::new()?;

    println!("Ask for advice, e.g. \"How to calculate the area of a triangle?\"");

    loop {
        // Each prompt starts empty so the input is reset after every
        // submission
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if validate(&line).is_ok() {
                    println!("{}", THINKING);
                }

                match conversation.submit(&line).await {
                    Ok(_) => {}
                    Err(SubmitError::Validation(e)) => println!("{}", e),
                    Err(e) => println!("Something went wrong: {}", e),
                }

                for rendered in view.drain(&transcript_rx.borrow_and_update()) {
                    println!("{}", rendered);
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::chat::{RelayClient, RelayTransportError};

    struct CountingRelay;

    #[async_trait]
    impl RelayClient for CountingRelay {
        async fn converse(&self, messages: &[ChatTurn]) -> Result<ChatTurn, RelayTransportError> {
            Ok(ChatTurn::assistant(&format!("saw {} messages", messages.len())))
        }
    }

    struct DownRelay;

    #[async_trait]
    impl RelayClient for DownRelay {
        async fn converse(&self, _messages: &[ChatTurn]) -> Result<ChatTurn, RelayTransportError> {
            Err(RelayTransportError::Unreachable(String::from("connection refused")))
        }
    }

    #[test]
    fn test_render_turn_labels_roles() {
        assert_eq!(render_turn(&ChatTurn::user("What is 2+2?")), "user: What is 2+2?");
        assert_eq!(render_turn(&ChatTurn::assistant("4")), "assistant: 4");
    }

    #[tokio::test]
    async fn test_view_renders_each_appended_turn_once() {
        let conversation = Conversation::new(CountingRelay);
        let mut rx = conversation.subscribe();
        let mut view = TranscriptView::default();

        conversation.submit("first question here").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            view.drain(&rx.borrow_and_update()),
            vec!["user: first question here", "assistant: saw 1 messages"]
        );

        conversation.submit("second question here").await.unwrap();
        assert_eq!(
            view.drain(&rx.borrow_and_update()),
            vec!["user: second question here", "assistant: saw 3 messages"]
        );

        // Nothing new, nothing printed
        assert!(view.drain(&rx.borrow_and_update()).is_empty());
    }

    #[tokio::test]
    async fn test_view_prints_nothing_after_failure() {
        let conversation = Conversation::new(DownRelay);
        let mut rx = conversation.subscribe();
        let mut view = TranscriptView::default();

        assert!(conversation.submit("is anybody out there?").await.is_err());

        assert!(!rx.has_changed().unwrap());
        assert!(view.drain(&rx.borrow_and_update()).is_empty());
    }
}
