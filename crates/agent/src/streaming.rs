//! The response streaming loop.
//!
//! Pulls tokens from a `TokenSource` until the empty-string sentinel (or the
//! source runs dry), folding each one into the accumulated text.

use petal_core::token::TokenSource;
use tokio::sync::mpsc;
use tracing::debug;

use crate::assembler::assemble;
use crate::stream_event::StreamEvent;

/// Drive `source` to completion, reporting progress through `on_event`.
///
/// Returns the final assembled text.
pub async fn stream_response<S, F>(source: &mut S, mut on_event: F) -> String
where
    S: TokenSource + ?Sized,
    F: FnMut(StreamEvent),
{
    let mut text = String::new();
    let mut tokens = 0usize;

    while let Some(token) = source.next_token().await {
        if token.is_empty() {
            break;
        }
        text = assemble(&text, &token);
        tokens += 1;
        on_event(StreamEvent::Chunk {
            token,
            text: text.clone(),
        });
    }

    debug!(tokens, chars = text.len(), "Response stream finished");
    on_event(StreamEvent::Done {
        text: text.clone(),
        tokens,
    });
    text
}

/// Feed `tokens` through a bounded channel from a background task.
///
/// Stands in for a model connection: the receiver is a `TokenSource` and the
/// sender side applies backpressure at `buffer` pending tokens.
pub fn channel_source<I>(tokens: I, buffer: usize) -> mpsc::Receiver<String>
where
    I: IntoIterator<Item = String> + Send + 'static,
    I::IntoIter: Send,
{
    let (tx, rx) = mpsc::channel(buffer.max(1));
    tokio::spawn(async move {
        for token in tokens {
            if tx.send(token).await.is_err() {
                break; // Receiver dropped
            }
        }
    });
    rx
}
