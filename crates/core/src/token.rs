//! Token source trait — the model side of a response stream.
//!
//! A source yields string tokens one at a time. The empty string is the
//! end-of-stream sentinel; a source that simply runs out ends the stream too.

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::mpsc;

/// Anything that yields model tokens in order.
#[async_trait]
pub trait TokenSource: Send {
    /// The next token, or `None` once the source is exhausted.
    async fn next_token(&mut self) -> Option<String>;
}

#[async_trait]
impl TokenSource for mpsc::Receiver<String> {
    async fn next_token(&mut self) -> Option<String> {
        self.recv().await
    }
}

/// A scripted source over a fixed list of tokens.
#[derive(Debug, Clone, Default)]
pub struct VecTokenSource {
    tokens: VecDeque<String>,
}

impl VecTokenSource {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl TokenSource for VecTokenSource {
    async fn next_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }
}
