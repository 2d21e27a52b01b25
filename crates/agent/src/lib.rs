//! The petal conversation runtime.
//!
//! Two independent pieces meet here:
//!
//! 1. **Streaming** — tokens from a model are pulled from a `TokenSource`
//!    and reassembled into readable text (`assembler`, `streaming`)
//! 2. **Objectives** — the task's missing objectives drive what the petal
//!    asks the user next (`prompt`, `session`)
//!
//! The orchestrator calls both; neither calls the other.

pub mod assembler;
pub mod prompt;
pub mod session;
pub mod stream_event;
pub mod streaming;

pub use assembler::{TokenKind, assemble, assemble_all, classify, is_small_number};
pub use prompt::PromptBuilder;
pub use session::{NextStep, Session, next_step};
pub use stream_event::StreamEvent;
pub use streaming::{channel_source, stream_response};
