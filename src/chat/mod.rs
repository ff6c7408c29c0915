//! Chat application module for interactive conversations with Gemini.
//!
//! This module provides a REPL chat interface built on top of the gemchat
//! client library. It supports:
//!
//! - A growing transcript sent with every request
//! - Bordered reply panels with light markdown styling
//! - A per-turn usage table with running session cost
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Transcript ownership and API interaction
//! - [`report`]: Usage report data for each billed turn
//! - [`repl`]: The read-send-display loop

mod config;
mod repl;
mod report;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use config::{ChatArgs, ChatConfig, DEFAULT_MODEL};
pub use repl::{
    EXIT_KEYWORDS, InputAction, LineSource, PROMPT, ReadOutcome, TurnOutcome, classify_input, run,
    run_turn,
};
pub use report::UsageReport;
pub use session::{ChatBackend, ChatSession, TurnReply};
