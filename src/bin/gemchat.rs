//! Interactive chat application for conversing with Gemini.
//!
//! Every reply is followed by a table of the turn's token usage, its cost,
//! and the running cost of the session.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage; the key comes from the environment
//! GEMINI_API_KEY=... gemchat
//!
//! # Bill at the long-context tier
//! gemchat --long-context
//!
//! # Disable colors (useful for piping output)
//! gemchat --no-color
//!
//! # Keep a JSON-lines record of API traffic
//! gemchat --log-file traffic.jsonl
//! ```
//!
//! Type `exit` or `quit` (any case) to leave; the session's total cost is
//! printed on the way out.

use std::process::ExitCode;

use arrrg::CommandLine;
use rustyline::DefaultEditor;

use gemchat::chat::{self, ChatArgs, ChatConfig, ChatSession, PlainTextRenderer};

/// Main entry point for the gemchat application.
#[tokio::main]
async fn main() -> ExitCode {
    let (args, _) = ChatArgs::from_command_line_relaxed("gemchat [OPTIONS]");
    let config = match ChatConfig::from_args(args, None) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let client = match config.build_client() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("failed to initialize line editor: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = ChatSession::new(client, config.model.clone());
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    chat::run(
        &mut session,
        &mut renderer,
        &mut editor,
        config.pricing_tier,
    )
    .await;
    ExitCode::SUCCESS
}
