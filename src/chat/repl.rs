//! The interactive read-send-display loop.
//!
//! Each line read from the terminal is either skipped (blank), ends the
//! session (an exit keyword), or becomes one request.  The session's running
//! cost is an explicit [`SessionCost`] threaded through [`run_turn`] and
//! returned by [`run`].

use std::io;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::report::UsageReport;
use crate::chat::session::{ChatBackend, ChatSession};
use crate::cost::{PricingTier, SessionCost, TurnCost};
use crate::error::{Error, Result};
use crate::observability::{
    CHAT_SKIPPED_INPUTS, CHAT_TURN_FAILURES, CHAT_TURNS, CHAT_USAGE_MISSING,
};
use crate::render::Renderer;

/// Prompt shown before each line of input.
pub const PROMPT: &str = "You > ";

/// Words that end the session, compared case-insensitively.
pub const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

/// What to do with a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction<'a> {
    /// Blank line: prompt again without calling the API.
    Skip,
    /// Exit keyword: end the session.
    Exit,
    /// Anything else: send this (trimmed) text.
    Send(&'a str),
}

/// Decide what a line of input means.
pub fn classify_input(line: &str) -> InputAction<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        InputAction::Skip
    } else if EXIT_KEYWORDS
        .iter()
        .any(|kw| trimmed.eq_ignore_ascii_case(kw))
    {
        InputAction::Exit
    } else {
        InputAction::Send(trimmed)
    }
}

/// One read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input.
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// End of input.
    Eof,
}

/// A source of input lines.
pub trait LineSource {
    /// Show `prompt` and read one line.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Io(err)) => Err(Error::io("failed to read input", err)),
            Err(err) => Err(Error::io(
                "failed to read input",
                io::Error::other(err.to_string()),
            )),
        }
    }
}

/// How a turn ended.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// The reply came with usage; its cost was added to the session.
    Billed(TurnCost),
    /// The reply came without usage; nothing was added.
    Unbilled,
    /// The request failed; the session is unchanged.
    Failed(Error),
}

/// Send one input, display the reply, and bill it.
///
/// `cost` is only touched after a reply that carried usage metadata.
pub async fn run_turn<B, R>(
    session: &mut ChatSession<B>,
    cost: &mut SessionCost,
    tier: PricingTier,
    renderer: &mut R,
    input: &str,
) -> TurnOutcome
where
    B: ChatBackend,
    R: Renderer + ?Sized,
{
    renderer.start_waiting();
    let result = session.send(input).await;
    renderer.finish_waiting();

    let reply = match result {
        Ok(reply) => reply,
        Err(err) => {
            CHAT_TURN_FAILURES.click();
            renderer.print_error(&err.to_string());
            return TurnOutcome::Failed(err);
        }
    };
    CHAT_TURNS.click();
    renderer.print_reply(session.model().display_name(), &reply.text);

    let Some(usage) = reply.usage else {
        CHAT_USAGE_MISSING.click();
        return TurnOutcome::Unbilled;
    };
    let turn = tier.pricing().turn_cost(&usage);
    cost.record(&turn);
    renderer.print_usage(&UsageReport::new(session.model(), turn, cost, tier));
    TurnOutcome::Billed(turn)
}

/// Run the chat until the user exits, returning the session's cost.
///
/// End of input counts as an exit.  A terminal read error is reported and
/// also ends the loop, so the closing cost line is always printed.
pub async fn run<B, R, S>(
    session: &mut ChatSession<B>,
    renderer: &mut R,
    lines: &mut S,
    tier: PricingTier,
) -> SessionCost
where
    B: ChatBackend,
    R: Renderer + ?Sized,
    S: LineSource + ?Sized,
{
    let mut cost = SessionCost::new();
    renderer.print_banner(session.model());
    loop {
        let line = match lines.read_line(PROMPT) {
            Ok(ReadOutcome::Line(line)) => line,
            Ok(ReadOutcome::Interrupted) => continue,
            Ok(ReadOutcome::Eof) => break,
            Err(err) => {
                renderer.print_error(&format!("Input error: {err}"));
                break;
            }
        };
        match classify_input(&line) {
            InputAction::Skip => {
                CHAT_SKIPPED_INPUTS.click();
            }
            InputAction::Exit => break,
            InputAction::Send(text) => {
                run_turn(session, &mut cost, tier, renderer, text).await;
            }
        }
    }
    renderer.print_farewell(cost.total());
    cost
}
