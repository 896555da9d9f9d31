//! Interactive yes/no gate in front of the analysis run.

use std::io::{BufRead, Write};

use crate::error::FrontendError;

/// Prompt printed while waiting for an answer.
pub const PROMPT: &str = "Run the analysis? (y/n) ";

/// State of the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No decisive answer yet.
    AwaitingInput,
    /// The user answered `y`.
    Confirmed,
    /// The user answered `n`.
    Aborted,
}

impl GateState {
    /// Applies one input line to the state.
    ///
    /// Terminal states ignore further input.
    #[must_use]
    pub fn on_line(self, line: &str) -> Self {
        if self != GateState::AwaitingInput {
            return self;
        }
        match line.trim().to_lowercase().as_str() {
            "y" => GateState::Confirmed,
            "n" => GateState::Aborted,
            _ => GateState::AwaitingInput,
        }
    }

    /// Whether the gate has reached a decision.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GateState::AwaitingInput
    }
}

/// Outcome of a confirmation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Terminal state reached.
    pub state: GateState,
    /// Number of times the prompt was repeated after an unrecognized answer.
    pub reprompts: usize,
}

/// Prompts on `writer` and reads answers from `input` until a decision.
///
/// # Errors
///
/// Returns [`FrontendError::InputExhausted`] (wrapped in `anyhow`) when
/// `input` ends before a decision, or any I/O error.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, writer: &mut W) -> anyhow::Result<Decision> {
    let mut state = GateState::AwaitingInput;
    let mut reprompts = 0;
    let mut line = Vec::new();

    write!(writer, "{PROMPT}")?;
    writer.flush()?;
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            writeln!(writer)?;
            return Err(FrontendError::InputExhausted.into());
        }
        // Undecodable bytes are just another unrecognized answer.
        state = state.on_line(&String::from_utf8_lossy(&line));
        if state.is_terminal() {
            tracing::debug!(?state, reprompts, "confirmation gate closed");
            return Ok(Decision { state, reprompts });
        }
        reprompts += 1;
        write!(writer, "{PROMPT}")?;
        writer.flush()?;
    }
}
