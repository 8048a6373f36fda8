//! Error type shared by the game model, the searcher and the turn controller.

use std::fmt::Display;

/// Everything that can go wrong while setting up or playing a match.
///
/// Errors carry a rendered snapshot of the state they happened in, so that a failing match can
/// be turned into a test case.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A move that is not currently legal was presented to [`Game::apply`](crate::game_interface::Game::apply).
    ///
    /// Recoverable: the state the move was applied to is left untouched.
    #[error("illegal move {action} in state [{state}]")]
    IllegalMove {
        /// The offending move.
        action: String,
        /// Snapshot of the state the move was applied to.
        state: String,
    },

    /// The state transition logic broke one of its own guarantees. Fatal.
    #[error("invariant violation: {reason} (state: [{state}])")]
    InvariantViolation {
        /// What went wrong.
        reason: String,
        /// Snapshot of the state where the violation was detected.
        state: String,
    },

    /// The configuration is unusable (non-positive depth, empty or malformed move alphabet, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The external move source failed to produce a move.
    #[error("move source failed: {0:#}")]
    MoveSource(anyhow::Error),
}

impl Error {
    pub(crate) fn illegal_move(action: impl Display, state: impl Display) -> Self {
        Error::IllegalMove {
            action: action.to_string(),
            state: state.to_string(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>, state: impl Display) -> Self {
        Error::InvariantViolation {
            reason: reason.into(),
            state: state.to_string(),
        }
    }

    /// True for errors that indicate a bug rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvariantViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_move_message_contains_context() {
        let err = Error::illegal_move(-12, "Score: 12, possible moves: [-1, 1]");
        let msg = err.to_string();
        assert!(msg.contains("-12"));
        assert!(msg.contains("Score: 12"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn invariant_violation_is_fatal() {
        let err = Error::invariant("no legal move", "Score: 0");
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("invariant violation: no legal move"));
    }

    #[test]
    fn move_source_keeps_the_cause_chain() {
        let cause = anyhow::anyhow!("stdin closed").context("reading move");
        let msg = Error::MoveSource(cause).to_string();
        assert_eq!(msg, "move source failed: reading move: stdin closed");
    }
}
