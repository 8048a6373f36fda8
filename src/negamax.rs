//! Depth-limited Negamax search with optional alpha-beta pruning.
//!
//! The search works on any [`Game`] and evaluates leaves with a [`Scorer`]. It is a plain
//! recursive depth-first walk: every frame owns the successor states it creates, nothing is
//! shared between branches.
//!
//! # Example
//!
//! ```
//! use dodge_the_pile::prelude::*;
//!
//! let game = Configuration::default().new_game();
//! let searcher = Negamax::new(FlatScorer::default(), 6);
//! let result = searcher.search(&game, game.current_player()).unwrap();
//! assert!(result.best_move.is_some());
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::configuration::Configuration;
use crate::error::Error;
use crate::game_interface::{Game, Player, Scorer};

// Bounds of the alpha-beta window. Symmetric so that negating never overflows.
const INFINITY: i32 = i32::MAX;

/// What a search found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Value of the searched state, from the perspective given to [`Negamax::search`].
    pub score: i32,
    /// Best move for the player to move. `None` when the search did not look ahead (depth 0 or
    /// finished game).
    pub best_move: Option<M>,
    /// Number of states visited, root included.
    pub nodes: u64,
    /// True if the action timeout interrupted the search. `best_move` is then the best move
    /// fully evaluated before the interruption.
    pub timed_out: bool,
}

/// Negamax searcher.
#[derive(Debug, Clone)]
pub struct Negamax<S> {
    scorer: S,
    depth: u32,
    pruning: bool,
    action_timeout: Option<Duration>,
}

// Why a branch stopped before producing a value.
enum Abort {
    Deadline,
    Failed(Error),
}

impl From<Error> for Abort {
    fn from(e: Error) -> Self {
        Abort::Failed(e)
    }
}

struct Context {
    deadline: Option<Instant>,
    nodes: u64,
}

impl Context {
    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl<S> Negamax<S> {
    /// Searcher looking `depth` plies ahead, with pruning and without time limit.
    ///
    /// A depth of 0 only evaluates the state it is given.
    pub fn new(scorer: S, depth: u32) -> Self {
        Self {
            scorer,
            depth,
            pruning: true,
            action_timeout: None,
        }
    }

    /// Searcher set up from the depth, pruning and timeout of `config`.
    pub fn from_configuration(scorer: S, config: &Configuration) -> Self {
        Self {
            scorer,
            depth: config.depth,
            pruning: config.pruning,
            action_timeout: config.action_timeout,
        }
    }

    /// Enable or disable alpha-beta pruning.
    #[must_use]
    pub fn with_pruning(self, value: bool) -> Self {
        Self {
            pruning: value,
            ..self
        }
    }

    /// Limits the time spent in one call to [`search`](Self::search).
    #[must_use]
    pub fn with_action_timeout(self, duration: Duration) -> Self {
        Self {
            action_timeout: Some(duration),
            ..self
        }
    }

    /// Search depth in plies.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Finds the best move for the player to move in `state`.
    ///
    /// The returned score is the value of `state` for `perspective`: searching the same state
    /// for both players gives opposite scores and the same move. Among equally good moves the
    /// first one in [`Game::legal_moves`] order is chosen.
    ///
    /// # Errors
    /// [`Error::InvariantViolation`] when a running game has no legal move, and any error of
    /// the game or the scorer.
    pub fn search<G>(&self, state: &G, perspective: Player) -> Result<SearchResult<G::Move>, Error>
    where
        G: Game,
        S: Scorer<G>,
    {
        let mover = state.current_player();
        let sign = if perspective == mover { 1 } else { -1 };
        let mut ctx = Context {
            deadline: self.action_timeout.map(|timeout| Instant::now() + timeout),
            nodes: 1,
        };

        if self.depth == 0 || state.is_terminal() {
            return Ok(SearchResult {
                score: self.scorer.evaluate(state, perspective)?,
                best_move: None,
                nodes: ctx.nodes,
                timed_out: false,
            });
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::invariant("no legal move in a running game", state));
        }

        let mut best: Option<(G::Move, i32)> = None;
        let mut alpha = -INFINITY;
        let mut timed_out = false;
        for &action in &moves {
            let child = state.apply(action)?;
            let value = match self.negamax(&mut ctx, &child, self.depth - 1, -INFINITY, -alpha) {
                Ok(value) => -value,
                Err(Abort::Deadline) => {
                    timed_out = true;
                    break;
                }
                Err(Abort::Failed(e)) => return Err(e),
            };
            trace!(%action, value, "root move evaluated");
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((action, value));
            }
            if self.pruning && value > alpha {
                alpha = value;
            }
        }

        let (best_move, value) = match best {
            Some(best) => best,
            // interrupted before any move was evaluated
            None => (moves[0], self.scorer.evaluate(state, mover)?),
        };
        if timed_out {
            warn!(%best_move, nodes = ctx.nodes, "search interrupted by the action timeout");
        }
        debug!(
            depth = self.depth,
            nodes = ctx.nodes,
            %best_move,
            value,
            pruning = self.pruning,
            "search finished"
        );

        Ok(SearchResult {
            score: sign * value,
            best_move: Some(best_move),
            nodes: ctx.nodes,
            timed_out,
        })
    }

    // Value of `state` for the player to move. With pruning, values outside (alpha, beta) are
    // bounds: at most alpha when failing low, at least beta when failing high.
    fn negamax<G>(
        &self,
        ctx: &mut Context,
        state: &G,
        depth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, Abort>
    where
        G: Game,
        S: Scorer<G>,
    {
        ctx.nodes += 1;
        if ctx.expired() {
            return Err(Abort::Deadline);
        }

        if depth == 0 || state.is_terminal() {
            return Ok(self.scorer.evaluate(state, state.current_player())?);
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::invariant("no legal move in a running game", state).into());
        }

        let mut best = -INFINITY;
        for action in moves {
            let child = state.apply(action)?;
            let value = -self.negamax(ctx, &child, depth - 1, -beta, -alpha)?;
            if value > best {
                best = value;
            }
            if self.pruning {
                if best > alpha {
                    alpha = best;
                }
                if alpha >= beta {
                    break;
                }
            }
        }
        Ok(best)
    }
}
