//! Match driver.
//!
//! The [`TurnController`] holds the authoritative game state. Each turn it asks the searcher for
//! a move when the player to move is [`Side::Automated`], or the external [`MoveSource`] when it
//! is [`Side::External`], applies the move and checks whether the game is over.
//!
//! An illegal move from the external source is reported as [`Error::IllegalMove`] and leaves the
//! state untouched: calling [`step`](TurnController::step) or [`run`](TurnController::run) again
//! asks the source for another move.

use std::collections::VecDeque;
use std::fmt::{self, Display};

use anyhow::anyhow;
use tracing::{debug, info, instrument, trace, warn};

use crate::configuration::Configuration;
use crate::error::Error;
use crate::game_interface::{Game, MoveSource, Player, Scorer};
use crate::logger::init_logger;
use crate::negamax::Negamax;

/// Who chooses the moves of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The searcher.
    Automated,
    /// The external move source.
    External,
}

/// What is reported once a match is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport<M> {
    /// Winner of the game, `None` if the match stopped before the end.
    pub winner: Option<Player>,
    /// Game score when the match stopped.
    pub final_score: i64,
    /// Search depth used by the automated side.
    pub depth_searched: u32,
    /// Moves played, in order.
    pub history: Vec<(Player, M)>,
}

impl<M> MatchReport<M> {
    /// Number of moves played.
    pub fn plies(&self) -> usize {
        self.history.len()
    }
}

impl<M> Display for MatchReport<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let winner = self
            .winner
            .map_or_else(|| "none".to_owned(), |p| p.to_string());
        write!(
            f,
            "winner: {winner}, final score: {}, depth searched: {}, plies: {}",
            self.final_score,
            self.depth_searched,
            self.plies()
        )
    }
}

/// Replays a fixed list of moves, e.g. a transcript of a human's choices.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoveSource<M> {
    moves: VecDeque<M>,
    played: usize,
}

impl<M> ScriptedMoveSource<M> {
    /// Source answering with `moves`, in order.
    pub fn new(moves: impl IntoIterator<Item = M>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            played: 0,
        }
    }

    /// Moves not handed out yet.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl<G: Game> MoveSource<G> for ScriptedMoveSource<G::Move> {
    fn next_move(&mut self, _state: &G) -> anyhow::Result<G::Move> {
        let action = self
            .moves
            .pop_front()
            .ok_or_else(|| anyhow!("transcript exhausted after {} moves", self.played))?;
        self.played += 1;
        Ok(action)
    }
}

/// Drives a match between the searcher and an external move source.
pub struct TurnController<G: Game, S, M> {
    state: G,
    searcher: Negamax<S>,
    source: M,
    sides: [Side; 2],
    history: Vec<(Player, G::Move)>,
}

impl<G, S, M> TurnController<G, S, M>
where
    G: Game,
    S: Scorer<G>,
    M: MoveSource<G>,
{
    /// Creates a controller starting from `game`, with `config` deciding which player is
    /// automated and how the searcher is set up.
    ///
    /// Installs the file logger when `config.log()` is set.
    ///
    /// # Errors
    /// [`Error::Configuration`] when the log file cannot be set up.
    #[instrument(skip_all)]
    pub fn new(game: G, config: &Configuration, scorer: S, source: M) -> Result<Self, Error> {
        if config.log {
            init_logger().map_err(|e| Error::Configuration(format!("{e:#}")))?;
        }
        trace!(?config);

        let mut sides = [Side::External; 2];
        sides[config.automated.index()] = Side::Automated;

        Ok(TurnController {
            state: game,
            searcher: Negamax::from_configuration(scorer, config),
            source,
            sides,
            history: vec![],
        })
    }

    /// Replaces the side of `player`, e.g. to let the searcher play both players.
    #[must_use]
    pub fn with_side(mut self, player: Player, side: Side) -> Self {
        self.sides[player.index()] = side;
        self
    }

    /// Current state of the game.
    pub fn state(&self) -> &G {
        &self.state
    }

    /// Side of `player`.
    pub fn side(&self, player: Player) -> Side {
        self.sides[player.index()]
    }

    /// Moves played so far.
    pub fn history(&self) -> &[(Player, G::Move)] {
        &self.history
    }

    /// Plays one move. Returns `None` once the game is over.
    ///
    /// # Errors
    /// - [`Error::IllegalMove`] when the external source returned an illegal move. Nothing is
    ///   applied, the next call asks the source again.
    /// - [`Error::MoveSource`] when the external source failed.
    /// - [`Error::InvariantViolation`] from the game or the searcher. Fatal.
    #[instrument(skip_all, fields(ply = self.history.len()))]
    pub fn step(&mut self) -> Result<Option<G::Move>, Error> {
        if self.state.is_terminal() {
            return Ok(None);
        }

        let mover = self.state.current_player();
        let action = match self.sides[mover.index()] {
            Side::Automated => {
                let result = self.searcher.search(&self.state, mover)?;
                debug!(%mover, score = result.score, nodes = result.nodes, "searched");
                result.best_move.ok_or_else(|| {
                    Error::invariant("search returned no move for a running game", &self.state)
                })?
            }
            Side::External => self
                .source
                .next_move(&self.state)
                .map_err(Error::MoveSource)?,
        };

        let next = self.state.apply(action).inspect_err(|e| {
            warn!(%mover, %action, "move rejected: {e}");
        })?;
        trace!(%mover, %action, state = %next, "move applied");

        self.history.push((mover, action));
        self.state = next;
        Ok(Some(action))
    }

    /// Plays until the game is over and reports the result.
    ///
    /// # Errors
    /// See [`step`](Self::step). The match can be resumed after a recoverable error.
    #[instrument(skip_all)]
    pub fn run(&mut self) -> Result<MatchReport<G::Move>, Error> {
        info!(state = %self.state, "match running");
        while self.step()?.is_some() {}

        let report = self.report()?;
        info!(%report, "match finished");
        Ok(report)
    }

    /// Result of the match so far.
    ///
    /// # Errors
    /// [`Error::InvariantViolation`] when the game is over without a single winner.
    pub fn report(&self) -> Result<MatchReport<G::Move>, Error> {
        Ok(MatchReport {
            winner: self.state.outcome()?,
            final_score: self.state.score(),
            depth_searched: self.searcher.depth(),
            history: self.history.clone(),
        })
    }
}
