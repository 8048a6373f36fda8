//! # Dodge The Pile
//!
//! A Negamax game-tree searcher for two-player, perfect-information, zero-sum games, and the
//! shared-pool game "Dodge The Pile" it was written for.
//!
//! It provides:
//! - The [`Game`], [`Scorer`] and [`MoveSource`](game_interface::MoveSource) traits to plug a game in
//! - A depth-limited Negamax search with optional alpha-beta pruning ([`Negamax`])
//! - The game itself ([`DodgeThePile`])
//! - A match driver alternating between the searcher and an external move source
//!   ([`TurnController`](turn_controller::TurnController))
//!
//! # The game
//!
//! Players take turns adding a signed number to a shared score, starting at 0. Numbers are drawn
//! from one pool of magnitudes, `{1, 2, 3, 4, 6, 12}` by default: playing `+k` or `-k` removes
//! `k` from the pool for both players. When the pool is empty, PlayerA wins if the score is
//! negative and PlayerB wins otherwise.
//!
//! # Documentation Overview
//!
//! - For the game and search settings, and how to read them from the environment, see
//!   [`configuration`].
//! - For the search itself, see [`negamax`].
//! - For running a match and reporting its result, see [`turn_controller`].
//!
//! # Usage Example
//!
//! The searcher plays PlayerA against a PlayerB that always adds the largest number left:
//!
//! ```
//! use dodge_the_pile::anyhow;
//! use dodge_the_pile::prelude::*;
//!
//! struct Greedy;
//!
//! impl MoveSource<DodgeThePile> for Greedy {
//!     fn next_move(&mut self, state: &DodgeThePile) -> anyhow::Result<Move> {
//!         state
//!             .legal_moves()
//!             .last()
//!             .copied()
//!             .ok_or_else(|| anyhow::anyhow!("no move left"))
//!     }
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let config = ConfigurationBuilder::new().with_depth(6).build()?;
//!     let mut controller =
//!         TurnController::new(config.new_game(), &config, FlatScorer::default(), Greedy)?;
//!
//!     let report = controller.run()?;
//!     println!("{report}");
//!     assert_eq!(report.plies(), 6);
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub mod configuration;
pub mod dodge_the_pile;
mod error;
pub mod game_interface;
mod logger;
pub mod negamax;
pub mod scorer;
pub mod turn_controller;

pub use anyhow;
pub use dodge_the_pile::{DodgeThePile, Move};
pub use error::Error;
pub use game_interface::{Game, Player, Scorer};
pub use logger::init_logger;
pub use negamax::Negamax;

/// Commonly used types and traits for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use dodge_the_pile::prelude::*;
/// ```
pub mod prelude {
    pub use crate::configuration::{Configuration, ConfigurationBuilder};
    pub use crate::dodge_the_pile::{DodgeThePile, Move};
    pub use crate::error::Error;
    pub use crate::game_interface::{Game, GameFactory, MoveSource, Player, Scorer};
    pub use crate::negamax::{Negamax, SearchResult};
    pub use crate::scorer::{FlatScorer, MarginScorer};
    pub use crate::turn_controller::{MatchReport, ScriptedMoveSource, Side, TurnController};
}
