//! Static evaluation functions.
//!
//! [`FlatScorer`] is the reference evaluation: a finished game is worth the win value to its
//! winner and minus the win value to the loser, anything unfinished is worth 0.
//! [`FlatScorer::with_loss_value`] gives the loser another value, e.g. the plain 0/100 reward.
//! [`MarginScorer`] grades unfinished Dodge The Pile positions by the current score instead.

use crate::dodge_the_pile::DodgeThePile;
use crate::error::Error;
use crate::game_interface::{Game, Player, Scorer};

/// Value of a won game for the reference evaluation.
pub const WIN_VALUE: i32 = 100;

/// Win/loss reward, no partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatScorer {
    win_value: i32,
    loss_value: i32,
}

impl FlatScorer {
    /// Scorer rewarding a win with `win_value` and a loss with `-win_value`.
    ///
    /// # Errors
    /// [`Error::Configuration`] if `win_value` is not positive.
    pub fn new(win_value: i32) -> Result<Self, Error> {
        if win_value <= 0 {
            return Err(Error::Configuration(format!(
                "win value must be positive, got {win_value}"
            )));
        }
        Ok(Self {
            win_value,
            loss_value: -win_value,
        })
    }

    /// Same scorer with a lost game worth `loss_value` instead of `-win_value`.
    ///
    /// With `loss_value` other than `-win_value` the reward is no longer zero-sum: the searcher
    /// still picks winning moves at full depth, but searching one state for both players no
    /// longer gives opposite scores.
    ///
    /// # Errors
    /// [`Error::Configuration`] if a loss would be worth as much as a win.
    pub fn with_loss_value(self, loss_value: i32) -> Result<Self, Error> {
        if loss_value >= self.win_value {
            return Err(Error::Configuration(format!(
                "loss value {loss_value} must be below the win value {}",
                self.win_value
            )));
        }
        Ok(Self { loss_value, ..self })
    }

    /// Value of a won game.
    pub fn win_value(&self) -> i32 {
        self.win_value
    }

    /// Value of a lost game.
    pub fn loss_value(&self) -> i32 {
        self.loss_value
    }
}

impl Default for FlatScorer {
    fn default() -> Self {
        Self {
            win_value: WIN_VALUE,
            loss_value: -WIN_VALUE,
        }
    }
}

impl<G: Game> Scorer<G> for FlatScorer {
    fn evaluate(&self, state: &G, perspective: Player) -> Result<i32, Error> {
        Ok(match state.outcome()? {
            Some(winner) if winner == perspective => self.win_value,
            Some(_) => self.loss_value,
            None => 0,
        })
    }
}

/// Finished games as [`FlatScorer`]; unfinished ones by how far the score leans towards the
/// perspective's goal (below zero for PlayerA, at or above zero for PlayerB).
///
/// The lean is clamped strictly inside the win value so that a sure win always beats a
/// comfortable lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarginScorer {
    flat: FlatScorer,
}

impl MarginScorer {
    /// Scorer rewarding a win with `win_value`.
    ///
    /// # Errors
    /// [`Error::Configuration`] if `win_value` is not positive.
    pub fn new(win_value: i32) -> Result<Self, Error> {
        Ok(Self {
            flat: FlatScorer::new(win_value)?,
        })
    }
}

impl Scorer<DodgeThePile> for MarginScorer {
    fn evaluate(&self, state: &DodgeThePile, perspective: Player) -> Result<i32, Error> {
        if state.is_terminal() {
            return self.flat.evaluate(state, perspective);
        }
        let bound = i64::from(self.flat.win_value - 1);
        let lean_to_b = state.score().clamp(-bound, bound);
        // bound fits an i32
        let lean_to_b = lean_to_b as i32;
        Ok(match perspective {
            Player::PlayerA => -lean_to_b,
            Player::PlayerB => lean_to_b,
        })
    }
}
