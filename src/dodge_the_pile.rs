//! "Dodge The Pile": the shared-pool game the searcher plays.
//!
//! Both players add a signed number to a shared score. Numbers come from one pool of magnitudes
//! shared by both players: playing `+k` or `-k` strikes `k` from the pool for the rest of the
//! game. Once the pool is empty the game is over, PlayerA wins if the score is negative and
//! PlayerB wins otherwise.

use std::{
    collections::BTreeSet,
    fmt::{self, Display},
    num::ParseIntError,
    str::FromStr,
};

use crate::configuration::{validate_magnitudes, Configuration};
use crate::error::Error;
use crate::game_interface::{Game, GameFactory, Player};

/// A signed number added to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(pub i64);

impl Move {
    /// Magnitude struck from the pool when this move is played.
    ///
    /// `None` when the value does not fit a pool magnitude, such a move is never legal.
    pub fn magnitude(self) -> Option<u32> {
        u32::try_from(self.0.unsigned_abs()).ok()
    }

    /// The same magnitude with the opposite sign.
    ///
    /// `Move(i64::MIN)` has no opposite and is returned unchanged; it is never legal anyway.
    pub fn negated(self) -> Move {
        Move(self.0.wrapping_neg())
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// Parses a signed integer such as `"-12"` or `"+3"`. Does not check legality.
impl FromStr for Move {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Move)
    }
}

/// State of a game of Dodge The Pile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DodgeThePile {
    score: i64,
    available: BTreeSet<u32>,
    turn: Player,
}

impl DodgeThePile {
    /// Starts a game with score 0 over the given magnitudes.
    ///
    /// # Errors
    /// [`Error::Configuration`] when `magnitudes` is empty, contains 0 or a duplicate.
    pub fn new(magnitudes: &[u32], first_player: Player) -> Result<Self, Error> {
        validate_magnitudes(magnitudes)?;
        Ok(Self {
            score: 0,
            available: magnitudes.iter().copied().collect(),
            turn: first_player,
        })
    }

    /// Magnitudes still in the pool, ascending.
    pub fn available(&self) -> impl Iterator<Item = u32> + '_ {
        self.available.iter().copied()
    }

    /// True if `action` can be played now.
    pub fn is_legal(&self, action: Move) -> bool {
        action
            .magnitude()
            .is_some_and(|magnitude| self.available.contains(&magnitude))
    }

    fn player_a_wins(&self) -> bool {
        self.available.is_empty() && self.score < 0
    }

    fn player_b_wins(&self) -> bool {
        self.available.is_empty() && self.score >= 0
    }
}

impl Game for DodgeThePile {
    type Move = Move;

    /// Ascending magnitude, negative sign first: `-1, +1, -2, +2, ...`
    fn legal_moves(&self) -> Vec<Move> {
        self.available
            .iter()
            .flat_map(|&magnitude| {
                let magnitude = i64::from(magnitude);
                [Move(-magnitude), Move(magnitude)]
            })
            .collect()
    }

    fn apply(&self, action: Move) -> Result<Self, Error> {
        let Some(magnitude) = action.magnitude().filter(|m| self.available.contains(m)) else {
            return Err(Error::illegal_move(action, self));
        };

        let mut available = self.available.clone();
        available.remove(&magnitude);
        Ok(Self {
            score: self.score + action.0,
            available,
            turn: self.turn.opponent(),
        })
    }

    fn current_player(&self) -> Player {
        self.turn
    }

    fn is_terminal(&self) -> bool {
        self.available.is_empty()
    }

    fn outcome(&self) -> Result<Option<Player>, Error> {
        if !self.is_terminal() {
            return Ok(None);
        }
        match (self.player_a_wins(), self.player_b_wins()) {
            (true, false) => Ok(Some(Player::PlayerA)),
            (false, true) => Ok(Some(Player::PlayerB)),
            (a, b) => Err(Error::invariant(
                format!("finished game with PlayerA winning: {a}, PlayerB winning: {b}"),
                self,
            )),
        }
    }

    fn score(&self) -> i64 {
        self.score
    }
}

impl Display for DodgeThePile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves = self
            .legal_moves()
            .iter()
            .map(|m| m.0.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Score: {}, possible moves: [{moves}], {} to play",
            self.score, self.turn
        )
    }
}

impl GameFactory<DodgeThePile> for Configuration {
    fn new_game(&self) -> DodgeThePile {
        // magnitudes were validated when the configuration was built
        DodgeThePile {
            score: 0,
            available: self.magnitudes.iter().copied().collect(),
            turn: self.first_player,
        }
    }
}
