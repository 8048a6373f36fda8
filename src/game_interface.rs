//! Module defining traits that need to be implemented to plug a game into the searcher

use std::fmt::{self, Debug, Display};

use crate::error::Error;

/// One of the two players of a zero-sum game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    /// First player. In Dodge The Pile, wins with a negative final score.
    PlayerA,
    /// Second player. In Dodge The Pile, wins with a non-negative final score.
    PlayerB,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::PlayerA => Player::PlayerB,
            Player::PlayerB => Player::PlayerA,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::PlayerA => 0,
            Player::PlayerB => 1,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::PlayerA => f.write_str("PlayerA"),
            Player::PlayerB => f.write_str("PlayerB"),
        }
    }
}

/// What the game should implement
///
/// States are values: [`apply`](Game::apply) returns the successor and leaves `self` untouched, so
/// every branch of the search owns its own state.
pub trait Game: Clone + Debug + Display {
    /// What should be played to make the game progress.
    type Move: Copy + Eq + Debug + Display;

    /// Every move the player to move may play, in a stable order.
    ///
    /// The order is the search's tie-break order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Returns the state reached by playing `action`.
    ///
    /// # Errors
    /// [`Error::IllegalMove`] when `action` is not in [`legal_moves`](Game::legal_moves).
    fn apply(&self, action: Self::Move) -> Result<Self, Error>;

    /// The player that should play now
    fn current_player(&self) -> Player;

    /// True if the game is finished
    fn is_terminal(&self) -> bool;

    /// The winner of a finished game, `None` while the game is running.
    ///
    /// # Errors
    /// [`Error::InvariantViolation`] when a finished state has no single winner.
    fn outcome(&self) -> Result<Option<Player>, Error>;

    /// Game score, reported at the end of the match.
    fn score(&self) -> i64;
}

/// Evaluates a state without looking ahead.
///
/// Implementations must be zero-sum: `evaluate(s, p) == -evaluate(s, p.opponent())`.
pub trait Scorer<G: Game> {
    /// Value of `state` for `perspective`.
    fn evaluate(&self, state: &G, perspective: Player) -> Result<i32, Error>;
}

/// Where moves of the non-automated side come from (a human, a transcript, another program).
///
/// The returned move is checked by [`Game::apply`]; anything illegal is reported to the caller
/// of the turn controller, not corrected.
pub trait MoveSource<G: Game> {
    /// Chooses the move to play in `state`.
    fn next_move(&mut self, state: &G) -> anyhow::Result<G::Move>;
}

/// What will be given to the controller to allow it to create games
pub trait GameFactory<G: Game> {
    /// Returns an initialized game
    fn new_game(&self) -> G;
}

#[cfg(test)]
mod interface_tests {
    use super::*;

    /// Take-away counter: players remove one or two tokens, whoever takes the last one wins.
    #[derive(Debug, Clone, PartialEq)]
    struct Nim {
        tokens: u32,
        turn: Player,
    }

    impl Display for Nim {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} tokens, {} to play", self.tokens, self.turn)
        }
    }

    impl Game for Nim {
        type Move = u32;

        fn legal_moves(&self) -> Vec<u32> {
            (1..=self.tokens.min(2)).collect()
        }

        fn apply(&self, action: u32) -> Result<Self, Error> {
            if !self.legal_moves().contains(&action) {
                return Err(Error::illegal_move(action, self));
            }
            Ok(Nim {
                tokens: self.tokens - action,
                turn: self.turn.opponent(),
            })
        }

        fn current_player(&self) -> Player {
            self.turn
        }

        fn is_terminal(&self) -> bool {
            self.tokens == 0
        }

        fn outcome(&self) -> Result<Option<Player>, Error> {
            Ok(self.is_terminal().then(|| self.turn.opponent()))
        }

        fn score(&self) -> i64 {
            0
        }
    }

    struct Factory;

    impl GameFactory<Nim> for Factory {
        fn new_game(&self) -> Nim {
            Nim {
                tokens: 4,
                turn: Player::PlayerA,
            }
        }
    }

    fn make_game<G: Game, F: GameFactory<G>>(factory: &F) -> G {
        factory.new_game()
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::PlayerA.opponent(), Player::PlayerB);
        assert_eq!(Player::PlayerB.opponent().opponent(), Player::PlayerB);
        assert_ne!(Player::PlayerA.index(), Player::PlayerB.index());
    }

    #[test]
    fn test_factory() {
        let game = make_game(&Factory);
        assert_eq!(game.legal_moves(), vec![1, 2]);
        assert_eq!(game.outcome().unwrap(), None);
    }

    struct GreedySource;

    impl MoveSource<Nim> for GreedySource {
        fn next_move(&mut self, state: &Nim) -> anyhow::Result<u32> {
            state
                .legal_moves()
                .last()
                .copied()
                .ok_or_else(|| anyhow::anyhow!("no tokens left"))
        }
    }

    #[test]
    fn test_move_source() {
        let game = make_game(&Factory);
        let action = GreedySource.next_move(&game).unwrap();
        assert_eq!(game.apply(action).unwrap().tokens, 2);
    }

    #[test]
    fn test_illegal_move() {
        let game = make_game(&Factory);
        assert!(matches!(game.apply(3), Err(Error::IllegalMove { .. })));
    }
}
