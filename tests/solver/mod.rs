//! Brute-force reference for the searcher tests.

use dodge_the_pile::{DodgeThePile, Game, Player};

/// Winner under perfect play from `state`, found by walking the whole game tree.
pub fn forced_winner(state: &DodgeThePile) -> Player {
    if let Some(winner) = state.outcome().unwrap() {
        return winner;
    }
    let mover = state.current_player();
    let mover_wins = state
        .legal_moves()
        .into_iter()
        .any(|action| forced_winner(&state.apply(action).unwrap()) == mover);
    if mover_wins {
        mover
    } else {
        mover.opponent()
    }
}

/// Every state reachable from `start`, `start` included.
pub fn reachable_states(start: &DodgeThePile) -> Vec<DodgeThePile> {
    let mut states = vec![];
    let mut stack = vec![start.clone()];
    while let Some(state) = stack.pop() {
        for action in state.legal_moves() {
            stack.push(state.apply(action).unwrap());
        }
        states.push(state);
    }
    states
}
