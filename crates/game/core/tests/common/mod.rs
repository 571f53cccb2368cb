//! Shared helpers for the integration suites.
#![allow(dead_code)]

use istanbul_core::{
    Action, ActionError, Card, Facility, GameEngine, GameSetup, GameState, Good, GoodCount,
    Location, MoveAction, PlayerColor,
};

pub fn loc(n: u8) -> Location {
    Location::new(n).unwrap()
}

/// A game on the standard layout with one seat per starting card, in the
/// order Red, Blue, Green.
pub fn new_game(starting_cards: Vec<Card>) -> GameState {
    new_game_with_layout(starting_cards, None)
}

pub fn new_game_with_layout(
    starting_cards: Vec<Card>,
    layout: Option<Vec<(Location, Facility)>>,
) -> GameState {
    let players: Vec<PlayerColor> = [PlayerColor::Red, PlayerColor::Blue, PlayerColor::Green]
        .into_iter()
        .take(starting_cards.len())
        .collect();
    assert_eq!(players.len(), starting_cards.len());
    GameState::new(GameSetup {
        players,
        layout,
        small_market_demand: GoodCount::of(&[(Good::Red, 3), (Good::Blue, 2)]),
        large_market_demand: GoodCount::of(&[(Good::Green, 3), (Good::Yellow, 2)]),
        governor_location: loc(12),
        smuggler_location: loc(9),
        starting_cards,
    })
    .unwrap()
}

/// The standard layout with the facilities at two locations swapped.
pub fn swapped_layout(a: u8, b: u8) -> Vec<(Location, Facility)> {
    let mut pairs: Vec<(Location, Facility)> =
        Location::all().zip(Facility::ALL).collect();
    let fa = pairs[(a - 1) as usize].1;
    pairs[(a - 1) as usize].1 = pairs[(b - 1) as usize].1;
    pairs[(b - 1) as usize].1 = fa;
    pairs
}

pub fn apply(state: &mut GameState, action: Action) -> Result<(), ActionError> {
    GameEngine::new(state).apply(&action)
}

pub fn apply_ok(state: &mut GameState, action: Action) {
    if let Err(err) = apply(state, action) {
        panic!("action rejected: {err}");
    }
}

pub fn move_to(n: u8) -> Action {
    Action::Move(MoveAction {
        to: loc(n),
        skip_assistant: false,
    })
}

pub fn move_skipping_assistant(n: u8) -> Action {
    Action::Move(MoveAction {
        to: loc(n),
        skip_assistant: true,
    })
}

/// Burns the current player's turn: a one-cell move without an assistant,
/// then an immediate yield.
pub fn pass_turn(state: &mut GameState) {
    let player = state.current_player();
    let from = state.player_state(player).unwrap().location;
    let to = Location::all()
        .find(|&l| from.distance(l) == 1)
        .expect("every cell has a neighbor");
    apply_ok(state, move_skipping_assistant(to.get()));
    apply_ok(state, Action::YieldTurn);
}
