//! Deterministic rules engine for the Istanbul board game.
//!
//! The crate is a pure state machine: callers construct a [`GameState`]
//! from a [`GameSetup`], then drive it one [`Action`] at a time through a
//! [`GameEngine`]. All randomness (dice, card draws) happens outside and
//! is reported in the actions themselves, so the same action sequence
//! always replays to the same state.
//!
//! Layering, bottom up:
//! - [`state::types`] and [`board`]: goods, cards, dice, the 4x4 grid.
//! - [`facility`]: per-location state machines (markets, mosques, ...).
//! - [`state`]: players, the turn machine, and the aggregate game state.
//! - [`engine`]: the action dispatcher tying it all together.

pub mod action;
pub mod board;
pub mod engine;
pub mod facility;
pub mod state;

pub use action::{
    Action, CaravansaryGain, GovernorCost, MarketSale, MoveAction, RewardChoice, SmugglerCost,
};
pub use board::{Board, Facility, LayoutError, Location};
pub use engine::{ActionError, GameEngine};
pub use facility::{FacilityError, FacilityKindState, FacilityState};
pub use state::types::{
    Card, DiceOutcome, Good, GoodCount, GoodSet, Hand, PlayerColor, PlayerSet, RedTileMethod, Roll,
};
pub use state::{
    GameSetup, GameState, Phase, PlayerRank, PlayerState, Score, SetupError, TurnError, TurnState,
};
