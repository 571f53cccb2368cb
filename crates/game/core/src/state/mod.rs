//! Aggregate game state: board, facilities, players, and the turn machine.

pub mod player;
pub mod turn;
pub mod types;

pub use player::{MAX_ASSISTANTS, PlayerState};
pub use turn::{Phase, TurnError, TurnState};

use crate::board::{Board, Facility, LayoutError, Location};
use crate::facility::{FacilityError, FacilityKindState, FacilityState};
use crate::state::types::{Card, GoodCount, PlayerColor, PlayerSet};

/// Everything needed to start a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSetup {
    /// Seating order; the first entry takes the first turn.
    pub players: Vec<PlayerColor>,
    /// Explicit board layout, or `None` for the standard one.
    pub layout: Option<Vec<(Location, Facility)>>,
    pub small_market_demand: GoodCount,
    pub large_market_demand: GoodCount,
    pub governor_location: Location,
    pub smuggler_location: Location,
    /// Starting card per player, aligned with `players`.
    pub starting_cards: Vec<Card>,
}

/// Errors raised while constructing a game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("{count} players, the game seats 2 to 5")]
    PlayerCount { count: usize },

    #[error("player {player} is seated twice")]
    DuplicatePlayer { player: PlayerColor },

    #[error("{cards} starting cards for {players} players")]
    StartingCardMismatch { players: usize, cards: usize },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("market demand is invalid: {0}")]
    Demand(#[from] FacilityError),
}

/// A player's score as compared at game end, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    pub rubies: u8,
    pub lira: u32,
    pub cart_goods: u8,
    pub hand_cards: u8,
}

/// One row of the final ranking. Equal scores share a rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRank {
    pub player: PlayerColor,
    /// 1-based; ties share the rank of the best tied player.
    pub rank: usize,
    pub score: Score,
}

/// The full state of one game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    players: Vec<PlayerColor>,
    board: Board,
    /// Indexed by `Facility::index`.
    facility_states: [FacilityState; 16],
    /// Aligned with `players`.
    player_states: Vec<PlayerState>,
    pub(crate) turn: TurnState,
    victory_threshold: u8,
    /// Reward choices owed for captured family members. A yield is
    /// blocked while any are outstanding.
    pub(crate) outstanding_reward_choices: u8,
    pub(crate) completed: bool,
}

impl GameState {
    pub fn new(setup: GameSetup) -> Result<Self, SetupError> {
        let count = setup.players.len();
        if !(2..=5).contains(&count) {
            return Err(SetupError::PlayerCount { count });
        }
        let mut seen = PlayerSet::EMPTY;
        for &player in &setup.players {
            if seen.contains(player) {
                return Err(SetupError::DuplicatePlayer { player });
            }
            seen.insert(player);
        }
        if setup.starting_cards.len() != count {
            return Err(SetupError::StartingCardMismatch {
                players: count,
                cards: setup.starting_cards.len(),
            });
        }

        let board = match setup.layout {
            Some(layout) => Board::from_layout(layout)?,
            None => Board::standard(),
        };

        let mut facility_states = Facility::ALL.map(|facility| FacilityState::initial(facility, count));
        set_market_demand(
            &mut facility_states[Facility::SmallMarket.index()],
            setup.small_market_demand,
        )?;
        set_market_demand(
            &mut facility_states[Facility::LargeMarket.index()],
            setup.large_market_demand,
        )?;

        let all_players: PlayerSet = setup.players.iter().copied().collect();
        facility_states[Facility::PoliceStation.index()].family_members = all_players;
        facility_states[Facility::Fountain.index()].players = all_players;

        let governor = board.facility_at(setup.governor_location);
        let smuggler = board.facility_at(setup.smuggler_location);
        facility_states[governor.index()].governor = true;
        facility_states[smuggler.index()].smuggler = true;

        let fountain = board.location_of(Facility::Fountain);
        let police_station = board.location_of(Facility::PoliceStation);
        let player_states = setup
            .starting_cards
            .iter()
            .enumerate()
            .map(|(i, &card)| PlayerState::initial(i, card, fountain, police_station))
            .collect();

        Ok(Self {
            players: setup.players,
            board,
            facility_states,
            player_states,
            turn: TurnState::new(count),
            victory_threshold: if count == 2 { 6 } else { 5 },
            outstanding_reward_choices: 0,
            completed: false,
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[PlayerColor] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn current_player(&self) -> PlayerColor {
        self.players[self.turn.current_index()]
    }

    pub fn current_phase(&self) -> Phase {
        self.turn.phase()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn victory_threshold(&self) -> u8 {
        self.victory_threshold
    }

    pub fn outstanding_reward_choices(&self) -> u8 {
        self.outstanding_reward_choices
    }

    pub fn player_state(&self, player: PlayerColor) -> Option<&PlayerState> {
        let idx = self.index_of(player)?;
        Some(&self.player_states[idx])
    }

    pub fn facility_state(&self, facility: Facility) -> &FacilityState {
        &self.facility_states[facility.index()]
    }

    pub(crate) fn index_of(&self, player: PlayerColor) -> Option<usize> {
        self.players.iter().position(|&p| p == player)
    }

    pub(crate) fn player_state_at(&mut self, idx: usize) -> &mut PlayerState {
        &mut self.player_states[idx]
    }

    pub(crate) fn current_player_state(&self) -> &PlayerState {
        &self.player_states[self.turn.current_index()]
    }

    pub(crate) fn current_player_state_mut(&mut self) -> &mut PlayerState {
        let idx = self.turn.current_index();
        &mut self.player_states[idx]
    }

    pub(crate) fn facility_state_mut(&mut self, facility: Facility) -> &mut FacilityState {
        &mut self.facility_states[facility.index()]
    }

    /// Marks the game complete if the yielding player closes the round and
    /// anyone has reached the victory threshold.
    pub(crate) fn check_completed(&mut self) {
        if self.turn.current_index() != self.players.len() - 1 {
            return;
        }
        if self
            .player_states
            .iter()
            .any(|p| p.rubies >= self.victory_threshold)
        {
            self.completed = true;
        }
    }

    /// Final standing, best first. Equal score tuples share a rank.
    pub fn ranking(&self) -> Vec<PlayerRank> {
        let scores: Vec<Score> = self
            .player_states
            .iter()
            .map(|p| Score {
                rubies: p.rubies,
                lira: p.lira,
                cart_goods: p.cart_contents.total(),
                hand_cards: p.hand.total(),
            })
            .collect();

        let mut rows: Vec<PlayerRank> = self
            .players
            .iter()
            .zip(&scores)
            .map(|(&player, &score)| PlayerRank {
                player,
                rank: 1 + scores.iter().filter(|other| **other > score).count(),
                score,
            })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows
    }
}

fn set_market_demand(state: &mut FacilityState, demand: GoodCount) -> Result<(), FacilityError> {
    match &mut state.kind {
        FacilityKindState::Market(market) => market.set_demand(demand),
        _ => unreachable!("demand set on a non-market facility"),
    }
}
