//! Per-location facility state machines.
//!
//! Every location carries the same occupancy block (who is standing here,
//! whose assistants and family members are here, which NPCs are present)
//! plus a kind-specific payload. Each payload exposes a narrow mutation
//! surface that validates its own preconditions and returns what the engine
//! must apply to player state; nothing in here touches players directly.

mod caravansary;
mod gemstone_dealer;
mod market;
mod mosque;
mod post_office;
mod sultans_palace;
mod wainwright;

pub use caravansary::CaravansaryState;
pub use gemstone_dealer::GemstoneDealerState;
pub use market::MarketState;
pub use mosque::MosqueState;
pub use post_office::{MailSlot, PostOfficeState};
pub use sultans_palace::{PalaceRequirement, SultansPalaceState};
pub use wainwright::WainwrightState;

use crate::board::Facility;
use crate::state::types::{Good, PlayerSet};

/// Errors raised by the facility state machines.
///
/// All of these are precondition violations surfaced to the caller; the
/// machines never clamp or silently coerce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FacilityError {
    #[error("the mosque has no {good} tile left")]
    MosqueTileUnavailable { good: Good },

    #[error("the caravansary is still waiting for a discard")]
    AwaitingDiscard,

    #[error("cannot draw {requested} cards from the caravansary (limit 2)")]
    DrawTooLarge { requested: u8 },

    #[error("the caravansary pile holds {available} cards, {requested} requested")]
    DiscardPileTooSmall { requested: u8, available: u8 },

    #[error("the market has no posted demand")]
    DemandNotSet,

    #[error("new demand totals {total}, must total 5")]
    DemandSumInvalid { total: u8 },

    #[error("offered {offered} {good} but the market demands only {demanded}")]
    DemandExceeded {
        good: Good,
        offered: u8,
        demanded: u8,
    },

    #[error("the sultan's palace has no rubies left")]
    PalaceSoldOut,

    #[error("the sultan's palace requires {required} goods, {offered} offered")]
    PalacePaymentMismatch { required: u8, offered: u8 },

    #[error("the sultan's palace requires {required} {good}, {offered} offered")]
    PalaceCoverageShort {
        good: Good,
        required: u8,
        offered: u8,
    },

    #[error("the wainwright has no extensions left")]
    NoExtensionsLeft,

    #[error("the gemstone dealer has no rubies left")]
    DealerSoldOut,
}

/// Kind-specific payload of a facility.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FacilityKindState {
    /// Occupancy only: warehouses, police station, fountain, black market,
    /// tea house.
    Generic,
    Mosque(MosqueState),
    PostOffice(PostOfficeState),
    Caravansary(CaravansaryState),
    Market(MarketState),
    SultansPalace(SultansPalaceState),
    Wainwright(WainwrightState),
    GemstoneDealer(GemstoneDealerState),
}

/// Mutable state of one board location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityState {
    pub governor: bool,
    pub smuggler: bool,
    /// Players physically standing here.
    pub players: PlayerSet,
    /// Players with a placed assistant here (at most one each).
    pub assistants: PlayerSet,
    /// Players whose family member is here.
    pub family_members: PlayerSet,
    pub kind: FacilityKindState,
}

impl FacilityState {
    /// Initial state for `facility` in a game with `player_count` players.
    pub fn initial(facility: Facility, player_count: usize) -> Self {
        debug_assert!((2..=5).contains(&player_count));

        let kind = match facility {
            Facility::GreatMosque => {
                FacilityKindState::Mosque(MosqueState::new([Good::Blue, Good::Yellow]))
            }
            Facility::SmallMosque => {
                FacilityKindState::Mosque(MosqueState::new([Good::Red, Good::Green]))
            }
            Facility::PostOffice => FacilityKindState::PostOffice(PostOfficeState::new()),
            Facility::Caravansary => FacilityKindState::Caravansary(CaravansaryState::new()),
            Facility::SmallMarket => FacilityKindState::Market(MarketState::new(2)),
            Facility::LargeMarket => FacilityKindState::Market(MarketState::new(3)),
            Facility::SultansPalace => {
                FacilityKindState::SultansPalace(SultansPalaceState::new(player_count < 4))
            }
            Facility::Wainwright => {
                FacilityKindState::Wainwright(WainwrightState::new(3 * player_count as u8))
            }
            Facility::GemstoneDealer => {
                let initial_price = match player_count {
                    2 => 15,
                    3 => 14,
                    _ => 12,
                };
                FacilityKindState::GemstoneDealer(GemstoneDealerState::new(initial_price))
            }
            Facility::FabricWarehouse
            | Facility::FruitWarehouse
            | Facility::SpiceWarehouse
            | Facility::PoliceStation
            | Facility::Fountain
            | Facility::BlackMarket
            | Facility::TeaHouse => FacilityKindState::Generic,
        };

        Self {
            governor: false,
            smuggler: false,
            players: PlayerSet::EMPTY,
            assistants: PlayerSet::EMPTY,
            family_members: PlayerSet::EMPTY,
            kind,
        }
    }
}
