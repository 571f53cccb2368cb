//! Errors surfaced by the action dispatcher.

use crate::board::{Facility, Location};
use crate::facility::FacilityError;
use crate::state::TurnError;
use crate::state::types::{Card, Good, Roll};

/// Why an action was rejected.
///
/// Validation is interleaved with application, so a rejected action may
/// leave earlier effects in place; callers that need atomicity snapshot
/// the state first.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameCompleted,

    #[error("a family-capture reward must be chosen before yielding")]
    RewardPending,

    #[error("no reward is waiting to be chosen")]
    NoRewardPending,

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Facility(#[from] FacilityError),

    #[error("{required} lira required, {available} available")]
    InsufficientLira { required: u32, available: u32 },

    #[error("the hand holds no {card} card")]
    MissingCard { card: Card },

    #[error("{required} {good} required, the cart holds {available}")]
    MissingGoods {
        good: Good,
        required: u8,
        available: u8,
    },

    #[error("cannot move {distance} cells")]
    MoveDistance { distance: u8 },

    #[error("{action} cannot be taken at the {facility}")]
    WrongFacility {
        action: &'static str,
        facility: Facility,
    },

    #[error("the {tile} mosque tile is not owned")]
    TileNotOwned { tile: Good },

    #[error("the {tile} mosque tile is already owned")]
    TileAlreadyOwned { tile: Good },

    #[error("die roll {roll:?} is out of range")]
    MalformedRoll { roll: Roll },

    #[error("the red tile override does not match the initial roll")]
    RedTileMisused,

    #[error("the governor is not at the {facility}")]
    GovernorNotHere { facility: Facility },

    #[error("the smuggler is not at the {facility}")]
    SmugglerNotHere { facility: Facility },

    #[error("no assistant placed at location {location}")]
    NoAssistantThere { location: Location },

    #[error("no assistant left in the stack and none at the destination")]
    AssistantsExhausted,

    #[error("the family member is already at the police station")]
    FamilyAtPoliceStation,

    #[error("the family member is not at the police station")]
    FamilyNotAtPoliceStation,

    #[error("the family member cannot be sent to the police station")]
    DelegateToPoliceStation,

    #[error("{card} cannot double that action")]
    InvalidDoubleCard { card: Card },

    #[error("no other merchant is here to pay")]
    NothingToPay,

    #[error("the cart is already fully extended")]
    CartFullyExtended,

    #[error("the black market never deals in {good}")]
    InvalidBlackMarketGood { good: Good },
}
