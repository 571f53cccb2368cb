//! The closed set of player-issuable actions.
//!
//! Actions are pure data: the engine interprets them, the turn machine
//! classifies them, and nothing here mutates state. Adding a variant forces
//! every dispatch site to handle it (all matches are exhaustive).

use crate::board::Location;
use crate::state::types::{Card, DiceOutcome, Good, GoodCount};

/// A movement destination plus whether the assistant step is skipped.
///
/// Skipping the assistant step forgoes the only way to progress the turn
/// normally, so it forces an early yield after any ancillary card plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub to: Location,
    pub skip_assistant: bool,
}

/// Goods sold at a market together with the replacement demand the acting
/// player must post.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSale {
    pub goods: GoodCount,
    pub new_demand: GoodCount,
}

/// Reward for a captured family member: 3 lira or one chosen card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RewardChoice {
    Lira,
    Card(Card),
}

/// What the governor is paid: 2 lira or a discarded card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GovernorCost {
    Pay,
    Card(Card),
}

/// What the smuggler is paid: 2 lira or one good from the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmugglerCost {
    Pay,
    Good(Good),
}

/// One of the two caravansary gains: a named card or the top of the
/// discard pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaravansaryGain {
    Card(Card),
    FromDiscard,
}

/// Every action a player can submit to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// End the turn, passing to the next player.
    YieldTurn,

    /// Move 1-2 cells.
    Move(MoveAction),

    /// Pay 2 lira to every other player at the destination.
    Pay,

    /// Resolve one pending family-capture reward.
    ChooseReward(RewardChoice),

    /// Meet the governor: gain a card, pay his cost, he relocates by roll.
    EncounterGovernor {
        gain: Card,
        cost: GovernorCost,
        roll: DiceOutcome,
    },

    /// Meet the smuggler: gain a good, pay his cost, he relocates by roll.
    EncounterSmuggler {
        gain: Good,
        cost: SmugglerCost,
        roll: DiceOutcome,
    },

    /// Decline the facility action for this turn.
    SkipFacility,

    /// The no-argument action of the facility the player stands at
    /// (warehouses, post office, fountain, wainwright, gemstone dealer).
    Generic,

    /// Use the green mosque tile at a warehouse: fill the warehouse good,
    /// pay 2 lira, and take one extra good of choice.
    GreenTile { extra: Good },

    /// Use the yellow mosque tile: pay 2 lira to return one placed
    /// assistant to the stack.
    YellowTile { from: Location },

    /// Buy a mosque tile of the given color.
    Mosque { color: Good },

    /// Sell goods at a market against its posted demand.
    Market(MarketSale),

    /// Black market: one chosen good (not jewelry) plus roll-dependent
    /// jewelry.
    BlackMarket { good: Good, roll: DiceOutcome },

    /// Draw two cards (named or from the discard pile), then discard one.
    Caravansary {
        gains: [CaravansaryGain; 2],
        cost: Card,
    },

    /// Call a number and roll: total at or above the call pays the call,
    /// otherwise 2 lira.
    TeaHouse { call: u8, roll: DiceOutcome },

    /// Trade goods for a ruby at the sultan's palace.
    SultansPalace { payment: GoodCount },

    /// Send the family member from the police station to carry out a
    /// facility action elsewhere on the player's behalf.
    PoliceStation {
        send_to: Location,
        delegated: Box<Action>,
    },

    /// Recall assistants at the fountain. `None` recalls all of them.
    Fountain { recall: Option<Vec<Location>> },

    /// Play the extra-move card and move 3-4 cells.
    ExtraMove(MoveAction),

    /// Play the no-move card and stay put.
    NoMove { skip_assistant: bool },

    /// Play the one-good card.
    OneGood { good: Good },

    /// Play the five-lira card.
    FiveLira,

    /// Play the return-assistant card.
    ReturnAssistant { from: Location },

    /// Play the arrest-family card, choosing the reward immediately.
    ArrestFamily { reward: RewardChoice },

    /// Play a double card, performing the named facility action twice.
    Double {
        card: Card,
        first: Box<Action>,
        second: Box<Action>,
    },

    /// Play the sell-any card at the small market, ignoring demand.
    SellAny(MarketSale),
}

impl Action {
    /// Snake-case identifier used in errors and log events.
    pub fn name(&self) -> &'static str {
        match self {
            Action::YieldTurn => "yield_turn",
            Action::Move(_) => "move",
            Action::Pay => "pay",
            Action::ChooseReward(_) => "choose_reward",
            Action::EncounterGovernor { .. } => "encounter_governor",
            Action::EncounterSmuggler { .. } => "encounter_smuggler",
            Action::SkipFacility => "skip_facility",
            Action::Generic => "generic_facility_action",
            Action::GreenTile { .. } => "green_tile",
            Action::YellowTile { .. } => "yellow_tile",
            Action::Mosque { .. } => "mosque",
            Action::Market(_) => "market",
            Action::BlackMarket { .. } => "black_market",
            Action::Caravansary { .. } => "caravansary",
            Action::TeaHouse { .. } => "tea_house",
            Action::SultansPalace { .. } => "sultans_palace",
            Action::PoliceStation { .. } => "police_station",
            Action::Fountain { .. } => "fountain",
            Action::ExtraMove(_) => "extra_move_card",
            Action::NoMove { .. } => "no_move_card",
            Action::OneGood { .. } => "one_good_card",
            Action::FiveLira => "five_lira_card",
            Action::ReturnAssistant { .. } => "return_assistant_card",
            Action::ArrestFamily { .. } => "arrest_family_card",
            Action::Double { .. } => "double_card",
            Action::SellAny(_) => "sell_any_card",
        }
    }

    /// True for the facility-action group legal in phase 3: acting on the
    /// current cell, skipping it, or the cards that stand in for one.
    pub(crate) fn is_facility_group(&self) -> bool {
        matches!(
            self,
            Action::Generic
                | Action::GreenTile { .. }
                | Action::Mosque { .. }
                | Action::Market(_)
                | Action::BlackMarket { .. }
                | Action::Caravansary { .. }
                | Action::TeaHouse { .. }
                | Action::SultansPalace { .. }
                | Action::PoliceStation { .. }
                | Action::Fountain { .. }
                | Action::SkipFacility
                | Action::Double { .. }
                | Action::SellAny(_)
        )
    }

    /// True for the movement group legal in phase 1.
    pub(crate) fn is_movement_group(&self) -> bool {
        matches!(
            self,
            Action::Move(_)
                | Action::ExtraMove(_)
                | Action::NoMove { .. }
                | Action::ReturnAssistant { .. }
        )
    }

    /// True for the handful of actions legal in any phase, even when a
    /// yield is already required.
    pub(crate) fn is_any_phase(&self) -> bool {
        matches!(
            self,
            Action::OneGood { .. }
                | Action::FiveLira
                | Action::ArrestFamily { .. }
                | Action::YellowTile { .. }
        )
    }
}
