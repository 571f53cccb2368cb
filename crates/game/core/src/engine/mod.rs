//! The action dispatcher.
//!
//! [`GameEngine`] borrows a [`GameState`] and interprets one [`Action`] at a
//! time: legality against the turn machine first, then the action's own
//! preconditions interleaved with its effects. Checks and mutations run in a
//! fixed order and the engine never rolls back, so a rejected action may
//! leave earlier effects applied; callers that need atomicity clone the
//! state before applying.

mod errors;

pub use errors::ActionError;

use std::ops::RangeInclusive;

use tracing::{debug, info};

use crate::action::{Action, CaravansaryGain, GovernorCost, MoveAction, RewardChoice, SmugglerCost};
use crate::board::{Facility, Location};
use crate::facility::{FacilityError, FacilityKindState};
use crate::state::GameState;
use crate::state::types::{Card, DiceOutcome, Good, GoodCount, RedTileMethod};

/// Who is physically carrying out the action: the merchant themselves, or
/// their family member sent out from the police station.
#[derive(Clone, Copy, Debug, Default)]
struct ActingContext {
    /// Set while a delegated action resolves; facility lookups use this
    /// location instead of the merchant's own.
    delegate_location: Option<Location>,
}

/// Applies actions to a game state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Validates and applies one action for the current player.
    pub fn apply(&mut self, action: &Action) -> Result<(), ActionError> {
        self.apply_in_context(action, ActingContext::default())
    }

    fn apply_in_context(&mut self, action: &Action, ctx: ActingContext) -> Result<(), ActionError> {
        if self.state.completed {
            return Err(ActionError::GameCompleted);
        }
        if self.state.outstanding_reward_choices > 0 && matches!(action, Action::YieldTurn) {
            return Err(ActionError::RewardPending);
        }
        // Reward choices resolve outside the phase machine.
        if let Action::ChooseReward(choice) = action {
            if self.state.outstanding_reward_choices == 0 {
                return Err(ActionError::NoRewardPending);
            }
            self.resolve_reward(*choice);
            return Ok(());
        }

        self.state.turn.ensure_legal(action)?;
        debug!(
            action = action.name(),
            player = %self.state.current_player(),
            phase = %self.state.current_phase(),
            "apply"
        );

        if matches!(action, Action::YieldTurn) {
            self.state.check_completed();
            if self.state.completed {
                info!("game complete");
            }
            self.state.turn.record(action);
            return Ok(());
        }

        // The phase transition lands before the action's own checks, so a
        // rejection can leave the machine advanced.
        self.state.turn.record(action);

        match action {
            // Handled above.
            Action::YieldTurn | Action::ChooseReward(_) => Ok(()),

            Action::Move(mv) => self.handle_move(mv, 1..=2, None),
            Action::ExtraMove(mv) => self.handle_move(mv, 3..=4, Some(Card::ExtraMove)),
            Action::NoMove { skip_assistant } => {
                self.discard(Card::NoMove)?;
                let at = self.state.current_player_state().location;
                self.assistant_step(at, *skip_assistant)
            }

            Action::Pay => self.handle_pay(),

            Action::SkipFacility => {
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::EncounterGovernor { gain, cost, roll } => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if !self.state.facility_state(facility).governor {
                    return Err(ActionError::GovernorNotHere { facility });
                }
                self.state.current_player_state_mut().hand.add(*gain);
                match cost {
                    GovernorCost::Pay => self.spend(2)?,
                    GovernorCost::Card(card) => self.discard(*card)?,
                }
                let destination = self.npc_destination(*roll)?;
                self.state.facility_state_mut(facility).governor = false;
                self.state.facility_state_mut(destination).governor = true;
                Ok(())
            }

            Action::EncounterSmuggler { gain, cost, roll } => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if !self.state.facility_state(facility).smuggler {
                    return Err(ActionError::SmugglerNotHere { facility });
                }
                self.acquire(*gain);
                match cost {
                    SmugglerCost::Pay => self.spend(2)?,
                    SmugglerCost::Good(good) => self.trade_one(*good, 1)?,
                }
                let destination = self.npc_destination(*roll)?;
                self.state.facility_state_mut(facility).smuggler = false;
                self.state.facility_state_mut(destination).smuggler = true;
                Ok(())
            }

            Action::OneGood { good } => {
                self.discard(Card::OneGood)?;
                self.acquire(*good);
                Ok(())
            }

            Action::FiveLira => {
                self.discard(Card::FiveLira)?;
                self.state.current_player_state_mut().lira += 5;
                Ok(())
            }

            Action::ArrestFamily { reward } => {
                let police = self.state.board().location_of(Facility::PoliceStation);
                let family_at = self.state.current_player_state().family_location;
                if family_at == police {
                    return Err(ActionError::FamilyAtPoliceStation);
                }
                self.discard(Card::ArrestFamily)?;
                let player = self.state.current_player();
                let from = self.state.board().facility_at(family_at);
                self.state.facility_state_mut(from).family_members.remove(player);
                self.state
                    .facility_state_mut(Facility::PoliceStation)
                    .family_members
                    .insert(player);
                self.state.current_player_state_mut().family_location = police;
                self.state.outstanding_reward_choices += 1;
                self.resolve_reward(*reward);
                Ok(())
            }

            Action::ReturnAssistant { from } => {
                self.discard(Card::ReturnAssistant)?;
                self.recall_assistant(*from)
            }

            Action::YellowTile { from } => {
                if !self
                    .state
                    .current_player_state()
                    .owned_tiles
                    .contains_good(Good::Yellow)
                {
                    return Err(ActionError::TileNotOwned { tile: Good::Yellow });
                }
                self.spend(2)?;
                self.recall_assistant(*from)
            }

            Action::Generic => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                match facility {
                    Facility::PostOffice => self.handle_post_office(ctx)?,
                    Facility::FabricWarehouse => self.max_cart(Good::Red),
                    Facility::SpiceWarehouse => self.max_cart(Good::Green),
                    Facility::FruitWarehouse => self.max_cart(Good::Yellow),
                    Facility::Fountain => self.recall_all_assistants(),
                    Facility::Wainwright => self.handle_wainwright()?,
                    Facility::GemstoneDealer => self.handle_gemstone_dealer(ctx)?,
                    other => {
                        return Err(ActionError::WrongFacility {
                            action: action.name(),
                            facility: other,
                        });
                    }
                }
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::GreenTile { extra } => {
                if !self
                    .state
                    .current_player_state()
                    .owned_tiles
                    .contains_good(Good::Green)
                {
                    return Err(ActionError::TileNotOwned { tile: Good::Green });
                }
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                let warehouse_good = match facility {
                    Facility::FabricWarehouse => Good::Red,
                    Facility::SpiceWarehouse => Good::Green,
                    Facility::FruitWarehouse => Good::Yellow,
                    other => {
                        return Err(ActionError::WrongFacility {
                            action: action.name(),
                            facility: other,
                        });
                    }
                };
                self.max_cart(warehouse_good);
                self.spend(2)?;
                self.acquire(*extra);
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::Mosque { color } => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                let FacilityKindState::Mosque(mosque) = &self.state.facility_state(facility).kind
                else {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                };
                if self
                    .state
                    .current_player_state()
                    .owned_tiles
                    .contains_good(*color)
                {
                    return Err(ActionError::TileAlreadyOwned { tile: *color });
                }
                let price = mosque
                    .price(*color)
                    .ok_or(FacilityError::MosqueTileUnavailable { good: *color })?;
                self.trade_one(*color, price)?;
                match &mut self.state.facility_state_mut(facility).kind {
                    FacilityKindState::Mosque(mosque) => mosque.take_action(*color)?,
                    _ => unreachable!("matched as a mosque above"),
                }

                let ps = self.state.current_player_state_mut();
                // The blue tile comes with a fifth assistant.
                if *color == Good::Blue {
                    ps.stack_size += 1;
                }
                let partner = match color {
                    Good::Blue => Good::Yellow,
                    Good::Yellow => Good::Blue,
                    Good::Red => Good::Green,
                    Good::Green => Good::Red,
                };
                if ps.owned_tiles.contains_good(partner) {
                    ps.rubies += 1;
                }
                ps.owned_tiles.insert_good(*color);
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::Market(sale) => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if !matches!(
                    self.state.facility_state(facility).kind,
                    FacilityKindState::Market(_)
                ) {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                }
                self.trade(&sale.goods)?;
                let payout = match &mut self.state.facility_state_mut(facility).kind {
                    FacilityKindState::Market(market) => market.take_action(&sale.goods)?,
                    _ => unreachable!("matched as a market above"),
                };
                self.state.current_player_state_mut().lira += payout;
                match &mut self.state.facility_state_mut(facility).kind {
                    FacilityKindState::Market(market) => market.set_demand(sale.new_demand)?,
                    _ => unreachable!("matched as a market above"),
                }
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::BlackMarket { good, roll } => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if facility != Facility::BlackMarket {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                }
                if *good == Good::Blue {
                    return Err(ActionError::InvalidBlackMarketGood { good: *good });
                }
                self.acquire(*good);
                let total = self.check_roll(*roll)?;
                let jewelry = match total {
                    11.. => 3,
                    9.. => 2,
                    7.. => 1,
                    _ => 0,
                };
                for _ in 0..jewelry {
                    self.acquire(Good::Blue);
                }
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::Caravansary { gains, cost } => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if facility != Facility::Caravansary {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                }
                let mut from_discard = 0;
                for gain in gains {
                    match gain {
                        CaravansaryGain::Card(card) => {
                            self.state.current_player_state_mut().hand.add(*card);
                        }
                        CaravansaryGain::FromDiscard => from_discard += 1,
                    }
                }
                let drawn = match &mut self.state.facility_state_mut(Facility::Caravansary).kind {
                    FacilityKindState::Caravansary(caravansary) => {
                        caravansary.take_action(from_discard)?
                    }
                    _ => unreachable!("the caravansary always carries a discard pile"),
                };
                for card in drawn {
                    self.state.current_player_state_mut().hand.add(card);
                }
                // A just-gained card may pay the cost.
                self.discard(*cost)?;
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::TeaHouse { call, roll } => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if facility != Facility::TeaHouse {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                }
                let total = self.check_roll(*roll)?;
                let winnings = if total >= *call { *call as u32 } else { 2 };
                self.state.current_player_state_mut().lira += winnings;
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::SultansPalace { payment } => {
                self.handle_sultans_palace(payment, ctx)?;
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::PoliceStation { send_to, delegated } => {
                let acting = self.acting_location(ctx);
                let facility = self.state.board().facility_at(acting);
                if facility != Facility::PoliceStation {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                }
                let player = self.state.current_player();
                if !self
                    .state
                    .facility_state(Facility::PoliceStation)
                    .family_members
                    .contains(player)
                {
                    return Err(ActionError::FamilyNotAtPoliceStation);
                }
                if *send_to == acting {
                    return Err(ActionError::DelegateToPoliceStation);
                }

                self.state
                    .facility_state_mut(Facility::PoliceStation)
                    .family_members
                    .remove(player);
                let destination = self.state.board().facility_at(*send_to);
                self.state
                    .facility_state_mut(destination)
                    .family_members
                    .insert(player);
                self.state.current_player_state_mut().family_location = *send_to;

                self.apply_in_context(
                    delegated,
                    ActingContext {
                        delegate_location: Some(*send_to),
                    },
                )
            }

            Action::Fountain { recall } => {
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if facility != Facility::Fountain {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                }
                match recall {
                    None => self.recall_all_assistants(),
                    Some(locations) => {
                        for &location in locations {
                            self.recall_assistant(location)?;
                        }
                    }
                }
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::Double { card, first, second } => {
                self.discard(*card)?;
                match card {
                    Card::DoubleSultan => {
                        for sub in [first, second] {
                            let Action::SultansPalace { payment } = &**sub else {
                                return Err(ActionError::InvalidDoubleCard { card: *card });
                            };
                            self.handle_sultans_palace(payment, ctx)?;
                        }
                    }
                    Card::DoublePostOffice => {
                        if !matches!((&**first, &**second), (Action::Generic, Action::Generic)) {
                            return Err(ActionError::InvalidDoubleCard { card: *card });
                        }
                        self.handle_post_office(ctx)?;
                        self.handle_post_office(ctx)?;
                    }
                    Card::DoubleDealer => {
                        if !matches!((&**first, &**second), (Action::Generic, Action::Generic)) {
                            return Err(ActionError::InvalidDoubleCard { card: *card });
                        }
                        self.handle_gemstone_dealer(ctx)?;
                        self.handle_gemstone_dealer(ctx)?;
                    }
                    other => return Err(ActionError::InvalidDoubleCard { card: *other }),
                }
                self.capture_family_members(ctx);
                Ok(())
            }

            Action::SellAny(sale) => {
                self.discard(Card::SellAny)?;
                let facility = self.state.board().facility_at(self.acting_location(ctx));
                if facility != Facility::SmallMarket {
                    return Err(ActionError::WrongFacility {
                        action: action.name(),
                        facility,
                    });
                }
                self.trade(&sale.goods)?;
                let count = sale.goods.total() as u32;
                // Triangular pricing from 2: selling n goods pays
                // 2 + 3 + ... + (n + 1).
                self.state.current_player_state_mut().lira += (count + 1) * (count + 2) / 2 - 1;
                match &mut self.state.facility_state_mut(Facility::SmallMarket).kind {
                    FacilityKindState::Market(market) => market.set_demand(sale.new_demand)?,
                    _ => unreachable!("the small market always carries a market payload"),
                }
                self.capture_family_members(ctx);
                Ok(())
            }
        }
    }

    fn acting_location(&self, ctx: ActingContext) -> Location {
        ctx.delegate_location
            .unwrap_or(self.state.current_player_state().location)
    }

    fn handle_move(
        &mut self,
        mv: &MoveAction,
        range: RangeInclusive<u8>,
        card: Option<Card>,
    ) -> Result<(), ActionError> {
        if let Some(card) = card {
            self.discard(card)?;
        }
        let from = self.state.current_player_state().location;
        let distance = from.distance(mv.to);
        if !range.contains(&distance) {
            return Err(ActionError::MoveDistance { distance });
        }

        let player = self.state.current_player();
        let from_facility = self.state.board().facility_at(from);
        let to_facility = self.state.board().facility_at(mv.to);
        self.state.facility_state_mut(from_facility).players.remove(player);
        self.state.facility_state_mut(to_facility).players.insert(player);
        self.state.current_player_state_mut().location = mv.to;

        self.assistant_step(mv.to, mv.skip_assistant)
    }

    /// Picks an assistant back up at `at`, or drops one from the stack.
    /// Also decides whether the payment phase applies at all.
    fn assistant_step(&mut self, at: Location, skip: bool) -> Result<(), ActionError> {
        let player = self.state.current_player();
        let facility = self.state.board().facility_at(at);

        if !skip {
            if self.state.facility_state(facility).assistants.contains(player) {
                self.state.facility_state_mut(facility).assistants.remove(player);
                let ps = self.state.current_player_state_mut();
                ps.stack_size += 1;
                if let Some(pos) = ps.assistant_locations.iter().position(|&l| l == at) {
                    ps.assistant_locations.remove(pos);
                }
            } else if self.state.current_player_state().stack_size == 0 {
                // The fountain waives the assistant step; anywhere else an
                // empty stack blocks the move.
                if facility != Facility::Fountain {
                    return Err(ActionError::AssistantsExhausted);
                }
            } else {
                let ps = self.state.current_player_state_mut();
                ps.stack_size -= 1;
                ps.assistant_locations.push(at);
                self.state.facility_state_mut(facility).assistants.insert(player);
            }
        }

        let alone = self.state.facility_state(facility).players.len() == 1;
        if !self.state.turn().yield_required() && (alone || facility == Facility::Fountain) {
            self.state.turn.skip_payment_phase();
        }
        Ok(())
    }

    fn handle_pay(&mut self) -> Result<(), ActionError> {
        let player = self.state.current_player();
        let location = self.state.current_player_state().location;
        let facility = self.state.board().facility_at(location);
        let occupants = self.state.facility_state(facility).players;

        let cost = occupants.len().saturating_sub(1) as u32 * 2;
        if cost == 0 {
            return Err(ActionError::NothingToPay);
        }
        let available = self.state.current_player_state().lira;
        if cost > available {
            return Err(ActionError::InsufficientLira {
                required: cost,
                available,
            });
        }

        for other in occupants.iter().filter(|&p| p != player) {
            if let Some(idx) = self.state.index_of(other) {
                self.state.player_state_at(idx).lira += 2;
            }
        }
        self.state.current_player_state_mut().lira -= cost;
        Ok(())
    }

    fn handle_post_office(&mut self, ctx: ActingContext) -> Result<(), ActionError> {
        let facility = self.state.board().facility_at(self.acting_location(ctx));
        if facility != Facility::PostOffice {
            return Err(ActionError::WrongFacility {
                action: "post_office",
                facility,
            });
        }
        let (goods, lira) = match &mut self.state.facility_state_mut(Facility::PostOffice).kind {
            FacilityKindState::PostOffice(office) => office.take_action(),
            _ => unreachable!("the post office always carries a mail schedule"),
        };
        for good in goods {
            self.acquire(good);
        }
        self.state.current_player_state_mut().lira += lira as u32;
        Ok(())
    }

    fn handle_wainwright(&mut self) -> Result<(), ActionError> {
        if self.state.current_player_state().cart_max >= 5 {
            return Err(ActionError::CartFullyExtended);
        }
        self.spend(7)?;
        match &mut self.state.facility_state_mut(Facility::Wainwright).kind {
            FacilityKindState::Wainwright(wainwright) => wainwright.take_action()?,
            _ => unreachable!("the wainwright always carries an extension pool"),
        }
        let ps = self.state.current_player_state_mut();
        ps.cart_max += 1;
        // The final extension is worth a ruby.
        if ps.cart_max == 5 {
            ps.rubies += 1;
        }
        Ok(())
    }

    fn handle_gemstone_dealer(&mut self, ctx: ActingContext) -> Result<(), ActionError> {
        let facility = self.state.board().facility_at(self.acting_location(ctx));
        if facility != Facility::GemstoneDealer {
            return Err(ActionError::WrongFacility {
                action: "gemstone_dealer",
                facility,
            });
        }
        let price = match &self.state.facility_state(Facility::GemstoneDealer).kind {
            FacilityKindState::GemstoneDealer(dealer) => dealer.price(),
            _ => unreachable!("the gemstone dealer always carries a price"),
        }
        .ok_or(FacilityError::DealerSoldOut)?;
        self.spend(price as u32)?;
        match &mut self.state.facility_state_mut(Facility::GemstoneDealer).kind {
            FacilityKindState::GemstoneDealer(dealer) => dealer.take_action()?,
            _ => unreachable!("the gemstone dealer always carries a price"),
        }
        self.state.current_player_state_mut().rubies += 1;
        Ok(())
    }

    fn handle_sultans_palace(
        &mut self,
        payment: &GoodCount,
        ctx: ActingContext,
    ) -> Result<(), ActionError> {
        let facility = self.state.board().facility_at(self.acting_location(ctx));
        if facility != Facility::SultansPalace {
            return Err(ActionError::WrongFacility {
                action: "sultans_palace",
                facility,
            });
        }
        self.trade(payment)?;
        match &mut self.state.facility_state_mut(Facility::SultansPalace).kind {
            FacilityKindState::SultansPalace(palace) => palace.take_action(payment)?,
            _ => unreachable!("the sultan's palace always carries a requirement"),
        }
        self.state.current_player_state_mut().rubies += 1;
        Ok(())
    }

    /// Returns a placed assistant at `from` to the stack.
    fn recall_assistant(&mut self, from: Location) -> Result<(), ActionError> {
        let player = self.state.current_player();
        let facility = self.state.board().facility_at(from);
        if !self.state.facility_state_mut(facility).assistants.remove(player) {
            return Err(ActionError::NoAssistantThere { location: from });
        }
        let ps = self.state.current_player_state_mut();
        ps.stack_size += 1;
        if let Some(pos) = ps.assistant_locations.iter().position(|&l| l == from) {
            ps.assistant_locations.remove(pos);
        }
        Ok(())
    }

    fn recall_all_assistants(&mut self) {
        let player = self.state.current_player();
        let locations: Vec<Location> = self
            .state
            .current_player_state()
            .assistant_locations
            .iter()
            .copied()
            .collect();
        for location in locations {
            let facility = self.state.board().facility_at(location);
            self.state.facility_state_mut(facility).assistants.remove(player);
        }
        let ps = self.state.current_player_state_mut();
        ps.stack_size += ps.assistant_locations.len() as u8;
        ps.assistant_locations.clear();
    }

    /// Sweeps other players' family members off the acting location and
    /// queues one reward choice per capture. A delegated family member
    /// never makes arrests of its own.
    fn capture_family_members(&mut self, ctx: ActingContext) {
        if ctx.delegate_location.is_some() {
            return;
        }
        let location = self.acting_location(ctx);
        let facility = self.state.board().facility_at(location);
        if facility == Facility::PoliceStation {
            return;
        }
        let mut caught = self.state.facility_state(facility).family_members;
        caught.remove(self.state.current_player());
        if caught.is_empty() {
            return;
        }

        let police = self.state.board().location_of(Facility::PoliceStation);
        for other in caught.iter() {
            self.state.facility_state_mut(facility).family_members.remove(other);
            self.state
                .facility_state_mut(Facility::PoliceStation)
                .family_members
                .insert(other);
            if let Some(idx) = self.state.index_of(other) {
                self.state.player_state_at(idx).family_location = police;
            }
        }
        self.state.outstanding_reward_choices += caught.len() as u8;
        debug!(captured = caught.len(), "family members captured");
    }

    fn resolve_reward(&mut self, choice: RewardChoice) {
        match choice {
            RewardChoice::Lira => self.state.current_player_state_mut().lira += 3,
            RewardChoice::Card(card) => self.state.current_player_state_mut().hand.add(card),
        }
        self.state.outstanding_reward_choices -= 1;
    }

    /// Removes one card from the hand and pushes it onto the caravansary
    /// discard pile.
    fn discard(&mut self, card: Card) -> Result<(), ActionError> {
        if !self.state.current_player_state_mut().hand.remove(card) {
            return Err(ActionError::MissingCard { card });
        }
        match &mut self.state.facility_state_mut(Facility::Caravansary).kind {
            FacilityKindState::Caravansary(caravansary) => caravansary.discard_onto(card),
            _ => unreachable!("the caravansary always carries a discard pile"),
        }
        Ok(())
    }

    fn spend(&mut self, lira: u32) -> Result<(), ActionError> {
        let ps = self.state.current_player_state_mut();
        if ps.lira < lira {
            return Err(ActionError::InsufficientLira {
                required: lira,
                available: ps.lira,
            });
        }
        ps.lira -= lira;
        Ok(())
    }

    /// Adds one good to the cart; a full cart drops it silently.
    fn acquire(&mut self, good: Good) {
        let ps = self.state.current_player_state_mut();
        if ps.cart_contents.get(good) < ps.cart_max {
            ps.cart_contents.add(good, 1);
        }
    }

    fn max_cart(&mut self, good: Good) {
        let ps = self.state.current_player_state_mut();
        let max = ps.cart_max;
        ps.cart_contents.set(good, max);
    }

    fn trade(&mut self, goods: &GoodCount) -> Result<(), ActionError> {
        for (good, amount) in goods.iter() {
            self.trade_one(good, amount)?;
        }
        Ok(())
    }

    fn trade_one(&mut self, good: Good, amount: u8) -> Result<(), ActionError> {
        let ps = self.state.current_player_state_mut();
        if !ps.cart_contents.remove(good, amount) {
            return Err(ActionError::MissingGoods {
                good,
                required: amount,
                available: ps.cart_contents.get(good),
            });
        }
        Ok(())
    }

    /// Validates a reported roll (and any red-tile override) and returns
    /// the total that counts.
    fn check_roll(&self, outcome: DiceOutcome) -> Result<u8, ActionError> {
        match outcome {
            DiceOutcome::Rolled(roll) => {
                if !roll.is_valid() {
                    return Err(ActionError::MalformedRoll { roll });
                }
                Ok(roll.total())
            }
            DiceOutcome::RedTile {
                initial,
                outcome,
                method,
            } => {
                if !initial.is_valid() {
                    return Err(ActionError::MalformedRoll { roll: initial });
                }
                if !outcome.is_valid() {
                    return Err(ActionError::MalformedRoll { roll: outcome });
                }
                if !self
                    .state
                    .current_player_state()
                    .owned_tiles
                    .contains_good(Good::Red)
                {
                    return Err(ActionError::TileNotOwned { tile: Good::Red });
                }
                if method == RedTileMethod::ToFour {
                    let consistent = (outcome.0 == 4
                        && (outcome.1 == initial.0 || outcome.1 == initial.1))
                        || (outcome.1 == 4 && (outcome.0 == initial.0 || outcome.0 == initial.1));
                    if !consistent {
                        return Err(ActionError::RedTileMisused);
                    }
                }
                Ok(outcome.total())
            }
        }
    }

    fn npc_destination(&self, roll: DiceOutcome) -> Result<Facility, ActionError> {
        let total = self.check_roll(roll)?;
        Facility::for_roll_total(total).ok_or(ActionError::MalformedRoll {
            roll: roll.final_roll(),
        })
    }
}
