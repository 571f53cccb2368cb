//! The four-phase turn machine.
//!
//! Legality and phase transitions live here; everything about what an
//! action *does* lives in the engine. The machine never infers a yield:
//! ending a turn is always an explicit [`Action::YieldTurn`].

use std::fmt;

use crate::action::Action;

/// The four phases of a turn, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Movement,
    Payment,
    FacilityAction,
    Encounters,
}

impl Phase {
    pub const fn number(self) -> u8 {
        match self {
            Phase::Movement => 1,
            Phase::Payment => 2,
            Phase::FacilityAction => 3,
            Phase::Encounters => 4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {}", self.number())
    }
}

/// Errors raised by the legality check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("{action} is not legal while a yield is required")]
    YieldRequired { action: &'static str },

    #[error("{action} is not legal in {phase}")]
    WrongPhase { action: &'static str, phase: Phase },
}

/// Whose turn it is, which phase it is in, and whether the turn must end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    player_count: usize,
    current_idx: usize,
    phase: Phase,
    /// Set when the mover skipped the assistant step: only a yield and the
    /// any-phase card plays remain legal.
    yield_required: bool,
}

impl TurnState {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            current_idx: 0,
            phase: Phase::Movement,
            yield_required: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_idx
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn yield_required(&self) -> bool {
        self.yield_required
    }

    /// Jumps from the payment phase straight to the facility phase, used
    /// when the mover is alone at the destination or at the fountain.
    pub(crate) fn skip_payment_phase(&mut self) {
        debug_assert!(self.phase == Phase::Payment && !self.yield_required);
        self.phase = Phase::FacilityAction;
    }

    /// Checks `action` against the current phase and yield flag.
    pub fn ensure_legal(&self, action: &Action) -> Result<(), TurnError> {
        let name = action.name();

        if self.yield_required {
            if matches!(action, Action::YieldTurn) || action.is_any_phase() {
                return Ok(());
            }
            return Err(TurnError::YieldRequired { action: name });
        }

        let required = if matches!(action, Action::YieldTurn) {
            if matches!(self.phase, Phase::Payment | Phase::Encounters) {
                return Ok(());
            }
            return Err(TurnError::WrongPhase {
                action: name,
                phase: self.phase,
            });
        } else if action.is_movement_group() {
            Phase::Movement
        } else if matches!(action, Action::Pay) {
            Phase::Payment
        } else if action.is_facility_group() {
            Phase::FacilityAction
        } else if matches!(
            action,
            Action::ChooseReward(_)
                | Action::EncounterGovernor { .. }
                | Action::EncounterSmuggler { .. }
        ) {
            Phase::Encounters
        } else {
            // One-good, five-lira, arrest-family, yellow tile.
            return Ok(());
        };

        if self.phase == required {
            Ok(())
        } else {
            Err(TurnError::WrongPhase {
                action: name,
                phase: self.phase,
            })
        }
    }

    /// Applies `action`'s phase transition. Callers check legality first.
    pub(crate) fn record(&mut self, action: &Action) {
        match action {
            Action::YieldTurn => {
                self.current_idx = (self.current_idx + 1) % self.player_count;
                self.phase = Phase::Movement;
                self.yield_required = false;
            }
            Action::Move(mv) | Action::ExtraMove(mv) => {
                self.phase = Phase::Payment;
                if mv.skip_assistant {
                    self.yield_required = true;
                }
            }
            Action::NoMove { skip_assistant } => {
                self.phase = Phase::Payment;
                if *skip_assistant {
                    self.yield_required = true;
                }
            }
            Action::Pay => self.phase = Phase::FacilityAction,
            // The police-station action keeps the phase; its delegated
            // action is recorded on its own as it resolves.
            Action::PoliceStation { .. } => {}
            other if other.is_facility_group() => self.phase = Phase::Encounters,
            // Card plays, reward choices and NPC encounters leave the
            // machine untouched.
            _ => {}
        }
    }
}
