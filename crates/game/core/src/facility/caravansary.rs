//! Caravansary discard pile.

use super::FacilityError;
use crate::state::types::Card;

/// Shared discard pile. Every card discarded anywhere in the game lands
/// here; drawing from it flags the caravansary as owed a discard, cleared
/// by the next [`CaravansaryState::discard_onto`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaravansaryState {
    /// Bottom-to-top stack; the end of the vec is the most recent discard.
    discard_pile: Vec<Card>,
    awaiting_discard: bool,
}

impl CaravansaryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pile_size(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn awaiting_discard(&self) -> bool {
        self.awaiting_discard
    }

    /// Pushes a discarded card onto the pile and settles any owed discard.
    pub fn discard_onto(&mut self, card: Card) {
        self.discard_pile.push(card);
        self.awaiting_discard = false;
    }

    /// Draws up to `count` cards off the top (most recent first) and flags
    /// the caravansary as awaiting the acting player's discard.
    pub fn take_action(&mut self, count: u8) -> Result<Vec<Card>, FacilityError> {
        if self.awaiting_discard {
            return Err(FacilityError::AwaitingDiscard);
        }
        if count > 2 {
            return Err(FacilityError::DrawTooLarge { requested: count });
        }
        self.awaiting_discard = true;
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.discard_pile.len() < count as usize {
            return Err(FacilityError::DiscardPileTooSmall {
                requested: count,
                available: self.discard_pile.len() as u8,
            });
        }
        let split = self.discard_pile.len() - count as usize;
        let mut drawn = self.discard_pile.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }
}
