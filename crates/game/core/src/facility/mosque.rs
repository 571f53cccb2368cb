//! Mosque tile pricing ladder.

use super::FacilityError;
use crate::state::types::Good;

/// One mosque sells tiles for two good colors. Each color's price starts at
/// 2 goods and climbs to 5; the purchase at 5 removes the slot entirely.
/// Pricing is first-come across all players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MosqueState {
    /// Current price per color, `None` once sold out (or never offered).
    prices: [Option<u8>; 4],
}

impl MosqueState {
    pub fn new(colors: [Good; 2]) -> Self {
        let mut prices = [None; 4];
        for color in colors {
            prices[color.index()] = Some(2);
        }
        Self { prices }
    }

    /// Current price (in goods of that color) for `good`, if still offered.
    pub fn price(&self, good: Good) -> Option<u8> {
        self.prices[good.index()]
    }

    /// Records a purchase of the `good` tile, advancing the ladder.
    pub fn take_action(&mut self, good: Good) -> Result<(), FacilityError> {
        let price = self.prices[good.index()]
            .ok_or(FacilityError::MosqueTileUnavailable { good })?;
        self.prices[good.index()] = if price < 5 { Some(price + 1) } else { None };
        Ok(())
    }
}
