//! Sultan's palace escalating requirement.

use super::FacilityError;
use crate::state::types::{Good, GoodCount};

/// Goods demanded in cycle order; the fifth step is a wildcard.
const GOOD_CYCLE: [Option<Good>; 5] = [
    Some(Good::Blue),
    Some(Good::Red),
    Some(Good::Green),
    Some(Good::Yellow),
    None,
];

/// The goods currently demanded for one ruby: fixed colors plus a number of
/// wildcard ("any good") slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PalaceRequirement {
    pub colors: GoodCount,
    pub wildcards: u8,
}

impl PalaceRequirement {
    pub fn total(&self) -> u8 {
        self.colors.total() + self.wildcards
    }
}

/// Requirement grows by one good per ruby sold; sold out past 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SultansPalaceState {
    required_count: u8,
}

impl SultansPalaceState {
    /// Games with 2-3 players start one step further along the track.
    pub fn new(advanced_start: bool) -> Self {
        Self {
            required_count: if advanced_start { 5 } else { 4 },
        }
    }

    pub fn required_count(&self) -> u8 {
        self.required_count
    }

    /// Current requirement, or `None` once the palace is sold out.
    pub fn required(&self) -> Option<PalaceRequirement> {
        if self.required_count > 10 {
            return None;
        }
        let mut colors = GoodCount::EMPTY;
        let mut wildcards = 0;
        for i in 0..self.required_count {
            match GOOD_CYCLE[(i % 5) as usize] {
                Some(good) => colors.add(good, 1),
                None => wildcards += 1,
            }
        }
        Some(PalaceRequirement { colors, wildcards })
    }

    /// Validates `payment` against the current requirement: total must match
    /// exactly and every fixed color must be fully covered (the surplus
    /// covers the wildcards). Advances the requirement on success.
    pub fn take_action(&mut self, payment: &GoodCount) -> Result<(), FacilityError> {
        let required = self.required().ok_or(FacilityError::PalaceSoldOut)?;
        if payment.total() != required.total() {
            return Err(FacilityError::PalacePaymentMismatch {
                required: required.total(),
                offered: payment.total(),
            });
        }
        for good in Good::ALL {
            if payment.get(good) < required.colors.get(good) {
                return Err(FacilityError::PalaceCoverageShort {
                    good,
                    required: required.colors.get(good),
                    offered: payment.get(good),
                });
            }
        }
        self.required_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_cycles_with_wildcard_fifth() {
        let palace = SultansPalaceState::new(true);
        let required = palace.required().unwrap();
        assert_eq!(required.total(), 5);
        assert_eq!(required.wildcards, 1);
        for good in Good::ALL {
            assert_eq!(required.colors.get(good), 1);
        }
    }

    #[test]
    fn wildcard_absorbs_surplus_color() {
        let mut palace = SultansPalaceState::new(true);
        let payment = GoodCount::of(&[
            (Good::Blue, 2),
            (Good::Red, 1),
            (Good::Green, 1),
            (Good::Yellow, 1),
        ]);
        palace.take_action(&payment).unwrap();
        assert_eq!(palace.required_count(), 6);
    }

    #[test]
    fn every_fixed_color_must_be_covered() {
        let mut palace = SultansPalaceState::new(true);
        // Totals match but red/green/yellow are missing.
        let payment = GoodCount::of(&[(Good::Blue, 5)]);
        assert_eq!(
            palace.take_action(&payment),
            Err(FacilityError::PalaceCoverageShort {
                good: Good::Red,
                required: 1,
                offered: 0
            })
        );
    }

    #[test]
    fn sells_out_past_ten() {
        let mut palace = SultansPalaceState::new(false);
        while let Some(required) = palace.required() {
            let mut payment = required.colors;
            payment.add(Good::Blue, required.wildcards);
            palace.take_action(&payment).unwrap();
        }
        assert_eq!(palace.required_count(), 11);
        assert_eq!(
            palace.take_action(&GoodCount::EMPTY),
            Err(FacilityError::PalaceSoldOut)
        );
    }
}
