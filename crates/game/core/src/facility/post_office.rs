//! Post office mail schedule.

use crate::state::types::Good;

/// A slot in the post office mail grid. Which side pays out depends on
/// whether the cyclic position has passed the slot's index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailSlot {
    pub good_early: Good,
    pub good_late: Good,
    pub lira_early: u8,
    pub lira_late: u8,
}

const MAIL_SLOTS: [MailSlot; 2] = [
    MailSlot {
        good_early: Good::Red,
        good_late: Good::Green,
        lira_early: 2,
        lira_late: 1,
    },
    MailSlot {
        good_early: Good::Blue,
        good_late: Good::Yellow,
        lira_early: 2,
        lira_late: 1,
    },
];

/// Cyclic post office position, 0..=4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PostOfficeState {
    position: u8,
}

impl PostOfficeState {
    pub fn new() -> Self {
        Self { position: 0 }
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// The two goods and summed lira the current position pays out.
    pub fn available(&self) -> ([Good; 2], u8) {
        let mut goods = [Good::Red; 2];
        let mut lira = 0;
        for (i, slot) in MAIL_SLOTS.iter().enumerate() {
            // Position beyond the slot index means we have passed it.
            if self.position > i as u8 {
                goods[i] = slot.good_early;
                lira += slot.lira_early;
            } else {
                goods[i] = slot.good_late;
                lira += slot.lira_late;
            }
        }
        (goods, lira)
    }

    /// Collects the current payout and advances the schedule.
    pub fn take_action(&mut self) -> ([Good; 2], u8) {
        let payout = self.available();
        self.position = (self.position + 1) % 5;
        payout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_calls_cycle_back_to_start() {
        let mut office = PostOfficeState::new();
        for _ in 0..5 {
            office.take_action();
        }
        assert_eq!(office.position(), 0);
    }

    #[test]
    fn payout_shifts_as_position_passes_slots() {
        let mut office = PostOfficeState::new();

        // Position 0: nothing passed, both slots pay late.
        assert_eq!(office.available(), ([Good::Green, Good::Yellow], 2));

        office.take_action();
        // Position 1: first slot passed.
        assert_eq!(office.available(), ([Good::Red, Good::Yellow], 3));

        office.take_action();
        // Position 2: both slots passed.
        assert_eq!(office.available(), ([Good::Red, Good::Blue], 4));
    }
}
