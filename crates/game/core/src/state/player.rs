//! Per-player state.

use arrayvec::ArrayVec;

use crate::board::Location;
use crate::state::types::{Card, GoodCount, GoodSet, Hand};

/// At most four assistants exist without the blue mosque tile; the tile
/// grants a fifth.
pub const MAX_ASSISTANTS: usize = 5;

/// Everything one merchant owns or has placed on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub hand: Hand,
    pub lira: u32,
    pub rubies: u8,
    /// Cart capacity per good color, 2 at setup, 5 at most.
    pub cart_max: u8,
    pub cart_contents: GoodCount,
    /// Assistants still stacked under the merchant.
    pub stack_size: u8,
    /// Mosque tiles bought so far.
    pub owned_tiles: GoodSet,
    pub location: Location,
    /// Where each placed assistant stands, in placement order.
    pub assistant_locations: ArrayVec<Location, MAX_ASSISTANTS>,
    pub family_location: Location,
}

impl PlayerState {
    /// A player's state at setup. Turn order determines starting lira.
    pub fn initial(
        turn_index: usize,
        starting_card: Card,
        fountain: Location,
        police_station: Location,
    ) -> Self {
        Self {
            hand: Hand::with_card(starting_card),
            lira: 2 + turn_index as u32,
            rubies: 0,
            cart_max: 2,
            cart_contents: GoodCount::EMPTY,
            stack_size: 4,
            owned_tiles: GoodSet::empty(),
            location: fountain,
            assistant_locations: ArrayVec::new(),
            family_location: police_station,
        }
    }

    /// Total assistants this player owns, placed or stacked.
    pub fn assistant_total(&self) -> u8 {
        self.stack_size + self.assistant_locations.len() as u8
    }

    /// Whether the cart has room for one more of any single good.
    pub fn cart_has_room(&self) -> bool {
        crate::state::types::Good::ALL
            .into_iter()
            .any(|good| self.cart_contents.get(good) < self.cart_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{Card, Good};

    fn loc(n: u8) -> Location {
        Location::new(n).unwrap()
    }

    #[test]
    fn setup_state() {
        let player = PlayerState::initial(2, Card::FiveLira, loc(7), loc(6));
        assert_eq!(player.lira, 4);
        assert_eq!(player.hand.count(Card::FiveLira), 1);
        assert_eq!(player.stack_size, 4);
        assert_eq!(player.cart_max, 2);
        assert_eq!(player.location, loc(7));
        assert_eq!(player.family_location, loc(6));
        assert_eq!(player.assistant_total(), 4);
    }

    #[test]
    fn cart_room() {
        let mut player = PlayerState::initial(0, Card::OneGood, loc(7), loc(6));
        for good in Good::ALL {
            player.cart_contents.set(good, 2);
        }
        assert!(!player.cart_has_room());
        player.cart_max = 3;
        assert!(player.cart_has_room());
    }
}
