//! Shared primitive types: goods, cards, player colors, dice.
//!
//! These are the vocabulary every other module speaks. They are pure data
//! with no game-rule behavior beyond multiset arithmetic.

use std::fmt;

use strum::EnumIter;

/// The four tradeable goods.
///
/// Display names follow the physical components rather than the colors
/// (fabric is the red good, jewelry the blue one, and so on).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Good {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Good {
    pub const ALL: [Good; 4] = [Good::Red, Good::Blue, Good::Green, Good::Yellow];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Good {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Good::Red => "fabric",
            Good::Blue => "jewelry",
            Good::Green => "spice",
            Good::Yellow => "fruit",
        };
        f.write_str(name)
    }
}

/// Multiset of goods, one counter per color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoodCount([u8; 4]);

impl GoodCount {
    pub const EMPTY: Self = Self([0; 4]);

    /// Builds a multiset from `(good, count)` pairs. Repeated goods accumulate.
    pub fn of(pairs: &[(Good, u8)]) -> Self {
        let mut counts = Self::EMPTY;
        for &(good, count) in pairs {
            counts.add(good, count);
        }
        counts
    }

    #[inline]
    pub fn get(&self, good: Good) -> u8 {
        self.0[good.index()]
    }

    #[inline]
    pub fn set(&mut self, good: Good, count: u8) {
        self.0[good.index()] = count;
    }

    #[inline]
    pub fn add(&mut self, good: Good, count: u8) {
        self.0[good.index()] += count;
    }

    /// Removes `count` of `good`; returns false (leaving self untouched) if
    /// fewer are present.
    pub fn remove(&mut self, good: Good, count: u8) -> bool {
        if self.get(good) < count {
            return false;
        }
        self.0[good.index()] -= count;
        true
    }

    pub fn total(&self) -> u8 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterates over colors with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (Good, u8)> + '_ {
        Good::ALL
            .into_iter()
            .map(|good| (good, self.get(good)))
            .filter(|&(_, count)| count > 0)
    }
}

bitflags::bitflags! {
    /// Set of good colors, used for owned mosque tiles.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GoodSet: u8 {
        const RED = 1 << 0;
        const BLUE = 1 << 1;
        const GREEN = 1 << 2;
        const YELLOW = 1 << 3;
    }
}

impl From<Good> for GoodSet {
    fn from(good: Good) -> Self {
        match good {
            Good::Red => GoodSet::RED,
            Good::Blue => GoodSet::BLUE,
            Good::Green => GoodSet::GREEN,
            Good::Yellow => GoodSet::YELLOW,
        }
    }
}

impl GoodSet {
    #[inline]
    pub fn contains_good(self, good: Good) -> bool {
        self.contains(GoodSet::from(good))
    }

    #[inline]
    pub fn insert_good(&mut self, good: Good) {
        self.insert(GoodSet::from(good));
    }
}

/// The ten bonus card kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Card {
    /// Take one good of your choice.
    OneGood,
    /// Take 5 lira.
    FiveLira,
    /// Move 3-4 cells instead of 1-2.
    ExtraMove,
    /// Stay put instead of moving.
    NoMove,
    /// Return one placed assistant to your stack.
    ReturnAssistant,
    /// Send your own family member to the police station for a reward.
    ArrestFamily,
    /// Sell any goods at the small market, ignoring demand.
    SellAny,
    /// Carry out the sultan's palace action twice.
    DoubleSultan,
    /// Carry out the post office action twice.
    DoublePostOffice,
    /// Carry out the gemstone dealer action twice.
    DoubleDealer,
}

pub(crate) const CARD_KINDS: usize = 10;

impl Card {
    pub const ALL: [Card; CARD_KINDS] = [
        Card::OneGood,
        Card::FiveLira,
        Card::ExtraMove,
        Card::NoMove,
        Card::ReturnAssistant,
        Card::ArrestFamily,
        Card::SellAny,
        Card::DoubleSultan,
        Card::DoublePostOffice,
        Card::DoubleDealer,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Multiset of cards held by a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand([u8; CARD_KINDS]);

impl Hand {
    pub const EMPTY: Self = Self([0; CARD_KINDS]);

    /// A starting hand holding exactly one card.
    pub fn with_card(card: Card) -> Self {
        let mut hand = Self::EMPTY;
        hand.add(card);
        hand
    }

    #[inline]
    pub fn count(&self, card: Card) -> u8 {
        self.0[card.index()]
    }

    #[inline]
    pub fn add(&mut self, card: Card) {
        self.0[card.index()] += 1;
    }

    /// Removes one copy of `card`; returns false if the hand has none.
    pub fn remove(&mut self, card: Card) -> bool {
        if self.0[card.index()] == 0 {
            return false;
        }
        self.0[card.index()] -= 1;
        true
    }

    pub fn total(&self) -> u8 {
        self.0.iter().sum()
    }
}

/// The five player identities, in no particular order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerColor {
    Red,
    Green,
    Blue,
    Yellow,
    White,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Blue,
        PlayerColor::Yellow,
        PlayerColor::White,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Compact set of player colors (board occupancy, assistants, family members).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSet(u8);

impl PlayerSet {
    pub const EMPTY: Self = Self(0);

    pub fn contains(self, player: PlayerColor) -> bool {
        self.0 & player.bit() != 0
    }

    pub fn insert(&mut self, player: PlayerColor) {
        self.0 |= player.bit();
    }

    /// Removes `player`; returns false if they were not in the set.
    pub fn remove(&mut self, player: PlayerColor) -> bool {
        if !self.contains(player) {
            return false;
        }
        self.0 &= !player.bit();
        true
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = PlayerColor> {
        PlayerColor::ALL
            .into_iter()
            .filter(move |player| self.contains(*player))
    }
}

impl FromIterator<PlayerColor> for PlayerSet {
    fn from_iter<I: IntoIterator<Item = PlayerColor>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for player in iter {
            set.insert(player);
        }
        set
    }
}

/// A two-die roll as reported by the caller.
///
/// The engine never rolls dice itself; it only checks that reported pips are
/// in range at the point the roll is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roll(pub u8, pub u8);

impl Roll {
    pub fn total(self) -> u8 {
        self.0 + self.1
    }

    pub fn is_valid(self) -> bool {
        (1..=6).contains(&self.0) && (1..=6).contains(&self.1)
    }
}

/// How the red mosque tile manipulated a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RedTileMethod {
    /// Turn one die to a four, keeping the other.
    ToFour,
    /// Reroll both dice.
    Reroll,
}

/// A dice result, possibly overridden via the red mosque tile.
///
/// Override legality (tile ownership, consistency of initial and final
/// rolls) is checked where the roll is consumed, not at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceOutcome {
    Rolled(Roll),
    RedTile {
        initial: Roll,
        outcome: Roll,
        method: RedTileMethod,
    },
}

impl DiceOutcome {
    /// The roll as finally counted, before any legality checks.
    pub fn final_roll(self) -> Roll {
        match self {
            DiceOutcome::Rolled(roll) => roll,
            DiceOutcome::RedTile { outcome, .. } => outcome,
        }
    }
}
