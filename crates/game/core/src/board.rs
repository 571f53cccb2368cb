//! Static board geometry: the 4x4 grid and the location/facility binding.
//!
//! The board never changes after setup. Both directions of the binding are
//! built together at construction so injectivity is enforced up front
//! instead of on first inverse lookup.

use std::fmt;

use strum::EnumIter;

/// One of the 16 grid cells, numbered 1..=16 in reading order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location(u8);

impl Location {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 16;

    /// Returns `None` for anything outside 1..=16.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub const fn row(self) -> u8 {
        (self.0 - 1) / 4
    }

    pub const fn col(self) -> u8 {
        (self.0 - 1) % 4
    }

    /// Taxicab distance on the 4x4 embedding.
    pub const fn distance(self, other: Self) -> u8 {
        self.row().abs_diff(other.row()) + self.col().abs_diff(other.col())
    }

    pub fn all() -> impl Iterator<Item = Location> {
        (Self::MIN..=Self::MAX).map(Location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The 16 facility kinds. Declaration order is the default board layout
/// (facility `i` at location `i`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facility {
    GreatMosque,
    PostOffice,
    FabricWarehouse,
    SmallMosque,
    FruitWarehouse,
    PoliceStation,
    Fountain,
    SpiceWarehouse,
    BlackMarket,
    Caravansary,
    SmallMarket,
    TeaHouse,
    SultansPalace,
    LargeMarket,
    Wainwright,
    GemstoneDealer,
}

impl Facility {
    pub const ALL: [Facility; 16] = [
        Facility::GreatMosque,
        Facility::PostOffice,
        Facility::FabricWarehouse,
        Facility::SmallMosque,
        Facility::FruitWarehouse,
        Facility::PoliceStation,
        Facility::Fountain,
        Facility::SpiceWarehouse,
        Facility::BlackMarket,
        Facility::Caravansary,
        Facility::SmallMarket,
        Facility::TeaHouse,
        Facility::SultansPalace,
        Facility::LargeMarket,
        Facility::Wainwright,
        Facility::GemstoneDealer,
    ];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Facility the governor and smuggler relocate to for a two-die total.
    ///
    /// Returns `None` outside 2..=12.
    pub const fn for_roll_total(total: u8) -> Option<Facility> {
        Some(match total {
            2 => Facility::FabricWarehouse,
            3 => Facility::SpiceWarehouse,
            4 => Facility::FruitWarehouse,
            5 => Facility::PostOffice,
            6 => Facility::Caravansary,
            7 => Facility::Fountain,
            8 => Facility::BlackMarket,
            9 => Facility::TeaHouse,
            10 => Facility::LargeMarket,
            11 => Facility::SmallMarket,
            12 => Facility::PoliceStation,
            _ => return None,
        })
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Errors raised while binding locations to facilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutError {
    #[error("location {location} is bound twice")]
    DuplicateLocation { location: Location },

    #[error("facility {facility} is bound twice")]
    DuplicateFacility { facility: Facility },

    #[error("layout does not cover every location and facility")]
    Incomplete,
}

/// Bidirectional location/facility binding plus grid geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    /// Facility at each location, indexed by `Location::index`.
    by_location: [Facility; 16],
    /// Location of each facility, indexed by `Facility::index`.
    by_facility: [Location; 16],
}

impl Board {
    /// The default layout: facilities in declaration order.
    pub fn standard() -> Self {
        Self::from_layout(Location::all().zip(Facility::ALL))
            .expect("standard layout is bijective")
    }

    /// Builds a board from an explicit layout, enforcing a full bijection.
    pub fn from_layout(
        layout: impl IntoIterator<Item = (Location, Facility)>,
    ) -> Result<Self, LayoutError> {
        let mut by_location = [None::<Facility>; 16];
        let mut by_facility = [None::<Location>; 16];

        for (location, facility) in layout {
            if by_location[location.index()].is_some() {
                return Err(LayoutError::DuplicateLocation { location });
            }
            if by_facility[facility.index()].is_some() {
                return Err(LayoutError::DuplicateFacility { facility });
            }
            by_location[location.index()] = Some(facility);
            by_facility[facility.index()] = Some(location);
        }

        if by_location.iter().any(Option::is_none) {
            return Err(LayoutError::Incomplete);
        }

        Ok(Self {
            by_location: by_location.map(|slot| slot.expect("checked above")),
            by_facility: by_facility.map(|slot| slot.expect("checked above")),
        })
    }

    pub fn facility_at(&self, location: Location) -> Facility {
        self.by_location[location.index()]
    }

    pub fn location_of(&self, facility: Facility) -> Location {
        self.by_facility[facility.index()]
    }
}
