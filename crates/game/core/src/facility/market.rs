//! Market demand and triangular pricing.

use super::FacilityError;
use crate::state::types::{Good, GoodCount};

/// A market with a posted five-good demand. Selling flips the market into
/// `expecting_demand` until the acting player posts a replacement demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketState {
    /// Price of the first good sold (2 small market, 3 large market).
    one_cost: u8,
    demand: Option<GoodCount>,
    expecting_demand: bool,
}

impl MarketState {
    pub fn new(one_cost: u8) -> Self {
        Self {
            one_cost,
            demand: None,
            expecting_demand: true,
        }
    }

    pub fn one_cost(&self) -> u8 {
        self.one_cost
    }

    pub fn demand(&self) -> Option<GoodCount> {
        self.demand
    }

    pub fn expecting_demand(&self) -> bool {
        self.expecting_demand
    }

    /// Posts a replacement demand. The multiset must total exactly 5.
    pub fn set_demand(&mut self, demand: GoodCount) -> Result<(), FacilityError> {
        if demand.total() != 5 {
            return Err(FacilityError::DemandSumInvalid {
                total: demand.total(),
            });
        }
        self.demand = Some(demand);
        self.expecting_demand = false;
        Ok(())
    }

    /// Validates a sale against the posted demand and returns the payout:
    /// `one_cost + (one_cost+1) + ...` for each good sold.
    pub fn take_action(&mut self, payment: &GoodCount) -> Result<u32, FacilityError> {
        if self.expecting_demand {
            return Err(FacilityError::DemandNotSet);
        }
        let demand = self.demand.ok_or(FacilityError::DemandNotSet)?;
        for (good, offered) in payment.iter() {
            if offered > demand.get(good) {
                return Err(FacilityError::DemandExceeded {
                    good,
                    offered,
                    demanded: demand.get(good),
                });
            }
        }
        self.expecting_demand = true;
        let count = payment.total() as u32;
        let one_cost = self.one_cost as u32;
        Ok((one_cost..one_cost + count).sum())
    }
}
