//! Gemstone dealer escalating price.

use super::FacilityError;

/// Ruby price climbs by one per purchase; permanently sold out past 24.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GemstoneDealerState {
    price: Option<u8>,
}

impl GemstoneDealerState {
    pub fn new(initial_price: u8) -> Self {
        Self {
            price: Some(initial_price),
        }
    }

    /// Current price, or `None` once sold out.
    pub fn price(&self) -> Option<u8> {
        self.price
    }

    pub fn take_action(&mut self) -> Result<(), FacilityError> {
        let price = self.price.ok_or(FacilityError::DealerSoldOut)?;
        self.price = if price >= 24 { None } else { Some(price + 1) };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_climbs_to_cutoff() {
        let mut dealer = GemstoneDealerState::new(23);
        dealer.take_action().unwrap();
        assert_eq!(dealer.price(), Some(24));
        dealer.take_action().unwrap();
        assert_eq!(dealer.price(), None);
        assert_eq!(dealer.take_action(), Err(FacilityError::DealerSoldOut));
    }
}
