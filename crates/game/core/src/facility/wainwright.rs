//! Wainwright extension pool.

use super::FacilityError;

/// Pool of cart extensions, `3 x player_count` at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WainwrightState {
    extensions: u8,
}

impl WainwrightState {
    pub fn new(extensions: u8) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> u8 {
        self.extensions
    }

    pub fn take_action(&mut self) -> Result<(), FacilityError> {
        if self.extensions == 0 {
            return Err(FacilityError::NoExtensionsLeft);
        }
        self.extensions -= 1;
        Ok(())
    }
}
