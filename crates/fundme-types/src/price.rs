
use serde::{Deserialize, Serialize};

use crate::error::{FundMeError, Result};

/// Highest feed precision the conversion arithmetic supports
pub const MAX_PRICE_DECIMALS: u8 = 18;

/// One round of a price feed: USD per native unit, scaled by `10^decimals`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceData {
    /// Raw feed answer (signed, as feeds report it)
    pub answer: i128,
    /// Decimal places of `answer`
    pub decimals: u8,
    pub round_id: u64,
    /// Logical time the round was written
    pub updated_at: u64,
}

impl PriceData {
    pub fn new(answer: i128, decimals: u8) -> Self {
        PriceData {
            answer,
            decimals,
            round_id: 0,
            updated_at: 0,
        }
    }

    /// Check the round is usable and return the answer as an unsigned price
    pub fn validate(&self) -> Result<u128> {
        if self.decimals > MAX_PRICE_DECIMALS {
            return Err(FundMeError::InvalidPrice(format!(
                "{} decimals exceeds the supported {}",
                self.decimals, MAX_PRICE_DECIMALS
            )));
        }
        if self.answer <= 0 {
            return Err(FundMeError::InvalidPrice(format!(
                "non-positive answer {} in round {}",
                self.answer, self.round_id
            )));
        }
        Ok(self.answer as u128)
    }

    /// `10^decimals`
    pub fn scale(&self) -> u128 {
        10u128.pow(self.decimals.min(MAX_PRICE_DECIMALS) as u32)
    }
}
