
mod address;
mod amount;
mod error;
mod price;

pub use address::Address;
pub use amount::{Usd, Wei, DECIMALS};
pub use error::{FundMeError, Result};
pub use price::{PriceData, MAX_PRICE_DECIMALS};

#[cfg(test)]
mod tests;
