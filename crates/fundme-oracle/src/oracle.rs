
use fundme_types::{Address, PriceData, Result};
use std::sync::Arc;

/// Read-only price feed: USD per one native unit
pub trait PriceOracle {
    /// Address the feed is deployed at
    fn address(&self) -> Address;

    /// Latest round. May be called any number of times, has no side effects.
    fn latest_price(&self) -> Result<PriceData>;
}

impl<T: PriceOracle + ?Sized> PriceOracle for &T {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn latest_price(&self) -> Result<PriceData> {
        (**self).latest_price()
    }
}

impl<T: PriceOracle + ?Sized> PriceOracle for Box<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn latest_price(&self) -> Result<PriceData> {
        (**self).latest_price()
    }
}

impl<T: PriceOracle + ?Sized> PriceOracle for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn latest_price(&self) -> Result<PriceData> {
        (**self).latest_price()
    }
}
