
mod converter;
mod mock;
mod oracle;
mod registry;

pub use converter::{conversion_rate, unit_price};
pub use mock::{MockV3Aggregator, DEFAULT_DECIMALS, DEFAULT_INITIAL_ANSWER};
pub use oracle::PriceOracle;
pub use registry::FeedRegistry;

#[cfg(test)]
mod tests;
