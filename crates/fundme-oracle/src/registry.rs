
use fundme_types::Address;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::oracle::PriceOracle;

/// Live feeds reachable on a network, keyed by their address
#[derive(Clone, Default)]
pub struct FeedRegistry {
    feeds: BTreeMap<Address, Arc<dyn PriceOracle>>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feed under its own address, replacing any previous one
    pub fn register(&mut self, feed: Arc<dyn PriceOracle>) {
        self.feeds.insert(feed.address(), feed);
    }

    pub fn get(&self, address: &Address) -> Option<Arc<dyn PriceOracle>> {
        self.feeds.get(address).cloned()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.feeds.keys().copied().collect()
    }
}

impl std::fmt::Debug for FeedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRegistry")
            .field("feeds", &self.addresses())
            .finish()
    }
}
