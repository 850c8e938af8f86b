
use fundme_types::{Address, PriceData, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::oracle::PriceOracle;

pub const DEFAULT_DECIMALS: u8 = 8;
pub const DEFAULT_INITIAL_ANSWER: i128 = 2000_00000000; // 2000 USD

/// Mock aggregator used on development chains.
///
/// Clones share the same rounds, so a handle kept by a test or session can
/// move the price while the ledger holds another.
#[derive(Debug, Clone)]
pub struct MockV3Aggregator {
    address: Address,
    decimals: u8,
    rounds: Arc<Mutex<Rounds>>,
}

#[derive(Debug)]
struct Rounds {
    latest: PriceData,
    history: BTreeMap<u64, PriceData>,
}

impl MockV3Aggregator {
    /// Create a feed whose first round carries `initial_answer`
    pub fn new(address: Address, decimals: u8, initial_answer: i128) -> Self {
        let first = PriceData {
            answer: initial_answer,
            decimals,
            round_id: 1,
            updated_at: 1,
        };
        let mut history = BTreeMap::new();
        history.insert(first.round_id, first);

        MockV3Aggregator {
            address,
            decimals,
            rounds: Arc::new(Mutex::new(Rounds {
                latest: first,
                history,
            })),
        }
    }

    /// Feed at `address` with 8 decimals and a 2000 USD answer
    pub fn with_defaults(address: Address) -> Self {
        Self::new(address, DEFAULT_DECIMALS, DEFAULT_INITIAL_ANSWER)
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Publish a new round and return it
    pub fn update_answer(&self, answer: i128) -> PriceData {
        let mut rounds = self.lock();
        let next = PriceData {
            answer,
            decimals: self.decimals,
            round_id: rounds.latest.round_id + 1,
            updated_at: rounds.latest.updated_at + 1,
        };
        rounds.history.insert(next.round_id, next);
        rounds.latest = next;
        tracing::debug!(feed = %self.address, round = next.round_id, %answer, "mock feed updated");
        next
    }

    pub fn latest_round(&self) -> PriceData {
        self.lock().latest
    }

    pub fn round_data(&self, round_id: u64) -> Option<PriceData> {
        self.lock().history.get(&round_id).copied()
    }

    fn lock(&self) -> MutexGuard<'_, Rounds> {
        // Rounds are plain data; a panic mid-update cannot leave them torn
        self.rounds.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PriceOracle for MockV3Aggregator {
    fn address(&self) -> Address {
        self.address
    }

    fn latest_price(&self) -> Result<PriceData> {
        Ok(self.latest_round())
    }
}
