use fundme_oracle::PriceOracle;
use fundme_types::{Address, FundMeError, Result, Wei};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::fund_me::FundMe;
use crate::transfer::ValueTransfer;

/// In-memory native balances of the host chain.
/// Receives swept funds and can be told to refuse value for an address.
#[derive(Debug, Clone, Default)]
pub struct MemoryChain {
    balances: BTreeMap<Address, Wei>,
    rejecting: BTreeSet<Address>,
}

/// Snapshot of native balances for checkpoint/restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub balances: BTreeMap<Address, Wei>,
}

impl MemoryChain {
    pub fn new() -> Self {
        MemoryChain::default()
    }

    /// Initialize with pre-funded accounts
    pub fn with_balances(balances: BTreeMap<Address, Wei>) -> Self {
        MemoryChain {
            balances,
            rejecting: BTreeSet::new(),
        }
    }

    pub fn credit(&mut self, account: &Address, amount: Wei) -> Result<()> {
        let updated = self.balance_of(account).checked_add(amount)?;
        self.set_balance(account, updated);
        Ok(())
    }

    pub fn debit(&mut self, account: &Address, amount: Wei) -> Result<()> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(FundMeError::InsufficientBalance {
                account: *account,
                needed: amount,
                available,
            });
        }
        let updated = available.checked_sub(amount)?;
        self.set_balance(account, updated);
        Ok(())
    }

    fn set_balance(&mut self, account: &Address, amount: Wei) {
        if amount.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, amount);
        }
    }

    pub fn balance_of(&self, account: &Address) -> Wei {
        self.balances.get(account).copied().unwrap_or(Wei::ZERO)
    }

    /// Accounts holding a non-zero balance
    pub fn accounts(&self) -> Vec<Address> {
        self.balances.keys().copied().collect()
    }

    pub fn total_supply(&self) -> Result<Wei> {
        self.balances
            .values()
            .try_fold(Wei::ZERO, |acc, v| acc.checked_add(*v))
    }

    /// Make every incoming transfer to `account` fail
    pub fn reject_transfers_to(&mut self, account: &Address) {
        self.rejecting.insert(*account);
    }

    pub fn accept_transfers_to(&mut self, account: &Address) {
        self.rejecting.remove(account);
    }

    pub fn rejects(&self, account: &Address) -> bool {
        self.rejecting.contains(account)
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            balances: self.balances.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &ChainSnapshot) {
        self.balances = snapshot.balances.clone();
    }
}

impl<O: PriceOracle> ValueTransfer<O> for MemoryChain {
    fn send(&mut self, _ledger: &mut FundMe<O>, to: &Address, amount: Wei) -> Result<()> {
        if self.rejects(to) {
            tracing::warn!(%to, %amount, "recipient rejected transfer");
            return Err(FundMeError::TransferFailed { to: *to, amount });
        }
        self.credit(to, amount)
    }
}
