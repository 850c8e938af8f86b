use fundme_oracle::{conversion_rate, PriceOracle};
use fundme_types::{Address, FundMeError, Result, Usd, Wei};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::transfer::ValueTransfer;

/// Crowdfunding ledger.
///
/// Accepts contributions worth at least `minimum_usd` at the feed's current
/// price and lets the owner sweep everything. Between calls `balance` always
/// equals the sum of recorded contributions.
pub struct FundMe<O: PriceOracle> {
    owner: Address,
    minimum_usd: Usd,
    price_feed: O,
    address_to_amount_funded: BTreeMap<Address, Wei>,
    funders: Vec<Address>,
    balance: Wei,
}

/// Serializable view of the ledger's bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundMeSnapshot {
    pub balance: Wei,
    pub funders: Vec<Address>,
    pub address_to_amount_funded: BTreeMap<Address, Wei>,
}

impl<O: PriceOracle> FundMe<O> {
    pub fn new(price_feed: O, minimum_usd: Usd, owner: Address) -> Self {
        FundMe {
            owner,
            minimum_usd,
            price_feed,
            address_to_amount_funded: BTreeMap::new(),
            funders: Vec::new(),
            balance: Wei::ZERO,
        }
    }

    /// Record `amount` from `contributor` if it is worth at least the minimum.
    ///
    /// The feed is read on every call. Nothing changes unless the call succeeds.
    pub fn fund(&mut self, contributor: &Address, amount: Wei) -> Result<()> {
        let price = self.price_feed.latest_price()?;
        let sent_usd = conversion_rate(amount, &price)?;

        if sent_usd < self.minimum_usd {
            tracing::debug!(%contributor, %amount, %sent_usd, minimum_usd = %self.minimum_usd, "fund rejected");
            return Err(FundMeError::InsufficientValue {
                sent_usd,
                minimum_usd: self.minimum_usd,
            });
        }

        let funded = self.address_to_amount_funded(contributor).checked_add(amount)?;
        let balance = self.balance.checked_add(amount)?;

        if !self.address_to_amount_funded.contains_key(contributor) {
            self.funders.push(*contributor);
        }
        self.address_to_amount_funded.insert(*contributor, funded);
        self.balance = balance;

        tracing::info!(%contributor, %amount, %sent_usd, balance = %self.balance, "funded");
        Ok(())
    }

    /// Sweep the whole balance to the owner and reset all bookkeeping.
    ///
    /// Bookkeeping is cleared before `transfer` runs; if the transfer fails,
    /// the state from before the call is put back, discarding anything a
    /// re-entrant call did in between. Returns the swept amount.
    pub fn withdraw<T>(&mut self, caller: &Address, transfer: &mut T) -> Result<Wei>
    where
        T: ValueTransfer<O> + ?Sized,
    {
        self.only_owner(caller)?;

        let before = self.take_bookkeeping();
        let amount = before.balance;
        let owner = self.owner;

        match transfer.send(self, &owner, amount) {
            Ok(()) => {
                tracing::info!(%owner, %amount, funders = before.funders.len(), "withdrawn");
                Ok(amount)
            }
            Err(cause) => {
                tracing::warn!(%owner, %amount, %cause, "transfer failed, rolling back withdrawal");
                self.restore(before);
                Err(FundMeError::TransferFailed { to: owner, amount })
            }
        }
    }

    fn only_owner(&self, caller: &Address) -> Result<()> {
        if *caller != self.owner {
            tracing::warn!(%caller, owner = %self.owner, "withdraw by non-owner");
            return Err(FundMeError::NotOwner(*caller));
        }
        Ok(())
    }

    fn take_bookkeeping(&mut self) -> FundMeSnapshot {
        FundMeSnapshot {
            balance: std::mem::take(&mut self.balance),
            funders: std::mem::take(&mut self.funders),
            address_to_amount_funded: std::mem::take(&mut self.address_to_amount_funded),
        }
    }

    fn restore(&mut self, snapshot: FundMeSnapshot) {
        self.balance = snapshot.balance;
        self.funders = snapshot.funders;
        self.address_to_amount_funded = snapshot.address_to_amount_funded;
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Address of the injected price feed
    pub fn price_feed(&self) -> Address {
        self.price_feed.address()
    }

    pub fn oracle(&self) -> &O {
        &self.price_feed
    }

    pub fn minimum_usd(&self) -> Usd {
        self.minimum_usd
    }

    /// Cumulative amount funded by `funder` since the last withdrawal; zero if unknown
    pub fn address_to_amount_funded(&self, funder: &Address) -> Wei {
        self.address_to_amount_funded
            .get(funder)
            .copied()
            .unwrap_or(Wei::ZERO)
    }

    pub fn funder(&self, index: usize) -> Result<Address> {
        self.funders
            .get(index)
            .copied()
            .ok_or(FundMeError::IndexOutOfRange {
                index,
                len: self.funders.len(),
            })
    }

    pub fn funder_count(&self) -> usize {
        self.funders.len()
    }

    pub fn funders(&self) -> &[Address] {
        &self.funders
    }

    pub fn balance(&self) -> Wei {
        self.balance
    }

    /// USD value of `amount` at the feed's current price
    pub fn quote(&self, amount: Wei) -> Result<Usd> {
        conversion_rate(amount, &self.price_feed.latest_price()?)
    }

    /// Whether `balance` equals the sum of recorded contributions
    pub fn is_balanced(&self) -> bool {
        self.address_to_amount_funded
            .values()
            .try_fold(Wei::ZERO, |acc, v| acc.checked_add(*v))
            .map(|sum| sum == self.balance)
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> FundMeSnapshot {
        FundMeSnapshot {
            balance: self.balance,
            funders: self.funders.clone(),
            address_to_amount_funded: self.address_to_amount_funded.clone(),
        }
    }
}

impl<O: PriceOracle> std::fmt::Debug for FundMe<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundMe")
            .field("owner", &self.owner)
            .field("price_feed", &self.price_feed.address())
            .field("minimum_usd", &self.minimum_usd)
            .field("balance", &self.balance)
            .field("funders", &self.funders)
            .finish()
    }
}
