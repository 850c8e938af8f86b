use fundme_oracle::PriceOracle;
use fundme_types::{Address, Result, Wei};

use crate::fund_me::FundMe;

/// Host capability for moving value out of the ledger.
///
/// The transfer is the only point where control leaves the ledger during a
/// withdrawal. The implementor receives the ledger mutably so that a
/// recipient may call back into `fund` or `withdraw`; by then the ledger has
/// already reset its bookkeeping. Returning an error aborts the withdrawal and
/// rolls the ledger back.
pub trait ValueTransfer<O: PriceOracle> {
    fn send(&mut self, ledger: &mut FundMe<O>, to: &Address, amount: Wei) -> Result<()>;
}
