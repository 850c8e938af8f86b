
use thiserror::Error;

use crate::{Address, Usd, Wei};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundMeError {
    #[error("Did not send enough: {sent_usd} USD is below the {minimum_usd} USD minimum")]
    InsufficientValue { sent_usd: Usd, minimum_usd: Usd },

    #[error("Not owner: {0}")]
    NotOwner(Address),

    #[error("Transfer failed: {amount} to {to}")]
    TransferFailed { to: Address, amount: Wei },

    #[error("Index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Insufficient balance: account={account}, needed={needed}, available={available}")]
    InsufficientBalance {
        account: Address,
        needed: Wei,
        available: Wei,
    },
}

pub type Result<T> = std::result::Result<T, FundMeError>;
