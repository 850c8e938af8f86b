
mod chain;
mod fund_me;
mod transfer;

pub use chain::{ChainSnapshot, MemoryChain};
pub use fund_me::{FundMe, FundMeSnapshot};
pub use transfer::ValueTransfer;
