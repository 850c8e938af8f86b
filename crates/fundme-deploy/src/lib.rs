//! Deployment and session tooling for the FundMe ledger: network
//! configuration, feed selection per network, and a driver that runs
//! fund/withdraw scripts against an in-memory chain.

mod config;
mod deploy;
mod error;
mod session;

pub use config::{FundMeConfig, MockFeedConfig, NetworkConfig};
pub use deploy::{deploy_fund_me, Deployed, DeployedFundMe, Deployment};
pub use error::{DeployError, Result};
pub use session::{
    simulate, Script, Session, SessionReport, Step, StepOutcome, DEV_ACCOUNTS,
    DEV_ACCOUNT_BALANCE,
};
