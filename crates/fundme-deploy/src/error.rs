use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

/// Errors raised while configuring, deploying or driving a ledger
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] fundme_types::FundMeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Script error: {0}")]
    Script(String),
}
