use fundme_ledger::FundMe;
use fundme_oracle::{FeedRegistry, MockV3Aggregator, PriceOracle};
use fundme_types::Address;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::FundMeConfig;
use crate::error::{DeployError, Result};

/// Ledger bound to whichever feed the network provides
pub type DeployedFundMe = FundMe<Arc<dyn PriceOracle>>;

/// Record of a deployment, as printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub network: String,
    pub chain_id: u64,
    pub fund_me: Address,
    pub price_feed: Address,
    pub owner: Address,
    pub block_confirmations: u64,
    /// Whether `price_feed` is a mock deployed alongside the ledger
    pub mock_feed: bool,
}

pub struct Deployed {
    pub fund_me: DeployedFundMe,
    pub deployment: Deployment,
    /// Handle on the mock feed, present on development chains
    pub mock: Option<MockV3Aggregator>,
}

/// Deploy a ledger owned by `deployer` on `network`.
///
/// Development chains get a fresh mock feed at the deployer's first contract
/// address. Other networks use their configured feed, which must be present
/// in `feeds`.
pub fn deploy_fund_me(
    config: &FundMeConfig,
    network: &str,
    deployer: Address,
    feeds: &FeedRegistry,
) -> Result<Deployed> {
    let network_config = config.network(network)?;
    tracing::info!(network, chain_id = network_config.chain_id, %deployer, "deploying FundMe");

    let (oracle, mock, nonce): (Arc<dyn PriceOracle>, _, u64) = if config.is_development(network) {
        let feed = MockV3Aggregator::new(
            Address::contract(&deployer, 0),
            config.mock_feed.decimals,
            config.mock_feed.initial_answer,
        );
        tracing::info!(feed = %feed.address(), "deployed mock price feed");
        let oracle: Arc<dyn PriceOracle> = Arc::new(feed.clone());
        (oracle, Some(feed), 1)
    } else {
        let address = network_config.eth_usd_price_feed.ok_or_else(|| {
            DeployError::Config(format!("network {} has no eth_usd_price_feed", network))
        })?;
        let feed = feeds.get(&address).ok_or_else(|| {
            DeployError::Config(format!("no price feed reachable at {} on {}", address, network))
        })?;
        (feed, None, 0)
    };

    let price_feed = oracle.address();
    let fund_me = FundMe::new(oracle, config.minimum_usd, deployer);
    let deployment = Deployment {
        network: network.to_string(),
        chain_id: network_config.chain_id,
        fund_me: Address::contract(&deployer, nonce),
        price_feed,
        owner: deployer,
        block_confirmations: network_config.block_confirmations,
        mock_feed: mock.is_some(),
    };

    tracing::info!(
        fund_me = %deployment.fund_me,
        %price_feed,
        confirmations = deployment.block_confirmations,
        "deployed FundMe"
    );

    Ok(Deployed {
        fund_me,
        deployment,
        mock,
    })
}
