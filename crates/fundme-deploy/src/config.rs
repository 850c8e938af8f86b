use fundme_oracle::{DEFAULT_DECIMALS, DEFAULT_INITIAL_ANSWER};
use fundme_types::{Address, Usd, MAX_PRICE_DECIMALS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DeployError, Result};

/// Deployment configuration: threshold, mock feed and per-network table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundMeConfig {
    /// Minimum contribution in USD (18 decimals)
    pub minimum_usd: Usd,

    /// Networks that get a mock price feed instead of a live one
    pub development_chains: Vec<String>,

    /// Parameters of the mock feed deployed on development chains
    pub mock_feed: MockFeedConfig,

    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockFeedConfig {
    pub decimals: u8,
    pub initial_answer: i128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,

    /// Live ETH/USD feed; required on every non-development network
    #[serde(default)]
    pub eth_usd_price_feed: Option<Address>,

    #[serde(default = "default_block_confirmations")]
    pub block_confirmations: u64,
}

fn default_block_confirmations() -> u64 {
    1
}

impl Default for MockFeedConfig {
    fn default() -> Self {
        MockFeedConfig {
            decimals: DEFAULT_DECIMALS,
            initial_answer: DEFAULT_INITIAL_ANSWER,
        }
    }
}

impl Default for FundMeConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            "hardhat".to_string(),
            NetworkConfig {
                chain_id: 31337,
                eth_usd_price_feed: None,
                block_confirmations: 1,
            },
        );
        networks.insert(
            "localhost".to_string(),
            NetworkConfig {
                chain_id: 31337,
                eth_usd_price_feed: None,
                block_confirmations: 1,
            },
        );
        networks.insert(
            "sepolia".to_string(),
            NetworkConfig {
                chain_id: 11155111,
                eth_usd_price_feed: Some(Address::new([
                    0x69, 0x4a, 0xa1, 0x76, 0x93, 0x57, 0x21, 0x5d, 0xe4, 0xfa, 0xc0, 0x81, 0xbf,
                    0x1f, 0x30, 0x9a, 0xdc, 0x32, 0x53, 0x06,
                ])),
                block_confirmations: 6,
            },
        );

        Self {
            minimum_usd: Usd::from_dollars(50),
            development_chains: vec!["hardhat".to_string(), "localhost".to_string()],
            mock_feed: MockFeedConfig::default(),
            networks,
        }
    }
}

impl FundMeConfig {
    /// Read and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.as_ref().display(), networks = config.networks.len(), "config loaded");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: FundMeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mock_feed.decimals > MAX_PRICE_DECIMALS {
            return Err(DeployError::Config(format!(
                "mock feed decimals {} exceeds {}",
                self.mock_feed.decimals, MAX_PRICE_DECIMALS
            )));
        }
        if self.mock_feed.initial_answer <= 0 {
            return Err(DeployError::Config(format!(
                "mock feed initial answer must be positive, got {}",
                self.mock_feed.initial_answer
            )));
        }
        for (name, network) in &self.networks {
            if !self.is_development(name) && network.eth_usd_price_feed.is_none() {
                return Err(DeployError::Config(format!(
                    "network {} has no eth_usd_price_feed",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn is_development(&self, network: &str) -> bool {
        self.development_chains.iter().any(|chain| chain == network)
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig> {
        self.networks
            .get(name)
            .ok_or_else(|| DeployError::Config(format!("unknown network: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = FundMeConfig::default();
        config.validate().unwrap();

        assert!(config.is_development("hardhat"));
        assert!(!config.is_development("sepolia"));
        assert_eq!(config.network("sepolia").unwrap().chain_id, 11155111);
        assert_eq!(
            config.network("sepolia").unwrap().eth_usd_price_feed.unwrap().to_string(),
            "0x694aa1769357215de4fac081bf1f309adc325306"
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FundMeConfig::from_json(r#"{ "minimum_usd": "10.5" }"#).unwrap();

        assert_eq!(config.minimum_usd, Usd::parse("10.5").unwrap());
        assert_eq!(config.mock_feed, MockFeedConfig::default());
        assert!(config.networks.contains_key("hardhat"));
    }

    #[test]
    fn test_live_network_requires_feed() {
        let result = FundMeConfig::from_json(
            r#"{ "networks": { "mainnet": { "chain_id": 1 } } }"#,
        );
        assert!(matches!(result, Err(DeployError::Config(_))));
    }

    #[test]
    fn test_bad_mock_rejected() {
        let result = FundMeConfig::from_json(r#"{ "mock_feed": { "decimals": 19 } }"#);
        assert!(matches!(result, Err(DeployError::Config(_))));

        let result = FundMeConfig::from_json(r#"{ "mock_feed": { "initial_answer": 0 } }"#);
        assert!(matches!(result, Err(DeployError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "minimum_usd": "5",
                "networks": {{
                    "hardhat": {{ "chain_id": 31337 }},
                    "sepolia": {{
                        "chain_id": 11155111,
                        "eth_usd_price_feed": "0x694AA1769357215DE4FAC081bf1f309aDC325306",
                        "block_confirmations": 6
                    }}
                }}
            }}"#
        )
        .unwrap();

        let config = FundMeConfig::load(file.path()).unwrap();
        assert_eq!(config.minimum_usd, Usd::from_dollars(5));
        assert_eq!(config.network("hardhat").unwrap().block_confirmations, 1);
        assert!(config.network("localhost").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = FundMeConfig::load("/nonexistent/fundme.json");
        assert!(matches!(result, Err(DeployError::Io(_))));
    }
}
