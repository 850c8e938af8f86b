
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::FundMeError;

/// 20-byte account identity, rendered as `0x`-prefixed hex
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Deterministic address for a human-readable label (tests, scripts)
    pub fn from_label(label: &str) -> Self {
        Self::derive(&[b"label", label.as_bytes()])
    }

    /// The `index`-th pre-funded account of a development chain
    pub fn dev_account(index: u32) -> Self {
        Self::derive(&[b"dev-account", &index.to_be_bytes()])
    }

    /// Address of the contract created by `deployer` at `nonce`.
    ///
    /// The same pair always yields the same address, so deployments on a
    /// development chain are reproducible across runs.
    pub fn contract(deployer: &Address, nonce: u64) -> Self {
        Self::derive(&[b"contract", &deployer.0, &nonce.to_be_bytes()])
    }

    fn derive(seeds: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Address(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = FundMeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| FundMeError::InvalidAddress(format!("{}: {}", s, e)))?;
        let bytes: [u8; 20] = bytes.try_into().map_err(|_| {
            FundMeError::InvalidAddress(format!("{}: expected 20 bytes", s))
        })?;
        Ok(Address(bytes))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let addr: Address = "0x694AA1769357215DE4FAC081bf1f309aDC325306".parse().unwrap();
        assert_eq!(
            addr.to_string(),
            "0x694aa1769357215de4fac081bf1f309adc325306"
        );

        let unprefixed: Address = "694aa1769357215de4fac081bf1f309adc325306".parse().unwrap();
        assert_eq!(addr, unprefixed);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz4aa1769357215de4fac081bf1f309adc325306".parse::<Address>().is_err());
        assert!("".parse::<Address>().is_err());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let deployer = Address::dev_account(0);
        assert_eq!(deployer, Address::dev_account(0));
        assert_ne!(deployer, Address::dev_account(1));

        let first = Address::contract(&deployer, 0);
        assert_eq!(first, Address::contract(&deployer, 0));
        assert_ne!(first, Address::contract(&deployer, 1));
        assert_ne!(Address::from_label("alice"), Address::from_label("bob"));
    }
}
