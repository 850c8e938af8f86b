
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{FundMeError, Result};

/// Number of decimal places carried by both `Wei` and `Usd`
pub const DECIMALS: u32 = 18;

const SCALE: u128 = 1_000_000_000_000_000_000; // 10^18

/// Native value in the smallest unit (10^-18 ether)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wei(u128);

impl Wei {
    pub const ZERO: Wei = Wei(0);

    pub const fn from_wei(raw: u128) -> Self {
        Wei(raw)
    }

    pub const fn as_wei(&self) -> u128 {
        self.0
    }

    /// Whole ether units
    pub const fn from_ether(ether: u64) -> Self {
        Wei((ether as u128) * SCALE)
    }

    /// Parse an exact decimal ether string, e.g. `"0.025"`
    pub fn parse_ether(s: &str) -> Result<Self> {
        parse_fixed(s).map(Wei)
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Wei)
            .ok_or_else(|| FundMeError::ArithmeticOverflow(format!("{} + {}", self, other)))
    }

    pub fn checked_sub(&self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Wei)
            .ok_or_else(|| FundMeError::ArithmeticOverflow(format!("{} - {}", self, other)))
    }
}

/// USD-equivalent value with 18 decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Usd(u128);

impl Usd {
    pub const ZERO: Usd = Usd(0);

    pub const fn from_raw(raw: u128) -> Self {
        Usd(raw)
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Usd((dollars as u128) * SCALE)
    }

    pub fn parse(s: &str) -> Result<Self> {
        parse_fixed(s).map(Usd)
    }
}

/// Parse a non-negative decimal string into an integer scaled by 10^18.
/// Rejects anything that cannot be represented exactly.
fn parse_fixed(s: &str) -> Result<u128> {
    let s = s.trim();
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(FundMeError::InvalidAmount(format!("cannot parse: {:?}", s)));
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return Err(FundMeError::InvalidAmount(format!("cannot parse: {:?}", s)));
    }
    if frac_part.len() > DECIMALS as usize {
        return Err(FundMeError::InvalidAmount(format!(
            "more than {} decimal places: {}",
            DECIMALS, s
        )));
    }

    let overflow = || FundMeError::ArithmeticOverflow(format!("amount too large: {}", s));

    let int: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| overflow())?
    };
    let frac: u128 = if frac_part.is_empty() {
        0
    } else {
        let digits: u128 = frac_part.parse().map_err(|_| overflow())?;
        digits * 10u128.pow(DECIMALS - frac_part.len() as u32)
    };

    int.checked_mul(SCALE)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(overflow)
}

fn format_fixed(raw: u128, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let int = raw / SCALE;
    let frac = raw % SCALE;
    if frac == 0 {
        write!(f, "{}", int)
    } else {
        let digits = format!("{:018}", frac);
        write!(f, "{}.{}", int, digits.trim_end_matches('0'))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_fixed(self.0, f)
    }
}

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_fixed(self.0, f)
    }
}

impl FromStr for Wei {
    type Err = FundMeError;

    fn from_str(s: &str) -> Result<Self> {
        Wei::parse_ether(s)
    }
}

impl FromStr for Usd {
    type Err = FundMeError;

    fn from_str(s: &str) -> Result<Self> {
        Usd::parse(s)
    }
}

// Amounts travel as decimal strings; JSON numbers cannot hold 18 decimals exactly.

impl Serialize for Wei {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Wei {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Usd {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Usd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
