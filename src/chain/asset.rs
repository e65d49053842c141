//! Hive asset strings (`"1.000 HIVE"`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const HIVE: &str = "HIVE";
pub const HBD: &str = "HBD";
pub const VESTS: &str = "VESTS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid asset '{0}'")]
pub struct AssetParseError(pub String);

/// An amount paired with its symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub amount: f64,
    pub symbol: String,
}

impl Asset {
    pub fn new(amount: f64, symbol: &str) -> Self {
        Self {
            amount,
            symbol: symbol.to_uppercase(),
        }
    }

    pub fn hive(amount: f64) -> Self {
        Self::new(amount, HIVE)
    }

    pub fn hbd(amount: f64) -> Self {
        Self::new(amount, HBD)
    }

    pub fn vests(amount: f64) -> Self {
        Self::new(amount, VESTS)
    }

    /// Decimal places the chain expects for this symbol.
    pub fn precision(&self) -> usize {
        if self.symbol == VESTS {
            6
        } else {
            3
        }
    }

    /// True for the chain's native liquid currencies.
    pub fn is_native_symbol(symbol: &str) -> bool {
        symbol.eq_ignore_ascii_case(HIVE) || symbol.eq_ignore_ascii_case(HBD)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*} {}", self.precision(), self.amount, self.symbol)
    }
}

impl FromStr for Asset {
    type Err = AssetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(symbol), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AssetParseError(s.to_string()));
        };
        let amount: f64 = amount.parse().map_err(|_| AssetParseError(s.to_string()))?;
        if !amount.is_finite() {
            return Err(AssetParseError(s.to_string()));
        }
        Ok(Asset::new(amount, symbol))
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let asset: Asset = "1.5 HIVE".parse().unwrap();
        assert_eq!(asset.amount, 1.5);
        assert_eq!(asset.to_string(), "1.500 HIVE");

        let vests: Asset = "123.456789 VESTS".parse().unwrap();
        assert_eq!(vests.to_string(), "123.456789 VESTS");
        assert_eq!(Asset::hbd(0.1).to_string(), "0.100 HBD");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("HIVE".parse::<Asset>().is_err());
        assert!("abc HIVE".parse::<Asset>().is_err());
        assert!("1.000 HIVE extra".parse::<Asset>().is_err());
    }

    #[test]
    fn test_native_symbols() {
        assert!(Asset::is_native_symbol("hive"));
        assert!(Asset::is_native_symbol("HBD"));
        assert!(!Asset::is_native_symbol("LEO"));
    }
}
