//! Hive-Engine ledger snapshots.

use serde::{Deserialize, Deserializer, Serialize};

/// A user's balance of one Hive-Engine token. Quantities are decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBalance {
    pub account: String,
    pub symbol: String,
    pub balance: String,
    pub stake: String,
    pub pending_unstake: String,
    pub delegations_in: String,
    pub delegations_out: String,
    pub pending_undelegations: String,
}

impl TokenBalance {
    /// Liquid balance as a number; unparseable values count as zero.
    pub fn liquid(&self) -> f64 {
        self.balance.parse().unwrap_or(0.0)
    }
}

/// Decoded `metadata` of a token definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TokenMetadata {
    pub url: String,
    pub icon: String,
    pub desc: String,
}

/// A Hive-Engine token definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Token {
    pub issuer: String,
    pub symbol: String,
    pub name: String,
    #[serde(deserialize_with = "metadata_from_str")]
    pub metadata: TokenMetadata,
    pub precision: u32,
    pub max_supply: String,
    pub supply: String,
    pub circulating_supply: String,
    pub staking_enabled: bool,
    pub unstaking_cooldown: u32,
    pub delegation_enabled: bool,
    pub undelegation_cooldown: u32,
    pub number_transactions: u32,
}

/// The ledger stores metadata as an embedded JSON string. Objects are accepted too.
fn metadata_from_str<'de, D>(deserializer: D) -> Result<TokenMetadata, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw {
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(TokenMetadata::default()),
        serde_json::Value::String(s) => {
            serde_json::from_str(&s).map_err(serde::de::Error::custom)
        }
        serde_json::Value::Null => Ok(TokenMetadata::default()),
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

/// 24h market metrics of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenMarket {
    pub symbol: String,
    pub volume: String,
    pub volume_expiration: u64,
    pub last_price: String,
    pub lowest_ask: String,
    pub highest_bid: String,
    pub last_day_price: String,
    pub last_day_price_expiration: u64,
    pub price_change_hive: String,
    pub price_change_percent: String,
}

/// One entry of the account history API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenOperation {
    #[serde(rename = "_id")]
    pub id: String,
    pub block_number: u64,
    pub transaction_id: String,
    pub timestamp: u64,
    pub operation: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub symbol: String,
    pub quantity: Option<String>,
    pub memo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_metadata_is_decoded_from_string() {
        let token: Token = serde_json::from_value(json!({
            "issuer": "leo",
            "symbol": "LEO",
            "name": "LEO",
            "metadata": "{\"url\":\"https://leo.example\",\"icon\":\"https://leo.example/i.png\",\"desc\":\"LEO token\"}",
            "precision": 3,
            "maxSupply": "10000000.000",
            "stakingEnabled": true
        }))
        .unwrap();

        assert_eq!(token.metadata.url, "https://leo.example");
        assert_eq!(token.metadata.desc, "LEO token");
        assert_eq!(token.precision, 3);
        assert!(token.staking_enabled);
        assert!(!token.delegation_enabled);
    }

    #[test]
    fn test_empty_metadata() {
        let token: Token = serde_json::from_value(json!({"symbol": "X", "metadata": ""})).unwrap();
        assert_eq!(token.metadata, TokenMetadata::default());
    }

    #[test]
    fn test_liquid_balance() {
        let balance = TokenBalance {
            balance: "12.5".into(),
            ..Default::default()
        };
        assert_eq!(balance.liquid(), 12.5);
        assert_eq!(TokenBalance::default().liquid(), 0.0);
    }
}
