//! Hive account snapshot and voting estimates.

use serde::{Deserialize, Deserializer, Serialize};

use crate::chain::asset::Asset;

const HIVE_VOTING_MANA_REGENERATION_SECONDS: f64 = 432_000.0;
const HIVE_100_PERCENT: f64 = 10_000.0;

fn num_or_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        serde_json::Value::String(s) => s.parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!("expected number, got {}", other))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manabar {
    #[serde(deserialize_with = "num_or_str")]
    pub current_mana: f64,
    pub last_update_time: i64,
}

/// The subset of `condenser_api.get_accounts` the wallet reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveAccount {
    pub name: String,
    pub balance: Asset,
    pub hbd_balance: Asset,
    pub savings_balance: Asset,
    pub savings_hbd_balance: Asset,
    pub vesting_shares: Asset,
    pub delegated_vesting_shares: Asset,
    pub received_vesting_shares: Asset,
    pub vesting_withdraw_rate: Asset,
    pub voting_manabar: Manabar,
}

impl HiveAccount {
    /// Own + received - delegated vesting shares.
    pub fn effective_vesting_shares(&self) -> f64 {
        self.vesting_shares.amount + self.received_vesting_shares.amount
            - self.delegated_vesting_shares.amount
    }

    /// Estimated voting power in percent at unix time `now_secs`.
    pub fn voting_power(&self, now_secs: i64) -> Option<f64> {
        if self.name.is_empty() {
            return None;
        }
        let estimated_max =
            (self.effective_vesting_shares() - self.vesting_withdraw_rate.amount) * 1_000_000.0;
        if estimated_max <= 0.0 {
            return None;
        }

        let elapsed = (now_secs - self.voting_manabar.last_update_time) as f64;
        let estimated_mana = (self.voting_manabar.current_mana
            + elapsed * estimated_max / HIVE_VOTING_MANA_REGENERATION_SECONDS)
            .min(estimated_max);

        Some(estimated_mana / estimated_max * 100.0)
    }

    /// Estimated HBD value of a vote at `weight_percent` (0-100).
    /// `full` assumes a fully charged voting power.
    pub fn vote_value(
        &self,
        weight_percent: f64,
        props: &GlobalProperties,
        now_secs: i64,
        full: bool,
    ) -> Option<f64> {
        let reward_balance = props.reward_fund.reward_balance.amount;
        let recent_claims: f64 = props.reward_fund.recent_claims.parse().ok()?;
        let hive_price = props.price.base.amount / props.price.quote.amount;
        let reserve_rate = props.globals.vote_power_reserve_rate as f64;
        if reward_balance <= 0.0 || recent_claims <= 0.0 || !hive_price.is_finite() || reserve_rate <= 0.0 {
            return None;
        }

        let current_power = if full {
            HIVE_100_PERCENT
        } else {
            self.voting_power(now_secs)? * 100.0
        };
        let effective_vesting_shares = (self.effective_vesting_shares() * 1_000_000.0).round();
        let weight = weight_percent * 100.0;

        let max_vote_denom = reserve_rate * HIVE_VOTING_MANA_REGENERATION_SECONDS / (60.0 * 60.0 * 24.0);
        let used_power = (current_power * weight / HIVE_100_PERCENT).round();
        let used_power = ((used_power + max_vote_denom - 1.0) / max_vote_denom).round();
        let rshares = (effective_vesting_shares * used_power / HIVE_100_PERCENT).round();

        let value = rshares * reward_balance / recent_claims * hive_price;
        if value.is_nan() {
            Some(0.0)
        } else {
            Some(value)
        }
    }
}

/// `condenser_api.get_dynamic_global_properties` subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    pub head_block_number: u64,
    pub total_vesting_fund_hive: Asset,
    pub total_vesting_shares: Asset,
    pub vote_power_reserve_rate: u32,
}

impl DynamicGlobalProperties {
    /// Convert Hive Power to the equivalent vesting shares.
    pub fn hp_to_vests(&self, hive_power: f64) -> Asset {
        let ratio = self.total_vesting_shares.amount / self.total_vesting_fund_hive.amount;
        Asset::vests(hive_power * ratio)
    }

    pub fn vests_to_hp(&self, vests: f64) -> f64 {
        vests * self.total_vesting_fund_hive.amount / self.total_vesting_shares.amount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardFund {
    pub reward_balance: Asset,
    pub recent_claims: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub base: Asset,
    pub quote: Asset,
}

/// Chain state needed for vote estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalProperties {
    pub globals: DynamicGlobalProperties,
    pub reward_fund: RewardFund,
    pub price: Price,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn account_json(name: &str, hive: &str, hbd: &str) -> serde_json::Value {
        json!({
            "name": name,
            "balance": format!("{} HIVE", hive),
            "hbd_balance": format!("{} HBD", hbd),
            "savings_balance": "0.000 HIVE",
            "savings_hbd_balance": "0.000 HBD",
            "vesting_shares": "1000.000000 VESTS",
            "delegated_vesting_shares": "200.000000 VESTS",
            "received_vesting_shares": "100.000000 VESTS",
            "vesting_withdraw_rate": "0.000000 VESTS",
            "voting_manabar": {"current_mana": "450000000", "last_update_time": 1_000_000}
        })
    }

    fn props() -> GlobalProperties {
        GlobalProperties {
            globals: DynamicGlobalProperties {
                head_block_number: 1,
                total_vesting_fund_hive: Asset::hive(500.0),
                total_vesting_shares: Asset::vests(1000.0),
                vote_power_reserve_rate: 10,
            },
            reward_fund: RewardFund {
                reward_balance: Asset::hive(800_000.0),
                recent_claims: "500000000000000000".to_string(),
            },
            price: Price {
                base: Asset::hbd(0.3),
                quote: Asset::hive(1.0),
            },
        }
    }

    #[test]
    fn test_effective_vesting_shares() {
        let account: HiveAccount = serde_json::from_value(account_json("alice", "1.000", "0.000")).unwrap();
        assert_eq!(account.effective_vesting_shares(), 900.0);
    }

    #[test]
    fn test_voting_power_regenerates_and_caps() {
        let account: HiveAccount = serde_json::from_value(account_json("alice", "1.000", "0.000")).unwrap();
        // max mana = 900e6, current 450e6 => 50%
        let vp = account.voting_power(1_000_000).unwrap();
        assert!((vp - 50.0).abs() < 1e-9);

        // 20% of the regeneration window restores 20 points
        let vp = account.voting_power(1_000_000 + 86_400).unwrap();
        assert!((vp - 70.0).abs() < 1e-9);

        let vp = account.voting_power(1_000_000 + 10 * 432_000).unwrap();
        assert_eq!(vp, 100.0);
    }

    #[test]
    fn test_vote_value_full_power_exceeds_partial() {
        let account: HiveAccount = serde_json::from_value(account_json("alice", "1.000", "0.000")).unwrap();
        let props = props();
        let full = account.vote_value(100.0, &props, 1_000_000, true).unwrap();
        let partial = account.vote_value(100.0, &props, 1_000_000, false).unwrap();
        assert!(full > 0.0);
        assert!(partial < full);
        let half = account.vote_value(50.0, &props, 1_000_000, true).unwrap();
        assert!(half < full);
    }

    #[test]
    fn test_hp_vests_conversion() {
        let globals = props().globals;
        assert_eq!(globals.hp_to_vests(10.0).amount, 20.0);
        assert_eq!(globals.vests_to_hp(20.0), 10.0);
    }
}
