//! Operation payloads handed to a [`Broadcaster`](crate::chain::Broadcaster).
//!
//! Operations serialize to the condenser `[name, body]` pair form.

use serde::Serialize;
use serde_json::{json, Value};

use crate::chain::asset::Asset;

/// Custom JSON id read by the Hive-Engine sidechain.
pub const HIVE_ENGINE_ID: &str = "ssc-mainnet-hive";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Asset,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferToVesting {
    pub from: String,
    pub to: String,
    pub amount: Asset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawVesting {
    pub account: String,
    pub vesting_shares: Asset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomJson {
    pub required_auths: Vec<String>,
    pub required_posting_auths: Vec<String>,
    pub id: String,
    pub json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateProposalVotes {
    pub voter: String,
    pub proposal_ids: Vec<i64>,
    pub approve: bool,
    pub extensions: Vec<Value>,
}

/// A single blockchain operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Transfer(Transfer),
    TransferToVesting(TransferToVesting),
    WithdrawVesting(WithdrawVesting),
    CustomJson(CustomJson),
    UpdateProposalVotes(UpdateProposalVotes),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Transfer(_) => "transfer",
            Operation::TransferToVesting(_) => "transfer_to_vesting",
            Operation::WithdrawVesting(_) => "withdraw_vesting",
            Operation::CustomJson(_) => "custom_json",
            Operation::UpdateProposalVotes(_) => "update_proposal_votes",
        }
    }

    fn body(&self) -> Value {
        let body = match self {
            Operation::Transfer(op) => serde_json::to_value(op),
            Operation::TransferToVesting(op) => serde_json::to_value(op),
            Operation::WithdrawVesting(op) => serde_json::to_value(op),
            Operation::CustomJson(op) => serde_json::to_value(op),
            Operation::UpdateProposalVotes(op) => serde_json::to_value(op),
        };
        // Plain structs of strings, numbers and assets always serialize.
        body.unwrap_or(Value::Null)
    }

    /// Condenser `[name, body]` form.
    pub fn to_json(&self) -> Value {
        json!([self.name(), self.body()])
    }

    /// Liquid HIVE / HBD transfer.
    pub fn transfer(from: &str, to: &str, amount: Asset, memo: &str) -> Self {
        Operation::Transfer(Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            memo: memo.to_string(),
        })
    }

    /// Power up: HIVE into vesting shares for `to`.
    pub fn power_up(from: &str, to: &str, amount: f64) -> Self {
        Operation::TransferToVesting(TransferToVesting {
            from: from.to_string(),
            to: to.to_string(),
            amount: Asset::hive(amount),
        })
    }

    /// Power down. A zero amount cancels a running power down.
    pub fn power_down(account: &str, vesting_shares: Asset) -> Self {
        Operation::WithdrawVesting(WithdrawVesting {
            account: account.to_string(),
            vesting_shares,
        })
    }

    /// Approve or unapprove DHF proposals.
    pub fn proposal_vote(voter: &str, proposal_ids: Vec<i64>, approve: bool) -> Self {
        Operation::UpdateProposalVotes(UpdateProposalVotes {
            voter: voter.to_string(),
            proposal_ids,
            approve,
            extensions: Vec::new(),
        })
    }

    fn engine(account: &str, contract_action: &str, payload: Value) -> Self {
        let json = json!({
            "contractName": "tokens",
            "contractAction": contract_action,
            "contractPayload": payload,
        });
        Operation::CustomJson(CustomJson {
            required_auths: vec![account.to_string()],
            required_posting_auths: Vec::new(),
            id: HIVE_ENGINE_ID.to_string(),
            json: json.to_string(),
        })
    }

    /// Hive-Engine token transfer. `quantity` must already carry the token precision.
    pub fn engine_transfer(from: &str, to: &str, symbol: &str, quantity: &str, memo: &str) -> Self {
        Self::engine(
            from,
            "transfer",
            json!({"symbol": symbol, "to": to, "quantity": quantity, "memo": memo}),
        )
    }

    pub fn engine_stake(from: &str, to: &str, symbol: &str, quantity: &str) -> Self {
        Self::engine(
            from,
            "stake",
            json!({"symbol": symbol, "to": to, "quantity": quantity}),
        )
    }

    pub fn engine_unstake(account: &str, symbol: &str, quantity: &str) -> Self {
        Self::engine(
            account,
            "unstake",
            json!({"symbol": symbol, "quantity": quantity}),
        )
    }
}

/// Format `amount` with exactly `precision` decimals.
pub fn format_quantity(amount: f64, precision: u32) -> String {
    format!("{:.*}", precision as usize, amount)
}
