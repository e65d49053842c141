//! Built-in endpoint lists.

use crate::rpc::types::RpcKind;

pub const DEFAULT_RPC: &str = "https://api.hive.blog";
pub const DEFAULT_HE_RPC_NODE: &str = "https://engine.rishipanthee.com";
pub const DEFAULT_ACCOUNT_HISTORY_RPC_NODE: &str = "https://history.hive-engine.com";

pub const HIVE_RPCS: &[&str] = &[
    "https://api.hive.blog",
    "https://api.openhive.network",
    "https://anyx.io",
    "https://api.pharesim.me",
    "https://hived.hive-engine.com",
    "https://hived.privex.io",
    "https://hive.roelandp.nl",
    "https://rpc.ausbit.dev",
    "https://rpc.ecency.com",
    "https://techcoderx.com",
    "https://hive-api.arcange.eu",
];

pub const HIVE_ENGINE_RPCS: &[&str] = &[
    "https://engine.rishipanthee.com",
    "https://herpc.dtools.dev",
    "https://api.hive-engine.com/rpc",
    "https://ha.herpc.dtools.dev",
    "https://herpc.kanibot.com",
    "https://he.sourov.dev",
    "https://herpc.actifit.io",
    "https://api2.hive-engine.com/rpc",
];

pub const ACCOUNT_HISTORY_APIS: &[&str] = &[
    "https://history.hive-engine.com",
    "https://accounts.hive-engine.com",
];

/// Built-in list for `kind`.
pub fn defaults_for(kind: RpcKind) -> &'static [&'static str] {
    match kind {
        RpcKind::Hive => HIVE_RPCS,
        RpcKind::HiveEngine => HIVE_ENGINE_RPCS,
        RpcKind::AccountHistory => ACCOUNT_HISTORY_APIS,
    }
}
