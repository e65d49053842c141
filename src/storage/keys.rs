//! Keys used in device storage.

/// Every key the wallet persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    CustomRpcList,
    CustomHiveEngineRpcList,
    CustomAccountHistoryApiList,
    ActiveRpc,
    ActiveHiveEngineRpc,
    ActiveAccountHistoryApi,
    SwitchRpcAuto,
    SwapLastUsedTokens,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::CustomRpcList => "RPC_LIST",
            StorageKey::CustomHiveEngineRpcList => "HIVE_ENGINE_CUSTOM_RPC_LIST",
            StorageKey::CustomAccountHistoryApiList => "HIVE_ENGINE_CUSTOM_ACCOUNT_HISTORY_API",
            StorageKey::ActiveRpc => "ACTIVE_RPC",
            StorageKey::ActiveHiveEngineRpc => "HIVE_ENGINE_ACTIVE_CONFIG",
            StorageKey::ActiveAccountHistoryApi => "HIVE_ENGINE_ACTIVE_ACCOUNT_HISTORY_API",
            StorageKey::SwitchRpcAuto => "SWITCH_RPC_AUTO",
            StorageKey::SwapLastUsedTokens => "SWAP_LAST_USED_TOKENS",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
