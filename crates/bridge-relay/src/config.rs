//! Transfer configuration.
//!
//! Loaded from JSON and validated once into typed values; the builders and
//! the aggregator never see the raw strings.

use std::path::Path;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use bridge_eth::{parse_address, parse_amount, LockAssetsCall};
use bridge_sol::{address_to_bytes, to_u64, BridgeAccounts, LockParams};
use rand::Rng;
use serde::Deserialize;

use crate::error::RelayError;

/// Upper bound (exclusive) of randomly drawn transfer nonces.
const RANDOM_NONCE_BOUND: u32 = 10_000;

const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub solana: Option<SolanaLockConfig>,
    pub ethereum: Option<EthereumLockConfig>,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl RelayConfig {
    /// Parse and validate. A Solana lock without a nonce gets one drawn
    /// here, once, so every later `to_lock()` derives the same transfer
    /// address.
    pub fn from_json_str(json: &str) -> Result<Self, RelayError> {
        let mut config: RelayConfig =
            serde_json::from_str(json).map_err(|e| RelayError::Config(e.to_string()))?;
        if let Some(solana) = config.solana.as_mut() {
            solana.assign_nonce();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, RelayError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RelayError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), RelayError> {
        if self.solana.is_none() && self.ethereum.is_none() {
            return Err(RelayError::Config(
                "at least one of `solana` or `ethereum` must be configured".into(),
            ));
        }
        if let Some(solana) = &self.solana {
            solana.to_lock()?;
        }
        if let Some(ethereum) = &self.ethereum {
            ethereum.to_lock()?;
        }
        if self.retry.max_attempts == Some(0) {
            return Err(RelayError::Config("retry.max_attempts must be > 0".into()));
        }
        Ok(())
    }
}

/// How the signature-status poll backs off and when it gives up.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// `None` polls until the guardians have signed, however long it takes.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Solana → foreign chain lock, as written in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SolanaLockConfig {
    pub bridge_program: String,
    pub delegate: String,
    pub token_mint: String,
    pub source_token_account: String,
    pub owner: String,
    /// Hex, optionally 0x-prefixed, at most 32 bytes.
    pub asset_address: String,
    pub asset_chain: u8,
    pub asset_decimals: u8,
    /// Hex, optionally 0x-prefixed, at most 32 bytes.
    pub target_address: String,
    pub target_chain: u8,
    /// Decimal token base units.
    pub amount: String,
    /// Drawn at random from `0..10000` at load time when absent.
    #[serde(default)]
    pub nonce: Option<u32>,
}

/// A validated Solana-side lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolanaLock {
    pub accounts: BridgeAccounts,
    pub params: LockParams,
}

impl SolanaLockConfig {
    /// Fill in a random nonce if none is configured. Idempotent.
    pub fn assign_nonce(&mut self) -> u32 {
        *self
            .nonce
            .get_or_insert_with(|| rand::thread_rng().gen_range(0..RANDOM_NONCE_BOUND))
    }

    /// Validate into typed values. Deterministic: the nonce must already be
    /// set, see [`SolanaLockConfig::assign_nonce`].
    pub fn to_lock(&self) -> Result<SolanaLock, RelayError> {
        let nonce = self
            .nonce
            .ok_or_else(|| RelayError::Config("solana.nonce: not assigned".into()))?;

        let accounts = BridgeAccounts {
            bridge_program: solana_address("bridge_program", &self.bridge_program)?,
            delegate: solana_address("delegate", &self.delegate)?,
            token_mint: solana_address("token_mint", &self.token_mint)?,
            source_token_account: solana_address(
                "source_token_account",
                &self.source_token_account,
            )?,
            owner: solana_address("owner", &self.owner)?,
        };

        let amount = decimal_amount("solana.amount", &self.amount)?;
        // SPL token amounts are u64.
        to_u64(amount)?;

        let params = LockParams {
            amount,
            target_chain: self.target_chain,
            asset_address: hex_bytes("asset_address", &self.asset_address, 32)?,
            asset_chain: self.asset_chain,
            asset_decimals: self.asset_decimals,
            target_address: hex_bytes("target_address", &self.target_address, 32)?,
            nonce,
        };

        Ok(SolanaLock { accounts, params })
    }
}

/// Ethereum → Solana lock, as written in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EthereumLockConfig {
    pub bridge_contract: String,
    pub token_contract: String,
    /// Decimal token base units.
    pub amount: String,
    /// Hex of the 32-byte recipient account on the target chain.
    pub recipient: String,
    pub target_chain: u8,
    pub nonce: u32,
}

/// A validated Ethereum-side lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthereumLock {
    pub bridge_contract: Address,
    pub token_contract: Address,
    pub call: LockAssetsCall,
}

impl EthereumLockConfig {
    pub fn to_lock(&self) -> Result<EthereumLock, RelayError> {
        let token_contract = parse_address(&self.token_contract)?;
        let recipient = hex_bytes("recipient", &self.recipient, 32)?;
        let recipient: [u8; 32] = recipient.try_into().map_err(|v: Vec<u8>| {
            RelayError::Config(format!("recipient: expected 32 bytes, got {}", v.len()))
        })?;

        Ok(EthereumLock {
            bridge_contract: parse_address(&self.bridge_contract)?,
            token_contract,
            call: LockAssetsCall {
                asset: token_contract,
                amount: decimal_amount("ethereum.amount", &self.amount)?,
                recipient,
                target_chain: self.target_chain,
                nonce: self.nonce,
            },
        })
    }
}

fn solana_address(field: &str, value: &str) -> Result<[u8; 32], RelayError> {
    address_to_bytes(value).map_err(|e| RelayError::Config(format!("{field}: {e}")))
}

fn decimal_amount(field: &str, value: &str) -> Result<U256, RelayError> {
    parse_amount(value).map_err(|e| RelayError::Config(format!("{field}: {e}")))
}

fn hex_bytes(field: &str, value: &str, max_len: usize) -> Result<Vec<u8>, RelayError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let bytes =
        hex::decode(digits).map_err(|e| RelayError::Config(format!("{field}: {e}")))?;
    if bytes.len() > max_len {
        return Err(RelayError::Config(format!(
            "{field}: {} bytes, at most {max_len} allowed",
            bytes.len()
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use bridge_sol::build_lock_instruction;

    use super::*;

    const SAMPLE: &str = r#"{
        "solana": {
            "bridge_program": "WormT3McKhFJ2RkiGpdw9GKvNCrB2aB54gb2uV9MfQC",
            "delegate": "9zyPU1mjgzaVyQsYwKJJ7AhVz5bgx5uc1NPABvAcUXsT",
            "token_mint": "CYzPVv1zB9RH6hRWRKprFoepdD8Y7Q5HefCqrybvetja",
            "source_token_account": "GM9GzLXavHCnkRjkkdALd9Ttmgt6E74D72VaTy2jkW2L",
            "owner": "11111111111111111111111111111112",
            "asset_address": "18aAA7115705e8be94bfFEBDE57Af9BFc265B998",
            "asset_chain": 2,
            "asset_decimals": 9,
            "target_address": "0xE6CF5b674aE59cE2e6C46D054a1f2df00178577c",
            "target_chain": 2,
            "amount": "1000",
            "nonce": 1234
        },
        "ethereum": {
            "bridge_contract": "0xf92cD566Ea4864356C5491c177A430C222d7e678",
            "token_contract": "0x18aAA7115705e8be94bfFEBDE57Af9BFc265B998",
            "amount": "100000000",
            "recipient": "abababababababababababababababababababababababababababababababab",
            "target_chain": 1,
            "nonce": 123
        }
    }"#;

    #[test]
    fn parses_sample_config() {
        let config = RelayConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.retry.poll_interval(), Duration::from_millis(500));

        let lock = config.solana.unwrap().to_lock().unwrap();
        assert_eq!(lock.params.amount, U256::from(1000u64));
        assert_eq!(lock.params.nonce, 1234);
        assert_eq!(lock.params.asset_address.len(), 20);
        assert_eq!(lock.params.target_address[0], 0xe6);
        assert_eq!(lock.accounts.bridge_program[0], 0x07);
    }

    #[test]
    fn parses_ethereum_lock() {
        let config = RelayConfig::from_json_str(SAMPLE).unwrap();
        let lock = config.ethereum.unwrap().to_lock().unwrap();
        assert_eq!(lock.call.asset, lock.token_contract);
        assert_eq!(lock.call.recipient, [0xab; 32]);
        assert_eq!(lock.call.amount, U256::from(100_000_000u64));
    }

    fn sample_without_nonce() -> String {
        SAMPLE.replace(",\n            \"nonce\": 1234", "")
    }

    #[test]
    fn missing_nonce_is_drawn_once_at_load() {
        let json = sample_without_nonce();
        assert!(!json.contains("1234"));

        let config = RelayConfig::from_json_str(&json).unwrap();
        let solana = config.solana.as_ref().unwrap();
        let nonce = solana.nonce.unwrap();
        assert!(nonce < RANDOM_NONCE_BOUND);

        let first = solana.to_lock().unwrap();
        let second = solana.to_lock().unwrap();
        assert_eq!(first.params.nonce, nonce);
        assert_eq!(first, second);

        let first_key = build_lock_instruction(&first.accounts, &first.params)
            .unwrap()
            .transfer_key;
        let second_key = build_lock_instruction(&second.accounts, &second.params)
            .unwrap()
            .transfer_key;
        assert_eq!(first_key, second_key);
    }

    #[test]
    fn assign_nonce_keeps_existing_value() {
        let mut solana = RelayConfig::from_json_str(SAMPLE).unwrap().solana.unwrap();
        assert_eq!(solana.assign_nonce(), 1234);

        solana.nonce = None;
        let drawn = solana.assign_nonce();
        assert_eq!(solana.assign_nonce(), drawn);
        assert_eq!(solana.nonce, Some(drawn));
    }

    #[test]
    fn unassigned_nonce_is_rejected() {
        let mut solana = RelayConfig::from_json_str(SAMPLE).unwrap().solana.unwrap();
        solana.nonce = None;
        let err = solana.to_lock().unwrap_err();
        assert!(err.to_string().contains("solana.nonce"));
    }

    #[test]
    fn loads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = RelayConfig::from_file(file.path()).unwrap();
        assert_eq!(config, RelayConfig::from_json_str(SAMPLE).unwrap());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.json");

        let err = RelayConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
        assert!(err.to_string().contains("relay.json"));
    }

    #[test]
    fn bad_amount_names_the_field() {
        let json = SAMPLE.replace(r#""amount": "100000000""#, r#""amount": "1e8""#);
        let err = RelayConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
        assert!(err.to_string().contains("ethereum.amount"));
    }

    #[test]
    fn retry_policy_overrides() {
        let json = r#"{
            "ethereum": {
                "bridge_contract": "0xf92cD566Ea4864356C5491c177A430C222d7e678",
                "token_contract": "0x18aAA7115705e8be94bfFEBDE57Af9BFc265B998",
                "amount": "1",
                "recipient": "0000000000000000000000000000000000000000000000000000000000000001",
                "target_chain": 1,
                "nonce": 0
            },
            "retry": { "poll_interval_ms": 50, "max_attempts": 3 }
        }"#;
        let config = RelayConfig::from_json_str(json).unwrap();
        assert_eq!(config.retry.poll_interval(), Duration::from_millis(50));
        assert_eq!(config.retry.max_attempts, Some(3));
    }

    #[test]
    fn empty_config_is_rejected() {
        let err = RelayConfig::from_json_str("{}").unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn zero_max_attempts_is_rejected() {
        let json = SAMPLE.replacen('{', r#"{ "retry": { "max_attempts": 0 },"#, 1);
        assert!(RelayConfig::from_json_str(&json).is_err());
    }

    #[test]
    fn amount_above_u64_is_rejected() {
        let json = SAMPLE.replace(r#""amount": "1000""#, r#""amount": "18446744073709551616""#);
        let err = RelayConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, RelayError::Sol(_)));
    }

    #[test]
    fn bad_solana_address_is_rejected() {
        let json = SAMPLE.replace("9zyPU1mjgzaVyQsYwKJJ7AhVz5bgx5uc1NPABvAcUXsT", "not-base58!");
        let err = RelayConfig::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("delegate"));
    }

    #[test]
    fn oversized_target_address_is_rejected() {
        let long = "ab".repeat(33);
        let json = SAMPLE.replace("0xE6CF5b674aE59cE2e6C46D054a1f2df00178577c", &long);
        assert!(RelayConfig::from_json_str(&json).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = SAMPLE.replacen('{', r#"{ "verbose": true,"#, 1);
        assert!(RelayConfig::from_json_str(&json).is_err());
    }
}
