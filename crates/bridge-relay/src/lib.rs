//! Token bridge lock relay.
//!
//! Ties the Solana and Ethereum encoders to the ledgers: submits a lock,
//! follows the transfer-out proposal the bridge writes, and assembles the
//! guardian-signed attestation once it is complete.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod ledger;
pub mod signatures;
pub mod transfer;

// ─── Public API ──────────────────────────────────────────────────────

pub use aggregator::{AggregationState, AttestationAggregator, PendingAttestation};
pub use config::{
    EthereumLock, EthereumLockConfig, RelayConfig, RetryPolicy, SolanaLock, SolanaLockConfig,
};
pub use error::RelayError;
pub use ledger::{AccountInfo, AccountSubscription, EvmLedger, SolanaLedger, SubscriptionId};
pub use signatures::{fetch_signature_status, poll_signature_status};
pub use transfer::{lock_from_ethereum, lock_from_solana, EthereumTransfer, SolanaTransfer};
