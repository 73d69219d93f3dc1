//! Ledger capabilities the relay drives.
//!
//! RPC clients, key management and fee estimation live behind these traits.
//! The relay only builds instructions and calldata, then hands them over.

use alloy_primitives::Address;
use async_trait::async_trait;
use bridge_sol::SolInstruction;
use tokio::sync::mpsc;

use crate::error::RelayError;

/// Snapshot of a Solana account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub lamports: u64,
    pub data: Vec<u8>,
}

/// Handle of an account-change subscription, needed to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A live account-change subscription.
///
/// Each message on `receiver` is the account's full data after a change.
/// The ledger closes the channel when the subscription is cancelled.
#[derive(Debug)]
pub struct AccountSubscription {
    pub id: SubscriptionId,
    pub receiver: mpsc::Receiver<Vec<u8>>,
}

#[async_trait]
pub trait SolanaLedger: Send + Sync {
    /// Sign with `payer` (and any other signers the ledger holds), submit as
    /// one transaction and wait for confirmation. Returns the Base58
    /// transaction signature.
    async fn send_and_confirm(
        &self,
        instructions: &[SolInstruction],
        payer: &[u8; 32],
    ) -> Result<String, RelayError>;

    /// `Ok(None)` when the account does not exist.
    async fn get_account(&self, address: &[u8; 32]) -> Result<Option<AccountInfo>, RelayError>;

    async fn subscribe_account(&self, address: &[u8; 32])
        -> Result<AccountSubscription, RelayError>;

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), RelayError>;

    async fn minimum_balance_for_rent_exemption(&self, size: usize) -> Result<u64, RelayError>;
}

#[async_trait]
pub trait EvmLedger: Send + Sync {
    /// Sign and submit a call to `to`, returning the 0x-prefixed transaction
    /// hash once mined. Gas pricing is the ledger's concern.
    async fn send_call(&self, to: Address, calldata: Vec<u8>) -> Result<String, RelayError>;
}
