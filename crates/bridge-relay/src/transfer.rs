//! End-to-end lock flows.

use bridge_eth::encode_approve;
use bridge_sol::{
    bridge_transfer_fee, build_lock_bundle, bytes_to_address, TRANSFER_FEE_ACCOUNT_SIZE,
};
use tracing::{info, warn};

use crate::aggregator::AttestationAggregator;
use crate::config::{EthereumLock, RetryPolicy, SolanaLock};
use crate::error::RelayError;
use crate::ledger::{EvmLedger, SolanaLedger};

/// Result of a completed Solana-side lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolanaTransfer {
    pub signature: String,
    pub transfer_key: [u8; 32],
    /// Signed attestation, ready for the destination chain.
    pub vaa: Vec<u8>,
}

/// Lock tokens on Solana and wait for the guardians' attestation.
///
/// The proposal account is subscribed to before the lock is submitted, so
/// the bridge's first write cannot be missed.
#[tracing::instrument(skip_all, fields(nonce = lock.params.nonce))]
pub async fn lock_from_solana<L: SolanaLedger + ?Sized>(
    ledger: &L,
    lock: &SolanaLock,
    policy: &RetryPolicy,
) -> Result<SolanaTransfer, RelayError> {
    let rent = ledger
        .minimum_balance_for_rent_exemption(TRANSFER_FEE_ACCOUNT_SIZE)
        .await?;
    let fee = bridge_transfer_fee(rent)?;
    let bundle = build_lock_bundle(&lock.accounts, &lock.params, fee)?;
    let transfer = bytes_to_address(&bundle.transfer_key);

    let subscription = ledger.subscribe_account(&bundle.transfer_key).await?;
    let signature = match ledger
        .send_and_confirm(&bundle.instructions, &lock.accounts.owner)
        .await
    {
        Ok(signature) => signature,
        Err(error) => {
            if let Err(unsubscribe_error) = ledger.unsubscribe(subscription.id).await {
                warn!(error = %unsubscribe_error, "failed to cancel proposal subscription");
            }
            return Err(error);
        }
    };
    info!(%signature, %transfer, fee, "lock confirmed");

    let mut aggregator = AttestationAggregator::new(bundle.transfer_key, *policy);
    let vaa = aggregator.run(ledger, subscription).await?;

    Ok(SolanaTransfer {
        signature,
        transfer_key: bundle.transfer_key,
        vaa,
    })
}

/// Transaction hashes of an Ethereum-side lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthereumTransfer {
    pub approve_tx: String,
    pub lock_tx: String,
}

/// Approve the bridge for the amount, then lock it.
#[tracing::instrument(skip_all, fields(nonce = lock.call.nonce))]
pub async fn lock_from_ethereum<L: EvmLedger + ?Sized>(
    ledger: &L,
    lock: &EthereumLock,
) -> Result<EthereumTransfer, RelayError> {
    let approve = encode_approve(lock.bridge_contract, lock.call.amount);
    let approve_tx = ledger.send_call(lock.token_contract, approve).await?;
    info!(%approve_tx, "bridge approved");

    let lock_tx = ledger
        .send_call(lock.bridge_contract, lock.call.encode())
        .await?;
    info!(%lock_tx, "assets locked");

    Ok(EthereumTransfer {
        approve_tx,
        lock_tx,
    })
}
