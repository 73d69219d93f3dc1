//! Fetching guardian signatures from the signature-status account.

use std::time::Duration;

use backoff::backoff::Constant;
use backoff::future::retry_notify;
use bridge_sol::{bytes_to_address, parse_signature_slots, SignatureSlot};
use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::RelayError;
use crate::ledger::SolanaLedger;

/// Read the signature-status account once.
///
/// A missing account, or one with no lamports, is reported as
/// [`RelayError::AccountNotFound`]: the bridge has not allocated it yet.
pub async fn fetch_signature_status<L: SolanaLedger + ?Sized>(
    ledger: &L,
    address: &[u8; 32],
) -> Result<Vec<SignatureSlot>, RelayError> {
    let account = ledger
        .get_account(address)
        .await?
        .filter(|account| account.lamports > 0)
        .ok_or_else(|| RelayError::AccountNotFound(bytes_to_address(address)))?;

    Ok(parse_signature_slots(&account.data)?)
}

/// Poll the signature-status account until it can be read.
///
/// Only "not found" is retried, every `policy.poll_interval()`. Any other
/// error ends the poll immediately, as does reaching `policy.max_attempts`.
#[tracing::instrument(skip_all, fields(account = %bytes_to_address(address)))]
pub async fn poll_signature_status<L: SolanaLedger + ?Sized>(
    ledger: &L,
    address: &[u8; 32],
    policy: &RetryPolicy,
) -> Result<Vec<SignatureSlot>, RelayError> {
    let mut attempts: u32 = 0;
    let operation = || {
        attempts = attempts.saturating_add(1);
        let attempt = attempts;
        async move {
            fetch_signature_status(ledger, address)
                .await
                .map_err(|error| match error {
                    error if !error.is_not_found() => backoff::Error::permanent(error),
                    _ if policy.max_attempts.is_some_and(|max| attempt >= max) => {
                        backoff::Error::permanent(RelayError::RetriesExhausted {
                            attempts: attempt,
                        })
                    }
                    error => backoff::Error::transient(error),
                })
        }
    };
    let notify = |error: RelayError, wait: Duration| {
        warn!(%error, ?wait, "signature status not available yet, retrying");
    };

    let slots = retry_notify(Constant::new(policy.poll_interval()), operation, notify).await?;
    debug!(signatures = slots.len(), "signature status read");
    Ok(slots)
}
