//! Attestation aggregation for one outstanding transfer.
//!
//! ```text
//! AwaitingProposal ──(non-empty VAA prefix)──▶ ExtractingAttestation
//!        ▲  │                                          │ unsubscribe
//!        └──┘ empty / partial                          ▼
//!                                            AwaitingSignatures ──▶ Finalized
//! ```
//!
//! Notifications may arrive repeatedly while the bridge is still writing the
//! proposal; every notification before the first usable prefix is a no-op.
//! The account subscription is always cancelled before the signature poll,
//! so a transfer is never aggregated twice.

use bridge_sol::{
    bytes_to_address, extract_attestation_prefix, splice_signatures, TransferOutProposal,
};
use tracing::{debug, info};

use crate::config::RetryPolicy;
use crate::error::RelayError;
use crate::ledger::{AccountSubscription, SolanaLedger};
use crate::signatures::poll_signature_status;

/// An attestation body cut at its sentinel, and where its signatures live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttestation {
    pub prefix: Vec<u8>,
    pub signature_account: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationState {
    AwaitingProposal,
    ExtractingAttestation(PendingAttestation),
    AwaitingSignatures(PendingAttestation),
    /// The assembled VAA.
    Finalized(Vec<u8>),
}

#[derive(Debug)]
pub struct AttestationAggregator {
    transfer_key: [u8; 32],
    policy: RetryPolicy,
    state: AggregationState,
}

impl AttestationAggregator {
    pub fn new(transfer_key: [u8; 32], policy: RetryPolicy) -> Self {
        Self {
            transfer_key,
            policy,
            state: AggregationState::AwaitingProposal,
        }
    }

    pub fn state(&self) -> &AggregationState {
        &self.state
    }

    /// Apply one account-change notification carrying the proposal's data.
    ///
    /// Only acts in `AwaitingProposal`; notifications in any later state are
    /// ignored. A proposal that fails to decode is a protocol error.
    pub fn on_notification(&mut self, data: &[u8]) -> Result<&AggregationState, RelayError> {
        if self.state != AggregationState::AwaitingProposal {
            return Ok(&self.state);
        }

        let proposal = TransferOutProposal::decode(data)?;
        match extract_attestation_prefix(&proposal.vaa) {
            Some(prefix) => {
                debug!(
                    prefix_len = prefix.len(),
                    source = %proposal.source_account_address(),
                    signature_account = %proposal.signature_account_address(),
                    "attestation prefix found"
                );
                self.state = AggregationState::ExtractingAttestation(PendingAttestation {
                    prefix: prefix.to_vec(),
                    signature_account: proposal.signature_account,
                });
            }
            None => debug!("proposal carries no attestation yet"),
        }
        Ok(&self.state)
    }

    /// Drive the transfer to `Finalized` and return the assembled VAA.
    ///
    /// `subscription` must watch the transfer-out proposal account. It is
    /// cancelled before polling for signatures, and on every error path once
    /// notifications stop being read.
    ///
    /// A later call resumes from the current state: an aggregator that
    /// already holds a prefix goes straight back to polling, a finalized one
    /// returns its VAA. Neither reads the new subscription.
    #[tracing::instrument(
        skip_all,
        fields(transfer = %bytes_to_address(&self.transfer_key))
    )]
    pub async fn run<L: SolanaLedger + ?Sized>(
        &mut self,
        ledger: &L,
        subscription: AccountSubscription,
    ) -> Result<Vec<u8>, RelayError> {
        let AccountSubscription { id, mut receiver } = subscription;

        let resumed = match self.state.clone() {
            AggregationState::AwaitingProposal => None,
            AggregationState::ExtractingAttestation(pending)
            | AggregationState::AwaitingSignatures(pending) => Some(pending),
            AggregationState::Finalized(vaa) => {
                drop(receiver);
                ledger.unsubscribe(id).await?;
                debug!("already finalized");
                return Ok(vaa);
            }
        };
        let pending = match resumed {
            Some(pending) => {
                debug!("resuming signature poll");
                Ok(pending)
            }
            None => self.await_attestation(&mut receiver).await,
        };
        drop(receiver);
        ledger.unsubscribe(id).await?;
        let pending = pending?;

        self.state = AggregationState::AwaitingSignatures(pending.clone());
        debug!("unsubscribed, polling signature status");

        let slots =
            poll_signature_status(ledger, &pending.signature_account, &self.policy).await?;
        let vaa = splice_signatures(&pending.prefix, &slots)?;

        info!(
            signatures = slots.len(),
            vaa = %hex::encode(&vaa),
            "attestation finalized"
        );
        self.state = AggregationState::Finalized(vaa.clone());
        Ok(vaa)
    }

    async fn await_attestation(
        &mut self,
        receiver: &mut tokio::sync::mpsc::Receiver<Vec<u8>>,
    ) -> Result<PendingAttestation, RelayError> {
        loop {
            let data = receiver
                .recv()
                .await
                .ok_or_else(|| RelayError::SubscriptionClosed(bytes_to_address(&self.transfer_key)))?;

            if let AggregationState::ExtractingAttestation(pending) = self.on_notification(&data)? {
                return Ok(pending.clone());
            }
        }
    }
}
