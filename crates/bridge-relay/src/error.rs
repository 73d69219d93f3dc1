use bridge_eth::EthError;
use bridge_sol::SolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("SOL: {0}")]
    Sol(#[from] SolError),

    #[error("ETH: {0}")]
    Eth(#[from] EthError),

    #[error("Invalid config: {0}")]
    Config(String),

    /// The account does not exist or holds no lamports yet. Recoverable:
    /// callers poll until it appears.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Ledger request failed: {0}")]
    Ledger(String),

    #[error("Subscription to {0} closed before an attestation arrived")]
    SubscriptionClosed(String),

    #[error("Gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

impl RelayError {
    /// Whether polling the same request again may succeed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RelayError::AccountNotFound(_))
    }
}
