use thiserror::Error;

/// Solana-side bridge encoding errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("integer overflow: {0}")]
    IntegerOverflow(String),

    #[error("padding overflow: {len} bytes do not fit in {width}")]
    PaddingOverflow { len: usize, width: usize },

    #[error("layout error: {0}")]
    Layout(String),

    #[error("invalid seeds: {0}")]
    InvalidSeeds(String),

    #[error("no valid program address for seeds")]
    PdaNotFound,

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("malformed attestation: {0}")]
    MalformedAttestation(String),
}
