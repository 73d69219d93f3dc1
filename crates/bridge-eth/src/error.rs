use thiserror::Error;

/// Ethereum-side bridge encoding errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_address() {
        let err = EthError::InvalidAddress("bad checksum".into());
        assert_eq!(err.to_string(), "invalid address: bad checksum");
    }

    #[test]
    fn display_invalid_amount() {
        let err = EthError::InvalidAmount("not a number".into());
        assert_eq!(err.to_string(), "invalid amount: not a number");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(EthError::InvalidAddress("test".into()));
        assert!(err.to_string().contains("test"));
    }
}
