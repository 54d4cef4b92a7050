use crate::core::user::UserId;
use thiserror::Error;

/// Errors returned by ledger operations.
///
/// Every error leaves the ledger untouched: inputs are validated in full
/// before anything is appended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("user id already exists: {0}")]
    DuplicateId(UserId),

    #[error("unknown user: {0}")]
    UnknownUser(UserId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LedgerError::DuplicateId(UserId::new("A")).to_string(),
            "user id already exists: A"
        );
        assert_eq!(
            LedgerError::UnknownUser(UserId::new("Z")).to_string(),
            "unknown user: Z"
        );
        assert_eq!(
            LedgerError::InvalidInput("amount must be positive".into()).to_string(),
            "invalid input: amount must be positive"
        );
    }
}
