use thiserror::Error;

/// Failure taxonomy for ledger operations. Every rejected operation leaves
/// state unchanged; none of these are retried inside the core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("account not registered: {0}")]
    NotRegistered(String),
    #[error("account already registered: {0}")]
    AlreadyRegistered(String),
    #[error("account frozen: {0}")]
    AccountFrozen(String),
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("insufficient locked balance")]
    InsufficientLockedBalance,
    #[error("burn amount exceeds accounted supply")]
    InsufficientSupply,
    #[error("authorization expired")]
    Expired,
    #[error("authorization scope does not cover this transfer")]
    ScopeMismatch,
    #[error("requested amount exceeds authorization limit")]
    LimitExceeded,
    #[error("authorization nonce mismatch: account at {expected}, authorization carries {got}")]
    NonceMismatch { expected: u64, got: u64 },
    #[error("invalid authorization signature")]
    BadSignature,
    #[error("authorization signer is not a legal sponsor")]
    UnauthorizedSigner,
    #[error("unknown sponsor: {0}")]
    UnknownSponsor(String),
    /// Surfaced by callers that enforce administrative authority on the
    /// privileged operations; the core itself does not model admin identity.
    #[error("caller lacks administrative authority")]
    Unauthorized,
    #[error("balance arithmetic overflow")]
    Overflow,
    #[error("storage error: {0}")]
    StorageError(String),
}
