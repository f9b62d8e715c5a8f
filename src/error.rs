use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount text that does not parse as a decimal number. No entry is created.
    #[error("invalid amount: {raw:?}")]
    InvalidAmount { raw: String },
}
