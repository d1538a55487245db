use thiserror::Error;

use crate::domain::Paisa;

/// Failures surfaced by the ledger. All variants are recoverable: the
/// ledger state is left unchanged whenever one is returned.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid transaction amount")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientBalance { balance: Paisa, requested: Paisa },

    #[error("An unexpected error occurred while processing your transaction.")]
    Unexpected(String),
}
