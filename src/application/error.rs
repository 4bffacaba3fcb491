use thiserror::Error;

use crate::domain::{Amount, ParseAmountError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Balance cannot be negative: {0}")]
    NegativeBalance(Amount),

    #[error("User already exists: {0}")]
    DuplicateName(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid password for user {0}")]
    InvalidCredentials(String),

    #[error("Log in first")]
    Unauthenticated,

    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Amount),

    #[error("Cannot transfer to yourself")]
    SelfTransfer,

    #[error("Insufficient funds for {user_name}: balance {balance}, required {required}")]
    InsufficientFunds {
        user_name: String,
        balance: Amount,
        required: Amount,
    },

    #[error("Balance of {user_name} would overflow by receiving {amount}")]
    BalanceOverflow { user_name: String, amount: Amount },

    #[error("Invalid number: {0}")]
    ParseFailure(#[from] ParseAmountError),
}
