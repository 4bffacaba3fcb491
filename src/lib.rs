pub mod application;
pub mod cli;
pub mod domain;

pub use application::{AppError, Ledger, Session};
pub use domain::*;
