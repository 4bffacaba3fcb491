// Application layer - the ledger service and its session handles.
// Clients (the interactive shell, tests) only talk to `Ledger`.

pub mod error;
pub mod service;
pub mod session;

pub use error::*;
pub use service::*;
pub use session::*;
