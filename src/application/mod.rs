// Application layer - ledger orchestration and the confirmation gate.

pub mod error;
pub mod security;
pub mod service;

pub use error::*;
pub use security::*;
pub use service::*;
