pub mod calculations;
pub mod ledger;
pub mod models;
pub mod repository;

pub use ledger::{CloseOut, Ledger, LedgerError, StatusChange};
pub use models::*;
pub use repository::{MemoryRepository, PayrollRepository, RepositoryError};
