//! Storage abstraction for the ledger.
//!
//! All operations are synchronous whole-collection reads and rewrites
//! (plus appends); the system is single-threaded and event-driven, and
//! concurrent access is unsupported. A missing backing file reads as an
//! empty collection. Per-employee data is addressed by the employee
//! record itself, since file-backed implementations derive file names
//! from the employee's name and id.

pub mod memory;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Employee, Invoice, PaymentRecord};

pub use memory::MemoryRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Io(err.to_string())
    }
}

pub trait PayrollRepository {
    // Roster
    fn load_employees(&self) -> Result<Vec<Employee>, RepositoryError>;
    fn save_employees(&self, employees: &[Employee]) -> Result<(), RepositoryError>;

    // Active invoice set
    /// Creates an empty (header-only) active set for a new employee.
    fn create_invoice_file(&self, employee: &Employee) -> Result<(), RepositoryError>;
    fn load_invoices(&self, employee: &Employee) -> Result<Vec<Invoice>, RepositoryError>;
    fn append_invoice(
        &self,
        employee: &Employee,
        invoice: &Invoice,
    ) -> Result<(), RepositoryError>;
    fn save_invoices(
        &self,
        employee: &Employee,
        invoices: &[Invoice],
    ) -> Result<(), RepositoryError>;
    /// Moves the active set to the new identity when an employee's id or
    /// name changes. Archives and payment history keep their old names.
    fn rename_invoice_file(
        &self,
        old: &Employee,
        new: &Employee,
    ) -> Result<(), RepositoryError>;

    // Archives
    /// Copies the active set verbatim into the archive keyed by
    /// (employee, week-ending date), then clears the active set back to
    /// empty. A missing active set is a no-op.
    fn archive_invoices(
        &self,
        employee: &Employee,
        week_ending: NaiveDate,
    ) -> Result<(), RepositoryError>;
    /// Week-ending dates with an archive for this employee, newest first.
    fn list_archives(&self, employee: &Employee) -> Result<Vec<NaiveDate>, RepositoryError>;
    fn load_archive(
        &self,
        employee: &Employee,
        week_ending: NaiveDate,
    ) -> Result<Vec<Invoice>, RepositoryError>;

    // Payment history
    fn append_payment(
        &self,
        employee: &Employee,
        payment: &PaymentRecord,
    ) -> Result<(), RepositoryError>;
    fn load_payments(&self, employee: &Employee) -> Result<Vec<PaymentRecord>, RepositoryError>;
}
