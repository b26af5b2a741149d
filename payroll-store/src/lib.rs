//! Flat-file storage backend for the payroll ledger.
//!
//! One CSV table per concern, one row per record, header row always
//! present: the roster in `employees.csv`, each employee's active
//! invoice set under `invoices/`, frozen weekly snapshots under
//! `archived_invoices/`, and append-only payment history under
//! `payment_history/`. Every mutation is a synchronous whole-file
//! read-modify-write (or append); there is no locking and no
//! temp-file-then-rename step.

pub mod paths;
pub mod repository;
pub mod rows;

pub use repository::FileRepository;
