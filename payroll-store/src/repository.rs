//! CSV-backed implementation of the core repository trait.
//!
//! Reads are lenient: a missing file is an empty collection, and a row
//! that cannot be parsed is skipped with a warning rather than failing
//! the whole table. Writes are strict and surface their errors.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use payroll_core::repository::{PayrollRepository, RepositoryError};
use payroll_core::{Employee, Invoice, PaymentRecord};
use serde::Serialize;
use tracing::warn;

use crate::paths;
use crate::rows::{
    EMPLOYEE_HEADERS, EmployeeRow, INVOICE_HEADERS, InvoiceRow, PAYMENT_HEADERS, PaymentRow,
};

fn store_err(err: csv::Error) -> RepositoryError {
    if err.is_io_error() {
        RepositoryError::Io(err.to_string())
    } else {
        RepositoryError::Malformed(err.to_string())
    }
}

/// Flat-file repository rooted at a data directory.
///
/// Layout under the root: `employees.csv`, `invoices/`,
/// `archived_invoices/`, `payment_history/`. Directories are created on
/// first write.
#[derive(Debug, Clone)]
pub struct FileRepository {
    data_dir: PathBuf,
}

impl FileRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Rewrites a whole table: header first, then every row.
    fn rewrite<T: Serialize>(
        &self,
        path: &Path,
        headers: &[&str],
        rows: &[T],
    ) -> Result<(), RepositoryError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(store_err)?;
        writer.write_record(headers).map_err(store_err)?;
        for row in rows {
            writer.serialize(row).map_err(store_err)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Appends one row, writing the header first when the file is new.
    fn append<T: Serialize>(
        &self,
        path: &Path,
        headers: &[&str],
        row: &T,
    ) -> Result<(), RepositoryError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let is_new = !path.exists();
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if is_new {
            writer.write_record(headers).map_err(store_err)?;
        }
        writer.serialize(row).map_err(store_err)?;
        writer.flush()?;
        Ok(())
    }

    fn read_invoice_rows(&self, path: &Path) -> Result<Vec<Invoice>, RepositoryError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(store_err)?;
        let mut invoices = Vec::new();
        for (idx, result) in reader.deserialize::<InvoiceRow>().enumerate() {
            match result.map_err(store_err).and_then(InvoiceRow::into_invoice) {
                Ok(invoice) => invoices.push(invoice),
                Err(err) => warn!(
                    path = %path.display(),
                    row = idx + 1,
                    %err,
                    "skipping unreadable invoice row"
                ),
            }
        }
        Ok(invoices)
    }
}

impl PayrollRepository for FileRepository {
    fn load_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        let path = paths::employees_file(&self.data_dir);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(store_err)?;
        let mut employees = Vec::new();
        for (idx, result) in reader.deserialize::<EmployeeRow>().enumerate() {
            match result {
                Ok(row) => employees.push(row.into_employee()),
                Err(err) => warn!(
                    path = %path.display(),
                    row = idx + 1,
                    err = %store_err(err),
                    "skipping unreadable employee row"
                ),
            }
        }
        Ok(employees)
    }

    fn save_employees(&self, employees: &[Employee]) -> Result<(), RepositoryError> {
        let rows: Vec<EmployeeRow> = employees.iter().map(EmployeeRow::from_employee).collect();
        self.rewrite(
            &paths::employees_file(&self.data_dir),
            &EMPLOYEE_HEADERS,
            &rows,
        )
    }

    fn create_invoice_file(&self, employee: &Employee) -> Result<(), RepositoryError> {
        self.save_invoices(employee, &[])
    }

    fn load_invoices(&self, employee: &Employee) -> Result<Vec<Invoice>, RepositoryError> {
        let path = paths::invoice_file(&self.data_dir, employee);
        if !path.exists() {
            return Ok(Vec::new());
        }
        self.read_invoice_rows(&path)
    }

    fn append_invoice(
        &self,
        employee: &Employee,
        invoice: &Invoice,
    ) -> Result<(), RepositoryError> {
        self.append(
            &paths::invoice_file(&self.data_dir, employee),
            &INVOICE_HEADERS,
            &InvoiceRow::from_invoice(invoice),
        )
    }

    fn save_invoices(
        &self,
        employee: &Employee,
        invoices: &[Invoice],
    ) -> Result<(), RepositoryError> {
        let rows: Vec<InvoiceRow> = invoices.iter().map(InvoiceRow::from_invoice).collect();
        self.rewrite(
            &paths::invoice_file(&self.data_dir, employee),
            &INVOICE_HEADERS,
            &rows,
        )
    }

    fn rename_invoice_file(
        &self,
        old: &Employee,
        new: &Employee,
    ) -> Result<(), RepositoryError> {
        let from = paths::invoice_file(&self.data_dir, old);
        let to = paths::invoice_file(&self.data_dir, new);
        if from == to || !from.exists() {
            return Ok(());
        }
        fs::rename(&from, &to)?;
        Ok(())
    }

    fn archive_invoices(
        &self,
        employee: &Employee,
        week_ending: NaiveDate,
    ) -> Result<(), RepositoryError> {
        let active = paths::invoice_file(&self.data_dir, employee);
        if !active.exists() {
            return Ok(()); // nothing to archive
        }
        let archive = paths::archive_file(&self.data_dir, employee, week_ending);
        if let Some(parent) = archive.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&active, &archive)?;
        // Clear the active set back to a header-only table.
        self.save_invoices(employee, &[])
    }

    fn list_archives(&self, employee: &Employee) -> Result<Vec<NaiveDate>, RepositoryError> {
        let dir = self.data_dir.join(paths::ARCHIVE_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let prefix = paths::archive_prefix(employee);
        let mut weeks = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix)
                && let Some(week) = paths::archive_week_ending(name)
            {
                weeks.push(week);
            }
        }
        weeks.sort_unstable();
        weeks.reverse(); // most recent first
        Ok(weeks)
    }

    fn load_archive(
        &self,
        employee: &Employee,
        week_ending: NaiveDate,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let path = paths::archive_file(&self.data_dir, employee, week_ending);
        if !path.exists() {
            return Err(RepositoryError::NotFound);
        }
        self.read_invoice_rows(&path)
    }

    fn append_payment(
        &self,
        employee: &Employee,
        payment: &PaymentRecord,
    ) -> Result<(), RepositoryError> {
        self.append(
            &paths::payments_file(&self.data_dir, employee),
            &PAYMENT_HEADERS,
            &PaymentRow::from_payment(payment),
        )
    }

    fn load_payments(&self, employee: &Employee) -> Result<Vec<PaymentRecord>, RepositoryError> {
        let path = paths::payments_file(&self.data_dir, employee);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(store_err)?;
        let mut payments = Vec::new();
        for (idx, result) in reader.deserialize::<PaymentRow>().enumerate() {
            match result {
                Ok(row) => payments.push(row.into_payment()),
                Err(err) => warn!(
                    path = %path.display(),
                    row = idx + 1,
                    err = %store_err(err),
                    "skipping unreadable payment row"
                ),
            }
        }
        Ok(payments)
    }
}
