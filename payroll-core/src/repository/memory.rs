//! In-memory repository, used by tests and by embedders that do not need
//! files on disk.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{Employee, Invoice, PaymentRecord};

use super::{PayrollRepository, RepositoryError};

#[derive(Debug, Default)]
struct Store {
    employees: Vec<Employee>,
    invoices: HashMap<u32, Vec<Invoice>>,
    archives: HashMap<u32, BTreeMap<NaiveDate, Vec<Invoice>>>,
    payments: HashMap<u32, Vec<PaymentRecord>>,
}

/// Keyed by employee id; renaming an employee moves the active set to the
/// new id, matching the file backend's rename of the active file.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RefCell<Store>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayrollRepository for MemoryRepository {
    fn load_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.inner.borrow().employees.clone())
    }

    fn save_employees(&self, employees: &[Employee]) -> Result<(), RepositoryError> {
        self.inner.borrow_mut().employees = employees.to_vec();
        Ok(())
    }

    fn create_invoice_file(&self, employee: &Employee) -> Result<(), RepositoryError> {
        self.inner
            .borrow_mut()
            .invoices
            .entry(employee.id)
            .or_default();
        Ok(())
    }

    fn load_invoices(&self, employee: &Employee) -> Result<Vec<Invoice>, RepositoryError> {
        Ok(self
            .inner
            .borrow()
            .invoices
            .get(&employee.id)
            .cloned()
            .unwrap_or_default())
    }

    fn append_invoice(
        &self,
        employee: &Employee,
        invoice: &Invoice,
    ) -> Result<(), RepositoryError> {
        self.inner
            .borrow_mut()
            .invoices
            .entry(employee.id)
            .or_default()
            .push(invoice.clone());
        Ok(())
    }

    fn save_invoices(
        &self,
        employee: &Employee,
        invoices: &[Invoice],
    ) -> Result<(), RepositoryError> {
        self.inner
            .borrow_mut()
            .invoices
            .insert(employee.id, invoices.to_vec());
        Ok(())
    }

    fn rename_invoice_file(
        &self,
        old: &Employee,
        new: &Employee,
    ) -> Result<(), RepositoryError> {
        if old.id == new.id {
            return Ok(());
        }
        let mut store = self.inner.borrow_mut();
        if let Some(active) = store.invoices.remove(&old.id) {
            store.invoices.insert(new.id, active);
        }
        Ok(())
    }

    fn archive_invoices(
        &self,
        employee: &Employee,
        week_ending: NaiveDate,
    ) -> Result<(), RepositoryError> {
        let mut store = self.inner.borrow_mut();
        let Some(active) = store.invoices.get_mut(&employee.id) else {
            return Ok(()); // nothing to archive
        };
        let frozen = std::mem::take(active);
        store
            .archives
            .entry(employee.id)
            .or_default()
            .insert(week_ending, frozen);
        Ok(())
    }

    fn list_archives(&self, employee: &Employee) -> Result<Vec<NaiveDate>, RepositoryError> {
        Ok(self
            .inner
            .borrow()
            .archives
            .get(&employee.id)
            .map(|weeks| weeks.keys().rev().copied().collect())
            .unwrap_or_default())
    }

    fn load_archive(
        &self,
        employee: &Employee,
        week_ending: NaiveDate,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        self.inner
            .borrow()
            .archives
            .get(&employee.id)
            .and_then(|weeks| weeks.get(&week_ending))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn append_payment(
        &self,
        employee: &Employee,
        payment: &PaymentRecord,
    ) -> Result<(), RepositoryError> {
        self.inner
            .borrow_mut()
            .payments
            .entry(employee.id)
            .or_default()
            .push(*payment);
        Ok(())
    }

    fn load_payments(&self, employee: &Employee) -> Result<Vec<PaymentRecord>, RepositoryError> {
        Ok(self
            .inner
            .borrow()
            .payments
            .get(&employee.id)
            .cloned()
            .unwrap_or_default())
    }
}
