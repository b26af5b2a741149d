//! The payroll ledger: roster maintenance, invoice operations, and the
//! weekly close-out transition.
//!
//! Each employee's week moves Open -> Closed -> Open. While open, invoice
//! additions and edits accumulate into `weekly_pay`. Close-out records a
//! payment, freezes the active invoice set into a dated archive, folds
//! weekly pay into year-to-date, and resets the accumulator, so the next
//! week starts empty.
//!
//! Weekly pay is delta-maintained: an invoice edit adjusts it by exactly
//! `new_commission - old_commission` rather than refolding the active
//! set. [`Ledger::active_commission_total`] exposes the fold for callers
//! that want to check the accumulator against it; the accumulator stays
//! authoritative because manual overrides may legitimately diverge.
//!
//! Logical no-ops (closing out a zero week, setting a status it already
//! has) are reported as values, not errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Employee, Invoice, InvoiceStatus, NewInvoice, PaymentRecord};
use crate::repository::{PayrollRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("no employee with id {0}")]
    EmployeeNotFound(u32),

    #[error("employee id {0} is already in use")]
    DuplicateEmployeeId(u32),

    #[error("employee name cannot be empty")]
    EmptyName,

    #[error("invoice #{0} already exists in the active set")]
    DuplicateInvoiceNumber(String),

    #[error("no invoice #{0} in the active set")]
    InvoiceNotFound(String),

    #[error("invoice number and customer cannot be empty")]
    MissingInvoiceFields,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome of a close-out request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOut {
    /// The week was closed and this amount paid out.
    Paid { amount: Decimal },
    /// Weekly pay was zero (or below); nothing was recorded.
    NothingToPay,
}

/// Outcome of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Updated,
    /// The invoice already had the requested status; nothing was written.
    AlreadySet,
}

/// One row of the weekly pay report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPayRow {
    pub id: u32,
    pub name: String,
    pub weekly_pay: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPayReport {
    pub rows: Vec<WeeklyPayRow>,
    pub total: Decimal,
}

/// One row of the year-to-date report, with the most recent payment date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtdPayRow {
    pub id: u32,
    pub name: String,
    pub year_to_date_pay: Decimal,
    pub last_paid: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtdPayReport {
    pub rows: Vec<YtdPayRow>,
    pub total: Decimal,
}

/// Owns the repository and the loaded roster. Every mutation persists
/// through the repository before returning; validation happens before
/// the first write, so a rejected operation leaves no partial state.
pub struct Ledger<R: PayrollRepository> {
    repo: R,
    employees: Vec<Employee>,
}

impl<R: PayrollRepository> Ledger<R> {
    /// Loads the roster from the repository.
    pub fn open(repo: R) -> Result<Self, LedgerError> {
        let employees = repo.load_employees()?;
        Ok(Self { repo, employees })
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: u32) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    fn index_of(&self, id: u32) -> Result<usize, LedgerError> {
        self.employees
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::EmployeeNotFound(id))
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    pub fn add_employee(&mut self, id: u32, name: &str) -> Result<(), LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.employees.iter().any(|e| e.id == id) {
            return Err(LedgerError::DuplicateEmployeeId(id));
        }

        let employee = Employee::new(id, name, Decimal::ZERO, Decimal::ZERO);
        self.repo.create_invoice_file(&employee)?;
        self.employees.push(employee);
        self.repo.save_employees(&self.employees)?;
        info!(id, name, "employee added");
        Ok(())
    }

    /// Changes an employee's id and/or name. The active invoice file
    /// follows the new identity; archives and payment history keep the
    /// names they were written under.
    pub fn update_employee(
        &mut self,
        id: u32,
        new_id: u32,
        new_name: &str,
    ) -> Result<(), LedgerError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if new_id != id && self.employees.iter().any(|e| e.id == new_id) {
            return Err(LedgerError::DuplicateEmployeeId(new_id));
        }

        let idx = self.index_of(id)?;
        let old = self.employees[idx].clone();
        let mut updated = old.clone();
        updated.id = new_id;
        updated.name = new_name.to_string();

        self.repo.rename_invoice_file(&old, &updated)?;
        self.employees[idx] = updated;
        self.repo.save_employees(&self.employees)?;
        info!(old_id = id, new_id, new_name, "employee updated");
        Ok(())
    }

    /// Manual override of the weekly accumulator, floored at zero.
    pub fn set_weekly_pay(&mut self, id: u32, amount: Decimal) -> Result<(), LedgerError> {
        let idx = self.index_of(id)?;
        self.employees[idx].set_weekly_pay(amount);
        self.repo.save_employees(&self.employees)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Invoices
    // ------------------------------------------------------------------

    /// Adds an invoice to the employee's active set and grows weekly pay
    /// by its commission. Returns the stored invoice.
    pub fn add_invoice(&mut self, id: u32, new: NewInvoice) -> Result<Invoice, LedgerError> {
        if new.number.trim().is_empty() || new.customer.trim().is_empty() {
            return Err(LedgerError::MissingInvoiceFields);
        }
        let idx = self.index_of(id)?;

        let number = new.number.trim();
        let active = self.repo.load_invoices(&self.employees[idx])?;
        if active.iter().any(|i| i.number == number) {
            return Err(LedgerError::DuplicateInvoiceNumber(number.to_string()));
        }

        let invoice = new.build();
        self.repo.append_invoice(&self.employees[idx], &invoice)?;
        self.employees[idx].apply_commission_delta(invoice.commission);
        self.repo.save_employees(&self.employees)?;
        info!(
            employee = id,
            invoice = %invoice.number,
            commission = %invoice.commission,
            "invoice added"
        );
        Ok(invoice)
    }

    /// Replaces the invoice identified by `number` and adjusts weekly pay
    /// by exactly the commission delta. Never refolds the active set.
    pub fn update_invoice(
        &mut self,
        id: u32,
        number: &str,
        new: NewInvoice,
    ) -> Result<Invoice, LedgerError> {
        if new.number.trim().is_empty() || new.customer.trim().is_empty() {
            return Err(LedgerError::MissingInvoiceFields);
        }
        let idx = self.index_of(id)?;

        let mut active = self.repo.load_invoices(&self.employees[idx])?;
        let pos = active
            .iter()
            .position(|i| i.number == number)
            .ok_or_else(|| LedgerError::InvoiceNotFound(number.to_string()))?;

        let replacement = new.build();
        if replacement.number != number
            && active.iter().any(|i| i.number == replacement.number)
        {
            return Err(LedgerError::DuplicateInvoiceNumber(replacement.number));
        }

        let old_commission = active[pos].commission;
        active[pos] = replacement.clone();
        self.repo.save_invoices(&self.employees[idx], &active)?;

        let delta = replacement.commission - old_commission;
        self.employees[idx].apply_commission_delta(delta);
        self.repo.save_employees(&self.employees)?;
        info!(
            employee = id,
            invoice = %replacement.number,
            delta = %delta,
            "invoice updated"
        );
        Ok(replacement)
    }

    /// Sets an invoice's Paid/Unpaid status. Setting the status it
    /// already has is a reported no-op.
    pub fn set_invoice_status(
        &mut self,
        id: u32,
        number: &str,
        status: InvoiceStatus,
    ) -> Result<StatusChange, LedgerError> {
        let idx = self.index_of(id)?;

        let mut active = self.repo.load_invoices(&self.employees[idx])?;
        let pos = active
            .iter()
            .position(|i| i.number == number)
            .ok_or_else(|| LedgerError::InvoiceNotFound(number.to_string()))?;

        if active[pos].status == status {
            info!(employee = id, invoice = %number, status = status.as_str(), "status unchanged");
            return Ok(StatusChange::AlreadySet);
        }

        active[pos].status = status;
        self.repo.save_invoices(&self.employees[idx], &active)?;
        Ok(StatusChange::Updated)
    }

    // ------------------------------------------------------------------
    // Close-out
    // ------------------------------------------------------------------

    /// Finalizes an employee's week against the given payment date.
    ///
    /// Guards first: with zero (or negative) weekly pay nothing is
    /// recorded and `NothingToPay` is returned, which also makes a
    /// double close-out harmless. Otherwise: append a payment record,
    /// freeze the active invoice set into the dated archive and clear
    /// it, fold weekly pay into year-to-date, reset the accumulator.
    pub fn close_out_week(
        &mut self,
        id: u32,
        payment_date: NaiveDate,
    ) -> Result<CloseOut, LedgerError> {
        let idx = self.index_of(id)?;

        if self.employees[idx].weekly_pay <= Decimal::ZERO {
            info!(employee = id, "no weekly pay to close out");
            return Ok(CloseOut::NothingToPay);
        }

        let snapshot = self.employees[idx].clone();
        self.repo.append_payment(
            &snapshot,
            &PaymentRecord {
                date: payment_date,
                amount: snapshot.weekly_pay,
            },
        )?;
        self.repo.archive_invoices(&snapshot, payment_date)?;

        let paid = self.employees[idx].close_out();
        self.repo.save_employees(&self.employees)?;
        info!(employee = id, amount = %paid, date = %payment_date, "week closed out");
        Ok(CloseOut::Paid { amount: paid })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn invoices(&self, id: u32) -> Result<Vec<Invoice>, LedgerError> {
        let idx = self.index_of(id)?;
        Ok(self.repo.load_invoices(&self.employees[idx])?)
    }

    /// Fold of the active set's commissions. Diverges from `weekly_pay`
    /// only when a manual override has been applied.
    pub fn active_commission_total(&self, id: u32) -> Result<Decimal, LedgerError> {
        let invoices = self.invoices(id)?;
        let total = invoices.iter().map(|i| i.commission).sum();
        if let Some(employee) = self.employee(id)
            && employee.weekly_pay != total
        {
            warn!(
                employee = id,
                weekly_pay = %employee.weekly_pay,
                folded = %total,
                "weekly pay differs from active commission total"
            );
        }
        Ok(total)
    }

    pub fn archives(&self, id: u32) -> Result<Vec<NaiveDate>, LedgerError> {
        let idx = self.index_of(id)?;
        Ok(self.repo.list_archives(&self.employees[idx])?)
    }

    pub fn archived_invoices(
        &self,
        id: u32,
        week_ending: NaiveDate,
    ) -> Result<Vec<Invoice>, LedgerError> {
        let idx = self.index_of(id)?;
        Ok(self.repo.load_archive(&self.employees[idx], week_ending)?)
    }

    pub fn payments(&self, id: u32) -> Result<Vec<PaymentRecord>, LedgerError> {
        let idx = self.index_of(id)?;
        Ok(self.repo.load_payments(&self.employees[idx])?)
    }

    pub fn last_payment_date(&self, id: u32) -> Result<Option<NaiveDate>, LedgerError> {
        Ok(self.payments(id)?.last().map(|p| p.date))
    }

    pub fn weekly_report(&self) -> WeeklyPayReport {
        let rows: Vec<WeeklyPayRow> = self
            .employees
            .iter()
            .map(|e| WeeklyPayRow {
                id: e.id,
                name: e.name.clone(),
                weekly_pay: e.weekly_pay,
            })
            .collect();
        let total = rows.iter().map(|r| r.weekly_pay).sum();
        WeeklyPayReport { rows, total }
    }

    pub fn ytd_report(&self) -> Result<YtdPayReport, LedgerError> {
        let mut rows = Vec::with_capacity(self.employees.len());
        for e in &self.employees {
            rows.push(YtdPayRow {
                id: e.id,
                name: e.name.clone(),
                year_to_date_pay: e.year_to_date_pay,
                last_paid: self.repo.load_payments(e)?.last().map(|p| p.date),
            });
        }
        let total = rows.iter().map(|r| r.year_to_date_pay).sum();
        Ok(YtdPayReport { rows, total })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::calculations::{CommissionInputs, CommissionSource};
    use crate::repository::MemoryRepository;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger_with_two_employees() -> Ledger<MemoryRepository> {
        let mut ledger = Ledger::open(MemoryRepository::new()).unwrap();
        ledger.add_employee(1, "Ana Reyes").unwrap();
        ledger.add_employee(2, "Ben Walsh").unwrap();
        ledger
    }

    fn card_sale(number: &str, total: Decimal, tip: Decimal, fees: Decimal) -> NewInvoice {
        NewInvoice {
            number: number.into(),
            customer: "Hargrove".into(),
            date: date(2025, 6, 9),
            status: InvoiceStatus::Paid,
            source: CommissionSource::Calculated(CommissionInputs {
                credit_card_used: true,
                total,
                tip,
                materials: dec!(0),
                fees,
            }),
        }
    }

    #[test]
    fn add_employee_starts_with_zero_pay_and_empty_set() {
        let ledger = ledger_with_two_employees();

        let ana = ledger.employee(1).unwrap();
        assert_eq!(ana.weekly_pay, dec!(0));
        assert_eq!(ana.year_to_date_pay, dec!(0));
        assert_eq!(ledger.invoices(1).unwrap(), vec![]);
    }

    #[test]
    fn duplicate_employee_id_is_rejected() {
        let mut ledger = ledger_with_two_employees();

        let err = ledger.add_employee(1, "Impostor").unwrap_err();

        assert!(matches!(err, LedgerError::DuplicateEmployeeId(1)));
        assert_eq!(ledger.employees().len(), 2);
    }

    #[test]
    fn empty_employee_name_is_rejected() {
        let mut ledger = ledger_with_two_employees();

        let err = ledger.add_employee(3, "   ").unwrap_err();

        assert!(matches!(err, LedgerError::EmptyName));
        assert_eq!(ledger.employees().len(), 2);
    }

    #[test]
    fn add_invoice_grows_weekly_pay_by_commission() {
        let mut ledger = ledger_with_two_employees();

        // (200 - 0 - 10) / 2 + 20 = 115
        let stored = ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        assert_eq!(stored.commission, dec!(115));
        assert_eq!(ledger.employee(1).unwrap().weekly_pay, dec!(115));
        assert_eq!(ledger.employee(2).unwrap().weekly_pay, dec!(0));
    }

    #[test]
    fn duplicate_invoice_number_is_rejected_without_state_change() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        let err = ledger
            .add_invoice(1, card_sale("1001", dec!(500), dec!(0), dec!(0)))
            .unwrap_err();

        assert!(matches!(err, LedgerError::DuplicateInvoiceNumber(ref n) if n == "1001"));
        assert_eq!(ledger.employee(1).unwrap().weekly_pay, dec!(115));
        assert_eq!(ledger.invoices(1).unwrap().len(), 1);
    }

    #[test]
    fn same_invoice_number_is_fine_across_employees() {
        let mut ledger = ledger_with_two_employees();

        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger
            .add_invoice(2, card_sale("1001", dec!(100), dec!(0), dec!(0)))
            .unwrap();

        assert_eq!(ledger.invoices(1).unwrap().len(), 1);
        assert_eq!(ledger.invoices(2).unwrap().len(), 1);
    }

    #[test]
    fn missing_invoice_fields_are_rejected() {
        let mut ledger = ledger_with_two_employees();
        let mut blank = card_sale("  ", dec!(200), dec!(20), dec!(10));

        let err = ledger.add_invoice(1, blank.clone()).unwrap_err();
        assert!(matches!(err, LedgerError::MissingInvoiceFields));

        blank.number = "1001".into();
        blank.customer = "".into();
        let err = ledger.add_invoice(1, blank).unwrap_err();
        assert!(matches!(err, LedgerError::MissingInvoiceFields));

        assert_eq!(ledger.employee(1).unwrap().weekly_pay, dec!(0));
    }

    #[test]
    fn update_invoice_moves_weekly_pay_by_exactly_the_delta() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger
            .add_invoice(2, card_sale("2001", dec!(100), dec!(0), dec!(0)))
            .unwrap();
        let ben_before = ledger.employee(2).unwrap().weekly_pay;

        // 115 -> (300 - 0 - 10) / 2 + 20 = 165, delta +50
        ledger
            .update_invoice(1, "1001", card_sale("1001", dec!(300), dec!(20), dec!(10)))
            .unwrap();

        assert_eq!(ledger.employee(1).unwrap().weekly_pay, dec!(165));
        assert_eq!(ledger.employee(2).unwrap().weekly_pay, ben_before);
    }

    #[test]
    fn update_invoice_can_rename_within_the_active_set() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        ledger
            .update_invoice(1, "1001", card_sale("1001-R", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        let invoices = ledger.invoices(1).unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].number, "1001-R");
    }

    #[test]
    fn update_invoice_rejects_rename_onto_existing_number() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger
            .add_invoice(1, card_sale("1002", dec!(100), dec!(0), dec!(0)))
            .unwrap();
        let before = ledger.employee(1).unwrap().weekly_pay;

        let err = ledger
            .update_invoice(1, "1002", card_sale("1001", dec!(100), dec!(0), dec!(0)))
            .unwrap_err();

        assert!(matches!(err, LedgerError::DuplicateInvoiceNumber(ref n) if n == "1001"));
        assert_eq!(ledger.employee(1).unwrap().weekly_pay, before);
    }

    #[test]
    fn update_missing_invoice_is_an_error() {
        let mut ledger = ledger_with_two_employees();

        let err = ledger
            .update_invoice(1, "nope", card_sale("nope", dec!(1), dec!(0), dec!(0)))
            .unwrap_err();

        assert!(matches!(err, LedgerError::InvoiceNotFound(ref n) if n == "nope"));
    }

    #[test]
    fn status_toggle_to_same_value_is_a_reported_noop() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        let outcome = ledger
            .set_invoice_status(1, "1001", InvoiceStatus::Paid)
            .unwrap();

        assert_eq!(outcome, StatusChange::AlreadySet);
        assert_eq!(ledger.invoices(1).unwrap()[0].status, InvoiceStatus::Paid);
    }

    #[test]
    fn status_toggle_updates_and_persists() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        let outcome = ledger
            .set_invoice_status(1, "1001", InvoiceStatus::Unpaid)
            .unwrap();

        assert_eq!(outcome, StatusChange::Updated);
        assert_eq!(ledger.invoices(1).unwrap()[0].status, InvoiceStatus::Unpaid);
        // Status is independent of the commission.
        assert_eq!(ledger.employee(1).unwrap().weekly_pay, dec!(115));
    }

    #[test]
    fn close_out_archives_pays_and_resets() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger
            .add_invoice(1, card_sale("1002", dec!(100), dec!(0), dec!(0)))
            .unwrap();
        let active_before = ledger.invoices(1).unwrap();
        let week = date(2025, 6, 13);

        let outcome = ledger.close_out_week(1, week).unwrap();

        assert_eq!(outcome, CloseOut::Paid { amount: dec!(165) });
        let ana = ledger.employee(1).unwrap();
        assert_eq!(ana.weekly_pay, dec!(0));
        assert_eq!(ana.year_to_date_pay, dec!(165));
        // Active set is empty; the archive holds exactly what was active.
        assert_eq!(ledger.invoices(1).unwrap(), vec![]);
        assert_eq!(ledger.archives(1).unwrap(), vec![week]);
        assert_eq!(ledger.archived_invoices(1, week).unwrap(), active_before);
        // Payment history gained one record.
        assert_eq!(
            ledger.payments(1).unwrap(),
            vec![PaymentRecord {
                date: week,
                amount: dec!(165)
            }]
        );
        assert_eq!(ledger.last_payment_date(1).unwrap(), Some(week));
    }

    #[test]
    fn close_out_with_zero_pay_is_a_guarded_noop() {
        let mut ledger = ledger_with_two_employees();

        let outcome = ledger.close_out_week(1, date(2025, 6, 13)).unwrap();

        assert_eq!(outcome, CloseOut::NothingToPay);
        assert_eq!(ledger.payments(1).unwrap(), vec![]);
        assert_eq!(ledger.archives(1).unwrap(), vec![]);
    }

    #[test]
    fn double_close_out_is_idempotent() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        let week = date(2025, 6, 13);

        ledger.close_out_week(1, week).unwrap();
        let second = ledger.close_out_week(1, week).unwrap();

        assert_eq!(second, CloseOut::NothingToPay);
        assert_eq!(ledger.payments(1).unwrap().len(), 1);
        assert_eq!(ledger.employee(1).unwrap().year_to_date_pay, dec!(115));
    }

    #[test]
    fn successive_weeks_stack_in_ytd_and_archives() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger.close_out_week(1, date(2025, 6, 13)).unwrap();
        ledger
            .add_invoice(1, card_sale("1003", dec!(100), dec!(0), dec!(0)))
            .unwrap();
        ledger.close_out_week(1, date(2025, 6, 20)).unwrap();

        let ana = ledger.employee(1).unwrap();
        assert_eq!(ana.year_to_date_pay, dec!(165));
        // Newest first.
        assert_eq!(
            ledger.archives(1).unwrap(),
            vec![date(2025, 6, 20), date(2025, 6, 13)]
        );
        assert_eq!(ledger.last_payment_date(1).unwrap(), Some(date(2025, 6, 20)));
    }

    #[test]
    fn weekly_pay_matches_fold_of_active_commissions() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger
            .add_invoice(1, card_sale("1002", dec!(100), dec!(0), dec!(0)))
            .unwrap();
        ledger
            .update_invoice(1, "1002", card_sale("1002", dec!(150), dec!(5), dec!(0)))
            .unwrap();

        assert_eq!(
            ledger.active_commission_total(1).unwrap(),
            ledger.employee(1).unwrap().weekly_pay
        );
    }

    #[test]
    fn manual_weekly_pay_override_diverges_from_the_fold() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        ledger.set_weekly_pay(1, dec!(500)).unwrap();

        assert_eq!(ledger.employee(1).unwrap().weekly_pay, dec!(500));
        assert_eq!(ledger.active_commission_total(1).unwrap(), dec!(115));
    }

    #[test]
    fn update_employee_rejects_id_collisions() {
        let mut ledger = ledger_with_two_employees();

        let err = ledger.update_employee(1, 2, "Ana Reyes").unwrap_err();

        assert!(matches!(err, LedgerError::DuplicateEmployeeId(2)));
    }

    #[test]
    fn update_employee_carries_pay_and_invoices_to_the_new_identity() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();

        ledger.update_employee(1, 7, "Ana R. Vega").unwrap();

        assert!(ledger.employee(1).is_none());
        let ana = ledger.employee(7).unwrap();
        assert_eq!(ana.name, "Ana R. Vega");
        assert_eq!(ana.weekly_pay, dec!(115));
        assert_eq!(ledger.invoices(7).unwrap().len(), 1);
    }

    #[test]
    fn ytd_report_totals_and_last_paid() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger.close_out_week(1, date(2025, 6, 13)).unwrap();

        let report = ledger.ytd_report().unwrap();

        assert_eq!(report.total, dec!(115));
        assert_eq!(report.rows[0].last_paid, Some(date(2025, 6, 13)));
        assert_eq!(report.rows[1].last_paid, None);
    }

    #[test]
    fn weekly_report_totals_across_employees() {
        let mut ledger = ledger_with_two_employees();
        ledger
            .add_invoice(1, card_sale("1001", dec!(200), dec!(20), dec!(10)))
            .unwrap();
        ledger
            .add_invoice(2, card_sale("2001", dec!(100), dec!(0), dec!(0)))
            .unwrap();

        let report = ledger.weekly_report();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total, dec!(165));
    }

    #[test]
    fn operations_on_unknown_employee_fail() {
        let mut ledger = ledger_with_two_employees();

        let err = ledger.close_out_week(99, date(2025, 6, 13)).unwrap_err();

        assert!(matches!(err, LedgerError::EmployeeNotFound(99)));
    }
}
