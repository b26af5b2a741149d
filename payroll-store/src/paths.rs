//! File naming for the flat-table layout.
//!
//! Per-employee files embed a filesystem-safe form of the employee's
//! name plus the id, so `Maria Lopez` (id 3) keeps her invoices in
//! `invoices/maria_lopez_3.csv`. Archive names additionally carry the
//! week-ending date with dashes in place of the date's slashes.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use payroll_core::Employee;
use regex::Regex;

pub const EMPLOYEES_FILE: &str = "employees.csv";
pub const INVOICES_DIR: &str = "invoices";
pub const ARCHIVE_DIR: &str = "archived_invoices";
pub const PAYMENTS_DIR: &str = "payment_history";

/// Date format used in table cells.
pub const DATE_FORMAT: &str = "%m/%d/%Y";
/// Date format used in archive filenames (slashes are not filename-safe).
pub const ARCHIVE_DATE_FORMAT: &str = "%m-%d-%Y";

/// Lower-cases, trims, and replaces spaces so a display name can be part
/// of a filename.
pub fn safe_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn file_stem(employee: &Employee) -> String {
    format!("{}_{}", safe_name(&employee.name), employee.id)
}

pub fn employees_file(data_dir: &Path) -> PathBuf {
    data_dir.join(EMPLOYEES_FILE)
}

pub fn invoice_file(data_dir: &Path, employee: &Employee) -> PathBuf {
    data_dir
        .join(INVOICES_DIR)
        .join(format!("{}.csv", file_stem(employee)))
}

pub fn archive_file(data_dir: &Path, employee: &Employee, week_ending: NaiveDate) -> PathBuf {
    data_dir.join(ARCHIVE_DIR).join(format!(
        "{}_week_{}.csv",
        file_stem(employee),
        week_ending.format(ARCHIVE_DATE_FORMAT)
    ))
}

pub fn payments_file(data_dir: &Path, employee: &Employee) -> PathBuf {
    data_dir
        .join(PAYMENTS_DIR)
        .join(format!("{}_payments.csv", file_stem(employee)))
}

/// Prefix an archive filename must carry to belong to this employee.
pub fn archive_prefix(employee: &Employee) -> String {
    format!("{}_week_", file_stem(employee))
}

/// Extracts the week-ending date from an archive filename, if it has one.
pub fn archive_week_ending(file_name: &str) -> Option<NaiveDate> {
    static WEEK_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let re = WEEK_SUFFIX
        .get_or_init(|| Regex::new(r"_week_(\d{2}-\d{2}-\d{4})\.csv$").expect("valid regex"));
    let captures = re.captures(file_name)?;
    NaiveDate::parse_from_str(&captures[1], ARCHIVE_DATE_FORMAT).ok()
}
