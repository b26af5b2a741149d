//! Serde-compatible rows that mirror the table layouts exactly.
//!
//! Header names are load-bearing: they are matched by name on read and
//! emitted verbatim on write. Currency cells are rescaled to two decimal
//! digits before they reach a writer, so `115` is stored as `115.00`.
//! Dates are stored as `MM/DD/YYYY`.

use chrono::NaiveDate;
use payroll_core::calculations::round_half_up;
use payroll_core::{Employee, Invoice, InvoiceStatus, PaymentRecord, RepositoryError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const EMPLOYEE_HEADERS: [&str; 4] = ["ID", "Name", "Weekly_Pay($)", "Year_To_Date_Pay($)"];
pub const INVOICE_HEADERS: [&str; 9] = [
    "Invoice#",
    "Customer",
    "Date",
    "Status",
    "Total",
    "Tip",
    "Materials",
    "Fees",
    "Commission",
];
pub const PAYMENT_HEADERS: [&str; 2] = ["Date", "Amount"];

/// Rounds and rescales so the cell renders with exactly two decimals.
fn money_cell(value: Decimal) -> Decimal {
    let mut cell = round_half_up(value);
    cell.rescale(2);
    cell
}

mod mdy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::paths::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    #[serde(rename = "ID")]
    pub id: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Weekly_Pay($)")]
    pub weekly_pay: Decimal,
    #[serde(rename = "Year_To_Date_Pay($)")]
    pub year_to_date_pay: Decimal,
}

impl EmployeeRow {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            weekly_pay: money_cell(employee.weekly_pay),
            year_to_date_pay: money_cell(employee.year_to_date_pay),
        }
    }

    pub fn into_employee(self) -> Employee {
        Employee::new(self.id, self.name, self.weekly_pay, self.year_to_date_pay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    #[serde(rename = "Invoice#")]
    pub number: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Date", with = "mdy_date")]
    pub date: NaiveDate,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Total")]
    pub total: Decimal,
    #[serde(rename = "Tip")]
    pub tip: Decimal,
    #[serde(rename = "Materials")]
    pub materials: Decimal,
    #[serde(rename = "Fees")]
    pub fees: Decimal,
    #[serde(rename = "Commission")]
    pub commission: Decimal,
}

impl InvoiceRow {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            number: invoice.number.clone(),
            customer: invoice.customer.clone(),
            date: invoice.date,
            status: invoice.status.as_str().to_string(),
            total: money_cell(invoice.total),
            tip: money_cell(invoice.tip),
            materials: money_cell(invoice.materials),
            fees: money_cell(invoice.fees),
            commission: money_cell(invoice.commission),
        }
    }

    /// The table has no credit-card column; the flag only feeds the
    /// commission formula at creation/edit time, so loaded rows read as
    /// `false`.
    pub fn into_invoice(self) -> Result<Invoice, RepositoryError> {
        let status = InvoiceStatus::parse(self.status.trim()).ok_or_else(|| {
            RepositoryError::Malformed(format!("unknown invoice status '{}'", self.status))
        })?;
        Ok(Invoice {
            number: self.number,
            customer: self.customer,
            date: self.date,
            status,
            credit_card_used: false,
            total: self.total,
            tip: self.tip,
            materials: self.materials,
            fees: self.fees,
            commission: self.commission,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    #[serde(rename = "Date", with = "mdy_date")]
    pub date: NaiveDate,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
}

impl PaymentRow {
    pub fn from_payment(payment: &PaymentRecord) -> Self {
        Self {
            date: payment.date,
            amount: money_cell(payment.amount),
        }
    }

    pub fn into_payment(self) -> PaymentRecord {
        PaymentRecord {
            date: self.date,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn invoice() -> Invoice {
        Invoice {
            number: "1042".into(),
            customer: "Hargrove".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
            status: InvoiceStatus::Paid,
            credit_card_used: true,
            total: dec!(200),
            tip: dec!(20),
            materials: dec!(0),
            fees: dec!(10),
            commission: dec!(115),
        }
    }

    #[test]
    fn money_cells_always_carry_two_decimals() {
        let row = InvoiceRow::from_invoice(&invoice());

        assert_eq!(row.total.to_string(), "200.00");
        assert_eq!(row.commission.to_string(), "115.00");
    }

    #[test]
    fn invoice_row_serializes_date_as_month_day_year() {
        let row = InvoiceRow::from_invoice(&invoice());
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&row).unwrap();
        let written = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        assert_eq!(
            written,
            "Invoice#,Customer,Date,Status,Total,Tip,Materials,Fees,Commission\n\
             1042,Hargrove,06/09/2025,Paid,200.00,20.00,0.00,10.00,115.00\n"
        );
    }

    #[test]
    fn invoice_row_round_trips_without_the_card_flag() {
        let row = InvoiceRow::from_invoice(&invoice());

        let loaded = row.into_invoice().unwrap();

        assert!(!loaded.credit_card_used); // not a column
        assert_eq!(loaded.number, "1042");
        assert_eq!(loaded.status, InvoiceStatus::Paid);
        assert_eq!(loaded.commission, dec!(115.00));
    }

    #[test]
    fn unknown_status_is_malformed() {
        let mut row = InvoiceRow::from_invoice(&invoice());
        row.status = "Pending".into();

        let err = row.into_invoice().unwrap_err();

        assert!(matches!(err, RepositoryError::Malformed(_)));
    }

    #[test]
    fn employee_row_round_trips_and_clamps() {
        let employee = Employee::new(3, "Maria Lopez", dec!(115.5), dec!(2000));
        let row = EmployeeRow::from_employee(&employee);

        assert_eq!(row.weekly_pay.to_string(), "115.50");
        assert_eq!(row.year_to_date_pay.to_string(), "2000.00");
        assert_eq!(row.into_employee(), Employee::new(3, "Maria Lopez", dec!(115.50), dec!(2000.00)));
    }

    #[test]
    fn employee_header_names_match_the_table() {
        let employee = Employee::new(3, "Maria Lopez", dec!(0), dec!(0));
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(EmployeeRow::from_employee(&employee)).unwrap();
        let written = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        assert_eq!(
            written,
            "ID,Name,Weekly_Pay($),Year_To_Date_Pay($)\n3,Maria Lopez,0.00,0.00\n"
        );
    }

    #[test]
    fn payment_row_parses_month_day_year() {
        let csv = "Date,Amount\n06/13/2025,165.00\n";
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let row: PaymentRow = rdr.deserialize().next().unwrap().unwrap();

        assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
        assert_eq!(row.amount, dec!(165.00));
    }

    #[test]
    fn malformed_date_fails_deserialization() {
        let csv = "Date,Amount\n2025-06-13,165.00\n";
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let result: Result<PaymentRow, _> = rdr.deserialize().next().unwrap();

        assert!(result.is_err());
    }
}
