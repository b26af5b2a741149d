use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::CommissionSource;

/// Payment state of an invoice, settable independently of the commission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Paid" => Some(Self::Paid),
            "Unpaid" => Some(Self::Unpaid),
            _ => None,
        }
    }
}

/// An invoice in an employee's active set (or a frozen archive row).
///
/// The commission is computed once, when the invoice is created or
/// edited, and carried with the record from then on. Credit-card use
/// feeds the formula at that moment; the flat table does not persist it,
/// so loaded invoices read as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Not necessarily numeric; unique within one employee's active set.
    pub number: String,
    pub customer: String,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    pub credit_card_used: bool,
    pub total: Decimal,
    pub tip: Decimal,
    pub materials: Decimal,
    pub fees: Decimal,
    pub commission: Decimal,
}

/// Input for creating or replacing an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub number: String,
    pub customer: String,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    pub source: CommissionSource,
}

impl NewInvoice {
    /// Resolves the commission and assembles the stored record.
    pub fn build(self) -> Invoice {
        let commission = self.source.amount();
        let inputs = self.source.stored_inputs();
        Invoice {
            number: self.number.trim().to_string(),
            customer: self.customer.trim().to_string(),
            date: self.date,
            status: self.status,
            credit_card_used: inputs.credit_card_used,
            total: inputs.total,
            tip: inputs.tip,
            materials: inputs.materials,
            fees: inputs.fees,
            commission,
        }
    }
}
