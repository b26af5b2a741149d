use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee on the roster.
///
/// `weekly_pay` accumulates the commissions of invoices added or edited
/// since the last close-out; `year_to_date_pay` is the running total of
/// closed-out weeks. Both are floored at zero on construction and on
/// manual edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub weekly_pay: Decimal,
    pub year_to_date_pay: Decimal,
}

impl Employee {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        weekly_pay: Decimal,
        year_to_date_pay: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            weekly_pay: weekly_pay.max(Decimal::ZERO),
            year_to_date_pay: year_to_date_pay.max(Decimal::ZERO),
        }
    }

    /// Applies a commission (or an edit delta) to the weekly accumulator.
    ///
    /// Deltas are applied as-is and can drive the accumulator negative;
    /// only construction and manual edits clamp at zero.
    pub(crate) fn apply_commission_delta(&mut self, delta: Decimal) {
        self.weekly_pay += delta;
    }

    /// Manual weekly-pay override, floored at zero.
    pub(crate) fn set_weekly_pay(&mut self, amount: Decimal) {
        self.weekly_pay = amount.max(Decimal::ZERO);
    }

    /// Moves the weekly accumulator into year-to-date and resets it.
    /// Returns the amount paid out.
    pub(crate) fn close_out(&mut self) -> Decimal {
        let paid = self.weekly_pay;
        self.year_to_date_pay += paid;
        self.weekly_pay = Decimal::ZERO;
        paid
    }
}
