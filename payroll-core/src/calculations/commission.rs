//! Sales-commission calculation for a single invoice.
//!
//! The payout owed to an employee for one invoice is derived from the
//! invoice's financial fields by a three-branch rule set:
//!
//! | Condition                          | Commission |
//! |------------------------------------|------------|
//! | credit card used                   | `(total - materials - fees) / 2 + tip` |
//! | no card, materials below $35.00    | `(total - fees) / 2 + tip` |
//! | no card, materials at/above $35.00 | `(total - materials - fees) / 2 + tip + materials` |
//!
//! The branches are evaluated in that order and do not overlap. The two
//! no-card branches are distinct formulas, not one formula at different
//! materials values: below the threshold materials are left out of the
//! base entirely, at or above it they are subtracted from the base and
//! then reimbursed on top. Do not merge them algebraically; the asymmetry
//! is the business rule.
//!
//! The commission is computed once when an invoice is created or edited
//! and persisted with it. No rounding is applied here; two-decimal
//! rendering happens at storage and presentation time
//! (see [`crate::calculations::common::format_currency`]).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::commission;
//!
//! // Card sale: (200 - 0 - 10) / 2 + 20 = 115
//! assert_eq!(
//!     commission(true, dec!(200), dec!(20), dec!(0), dec!(10)),
//!     dec!(115),
//! );
//!
//! // No card, $20 of materials stays under the threshold and is ignored:
//! // (200 - 10) / 2 + 20 = 115
//! assert_eq!(
//!     commission(false, dec!(200), dec!(20), dec!(20), dec!(10)),
//!     dec!(115),
//! );
//!
//! // No card, $50 of materials is subtracted and reimbursed:
//! // (200 - 50 - 10) / 2 + 20 + 50 = 140
//! assert_eq!(
//!     commission(false, dec!(200), dec!(20), dec!(50), dec!(10)),
//!     dec!(140),
//! );
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Materials at or above this amount switch the no-card formula from
/// "ignore materials" to "subtract and reimburse". The comparison is a
/// strict `<` on the exclusion side.
pub const MATERIALS_THRESHOLD: Decimal = Decimal::from_parts(3500, 0, 0, false, 2); // 35.00

/// Computes the commission for one invoice.
///
/// Negative inputs are not rejected here; the weekly and year-to-date
/// accumulators are floored at zero elsewhere. A negative result is
/// logged, since it usually means the fields were entered in the wrong
/// boxes.
pub fn commission(
    credit_card_used: bool,
    total: Decimal,
    tip: Decimal,
    materials: Decimal,
    fees: Decimal,
) -> Decimal {
    let amount = if credit_card_used {
        (total - materials - fees) / Decimal::TWO + tip
    } else if materials < MATERIALS_THRESHOLD {
        // Low materials: excluded from the base entirely.
        (total - fees) / Decimal::TWO + tip
    } else {
        // High materials: subtracted from the base, then reimbursed on top.
        (total - materials - fees) / Decimal::TWO + tip + materials
    };

    if amount < Decimal::ZERO {
        warn!(
            %total, %tip, %materials, %fees, credit_card_used,
            commission = %amount,
            "computed commission is negative"
        );
    }

    amount
}

/// The financial fields an invoice carries into the commission formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionInputs {
    pub credit_card_used: bool,
    pub total: Decimal,
    pub tip: Decimal,
    pub materials: Decimal,
    pub fees: Decimal,
}

impl CommissionInputs {
    /// All-zero inputs, as stored for manually-overridden commissions.
    pub const ZERO: Self = Self {
        credit_card_used: false,
        total: Decimal::ZERO,
        tip: Decimal::ZERO,
        materials: Decimal::ZERO,
        fees: Decimal::ZERO,
    };

    pub fn commission(&self) -> Decimal {
        commission(
            self.credit_card_used,
            self.total,
            self.tip,
            self.materials,
            self.fees,
        )
    }
}

/// Where an invoice's commission comes from.
///
/// `Calculated` runs the formula over the invoice's financial fields.
/// `Manual` bypasses the formula and takes the amount as given; the four
/// formula inputs are stored as zero in that mode.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::{CommissionInputs, CommissionSource};
///
/// let manual = CommissionSource::Manual(dec!(75.00));
/// assert_eq!(manual.amount(), dec!(75.00));
/// assert_eq!(manual.stored_inputs(), CommissionInputs::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionSource {
    Calculated(CommissionInputs),
    Manual(Decimal),
}

impl CommissionSource {
    /// The commission amount this source resolves to.
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Calculated(inputs) => inputs.commission(),
            Self::Manual(amount) => *amount,
        }
    }

    /// The financial fields to persist alongside the commission.
    pub fn stored_inputs(&self) -> CommissionInputs {
        match self {
            Self::Calculated(inputs) => *inputs,
            Self::Manual(_) => CommissionInputs::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn card_sale_halves_net_of_materials_and_fees_plus_tip() {
        let result = commission(true, dec!(200), dec!(20), dec!(0), dec!(10));

        assert_eq!(result, dec!(115));
    }

    #[test]
    fn card_sale_subtracts_materials_even_below_threshold() {
        // With a card, materials are always subtracted and never reimbursed.
        let result = commission(true, dec!(200), dec!(20), dec!(20), dec!(10));

        assert_eq!(result, dec!(105));
    }

    #[test]
    fn no_card_low_materials_are_ignored() {
        let result = commission(false, dec!(200), dec!(20), dec!(20), dec!(10));

        assert_eq!(result, dec!(115));
    }

    #[test]
    fn no_card_high_materials_are_subtracted_and_reimbursed() {
        let result = commission(false, dec!(200), dec!(20), dec!(50), dec!(10));

        assert_eq!(result, dec!(140));
    }

    #[test]
    fn threshold_is_exclusive_just_below() {
        // 34.99 stays on the "ignore materials" side.
        let result = commission(false, dec!(200), dec!(20), dec!(34.99), dec!(10));

        assert_eq!(result, dec!(115));
    }

    #[test]
    fn threshold_is_inclusive_at_exactly_35() {
        // 35.00 lands on the "subtract and reimburse" side:
        // (200 - 35 - 10) / 2 + 20 + 35 = 132.50
        let result = commission(false, dec!(200), dec!(20), dec!(35.00), dec!(10));

        assert_eq!(result, dec!(132.50));
    }

    #[test]
    fn division_keeps_full_precision() {
        // (101 - 0 - 0) / 2 + 0 = 50.5, no rounding inside the formula.
        let result = commission(false, dec!(101), dec!(0), dec!(0), dec!(0));

        assert_eq!(result, dec!(50.5));
    }

    #[test]
    fn negative_inputs_flow_through() {
        // The formula does not reject negatives; clamping is the
        // accumulators' job.
        let result = commission(true, dec!(-100), dec!(0), dec!(0), dec!(0));

        assert_eq!(result, dec!(-50));
    }

    #[test]
    fn inputs_struct_matches_free_function() {
        let inputs = CommissionInputs {
            credit_card_used: false,
            total: dec!(200),
            tip: dec!(20),
            materials: dec!(50),
            fees: dec!(10),
        };

        assert_eq!(inputs.commission(), dec!(140));
    }

    #[test]
    fn manual_source_takes_amount_verbatim() {
        let source = CommissionSource::Manual(dec!(99.99));

        assert_eq!(source.amount(), dec!(99.99));
    }

    #[test]
    fn manual_source_stores_zeroed_inputs() {
        let stored = CommissionSource::Manual(dec!(99.99)).stored_inputs();

        assert_eq!(stored, CommissionInputs::ZERO);
        assert!(!stored.credit_card_used);
    }

    #[test]
    fn calculated_source_stores_its_inputs() {
        let inputs = CommissionInputs {
            credit_card_used: true,
            total: dec!(200),
            tip: dec!(20),
            materials: dec!(0),
            fees: dec!(10),
        };
        let source = CommissionSource::Calculated(inputs);

        assert_eq!(source.amount(), dec!(115));
        assert_eq!(source.stored_inputs(), inputs);
    }
}
