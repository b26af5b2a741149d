pub mod commission;
pub mod common;

pub use commission::{CommissionInputs, CommissionSource, MATERIALS_THRESHOLD, commission};
pub use common::{format_currency, round_half_up};
