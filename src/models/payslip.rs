//! Payslip line model.
//!
//! A [`PayslipLine`] holds one employee's figures for one run. Its
//! [`ProfileSnapshot`] freezes the compensation basis at generation time;
//! edits recompute pay from the snapshot and never re-read the live profile.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::{
    DeductionType, checked_money_sum, deserialize_lenient_amount, out_of_range, round_money,
};

/// The compensation basis captured when a line is generated.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{DeductionType, ProfileSnapshot};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let snapshot = ProfileSnapshot {
///     daily_rate: Decimal::from(500),
///     allowances_total: Decimal::from(200),
///     deduction_details: BTreeMap::from([
///         (DeductionType::Sss, Decimal::from(250)),
///         (DeductionType::OtherDeductions, Decimal::from(50)),
///     ]),
/// };
/// assert_eq!(snapshot.total_deductions().unwrap(), Decimal::from(300));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Daily rate in effect when the line was generated.
    pub daily_rate: Decimal,
    /// Total allowances for the period.
    #[serde(rename = "allowances", default)]
    pub allowances_total: Decimal,
    /// Withheld amount per selected deduction type. Unselected types are absent.
    #[serde(default)]
    pub deduction_details: BTreeMap<DeductionType, Decimal>,
}

impl ProfileSnapshot {
    /// Sum of the itemized deductions.
    pub fn total_deductions(&self) -> EngineResult<Decimal> {
        checked_money_sum("total_deductions", self.deduction_details.values().copied())
            .map(round_money)
    }
}

/// One employee's payslip within a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// The employee this line pays.
    pub employee_id: String,
    /// Employee name at generation time.
    #[serde(default)]
    pub employee_name: String,
    /// Employee position at generation time.
    #[serde(default)]
    pub position: String,
    /// Employee branch at generation time.
    #[serde(default)]
    pub branch: String,
    /// Days present in the period. Missing or non-numeric input reads as zero.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub days_present: Decimal,
    /// Manually entered holiday or double pay. Non-numeric input reads as zero.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub double_pay_amount: Decimal,
    /// The compensation basis this line is computed from.
    #[serde(flatten)]
    pub profile_snapshot: ProfileSnapshot,
    /// `days_present x daily_rate`.
    pub gross_pay: Decimal,
    /// Sum of `deduction_details`.
    pub total_deductions: Decimal,
    /// `gross_pay + double_pay_amount + allowances - total_deductions`. May be negative.
    pub net_pay: Decimal,
}

impl PayslipLine {
    /// Returns the attendance-driven gross pay for this line's inputs.
    pub fn expected_gross_pay(&self) -> EngineResult<Decimal> {
        self.days_present
            .checked_mul(self.profile_snapshot.daily_rate)
            .map(round_money)
            .ok_or_else(|| out_of_range("gross_pay"))
    }

    /// Re-derives `gross_pay`, `total_deductions` and `net_pay` from the
    /// stored inputs and snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAmount`](crate::error::EngineError::InvalidAmount)
    /// naming the first figure that leaves the decimal range. The line is
    /// left unchanged in that case.
    pub fn recompute(&mut self) -> EngineResult<()> {
        let gross_pay = self.expected_gross_pay()?;
        let total_deductions = self.profile_snapshot.total_deductions()?;
        let net_pay = gross_pay
            .checked_add(self.double_pay_amount)
            .and_then(|pay| pay.checked_add(self.profile_snapshot.allowances_total))
            .and_then(|pay| pay.checked_sub(total_deductions))
            .map(round_money)
            .ok_or_else(|| out_of_range("net_pay"))?;

        self.gross_pay = gross_pay;
        self.total_deductions = total_deductions;
        self.net_pay = net_pay;
        Ok(())
    }

    /// Returns true if the stored derived figures equal a fresh recomputation.
    /// A line that cannot be recomputed is never consistent.
    pub fn is_consistent(&self) -> bool {
        let mut fresh = self.clone();
        fresh.recompute().is_ok() && fresh == *self
    }
}
