//! Payslip calculation.
//!
//! Pure mapping from a compensation profile, attendance inputs and a
//! deduction selection to a [`PayslipLine`]. No clock, no state.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    CompensationProfile, DeductionSelection, DeductionType, Employee, PayslipLine,
    ProfileSnapshot, round_money,
};

/// Captures the compensation basis for a line.
///
/// Only selected deduction types appear in `deduction_details`. A missing
/// profile, or one without a daily rate, yields an all-zero snapshot.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::snapshot_profile;
/// use payroll_engine::models::{CompensationProfile, DeductionSelection, DeductionType};
/// use rust_decimal::Decimal;
///
/// let mut profile = CompensationProfile::default();
/// profile.daily_rate = Decimal::from(500);
/// profile.deductions.sss_contribution = Decimal::from(250);
/// profile.deductions.philhealth_contribution = Decimal::from(125);
///
/// let snapshot =
///     snapshot_profile(Some(&profile), &DeductionSelection::from([DeductionType::Sss])).unwrap();
/// assert_eq!(snapshot.deduction_details.len(), 1);
/// assert_eq!(snapshot.deduction_details[&DeductionType::Sss], Decimal::from(250));
/// ```
pub fn snapshot_profile(
    profile: Option<&CompensationProfile>,
    selection: &DeductionSelection,
) -> EngineResult<ProfileSnapshot> {
    let Some(profile) = profile.filter(|p| p.is_payable()) else {
        return Ok(ProfileSnapshot::default());
    };

    let deduction_details = DeductionType::ALL
        .into_iter()
        .filter(|kind| selection.contains(*kind))
        .map(|kind| Ok((kind, round_money(profile.deductions.amount_for(kind)?))))
        .collect::<EngineResult<BTreeMap<DeductionType, Decimal>>>()?;

    Ok(ProfileSnapshot {
        daily_rate: profile.daily_rate,
        allowances_total: round_money(profile.allowances.total()),
        deduction_details,
    })
}

/// Calculates one employee's payslip.
///
/// `gross_pay = days_present x daily_rate`, and
/// `net_pay = gross_pay + double_pay_amount + allowances - total_deductions`.
/// Net pay is not clamped and may be negative. Negative attendance inputs
/// are treated as zero; callers are expected to reject them earlier.
///
/// # Errors
///
/// Returns [`InvalidAmount`](crate::error::EngineError::InvalidAmount) only
/// when a figure exceeds the range of a decimal.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_payslip;
/// use payroll_engine::models::{
///     CompensationProfile, DeductionSelection, DeductionType, Employee, OtherDeduction,
/// };
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Santos".to_string(),
///     position: "Cashier".to_string(),
///     branch: "Makati".to_string(),
/// };
/// let mut profile = CompensationProfile::default();
/// profile.daily_rate = Decimal::from(500);
/// profile.allowances.special = Decimal::from(200);
/// profile.deductions.sss_contribution = Decimal::from(250);
/// profile.deductions.other_deductions = vec![OtherDeduction {
///     name: "Uniform".to_string(),
///     amount: Decimal::from(50),
/// }];
/// let selection = DeductionSelection::from([DeductionType::Sss, DeductionType::OtherDeductions]);
///
/// let line = calculate_payslip(&employee, Some(&profile), Decimal::from(15), Decimal::ZERO, &selection)
///     .unwrap();
/// assert_eq!(line.gross_pay, Decimal::from(7500));
/// assert_eq!(line.total_deductions, Decimal::from(300));
/// assert_eq!(line.net_pay, Decimal::from(7400));
/// ```
pub fn calculate_payslip(
    employee: &Employee,
    profile: Option<&CompensationProfile>,
    days_present: Decimal,
    double_pay_amount: Decimal,
    selection: &DeductionSelection,
) -> EngineResult<PayslipLine> {
    let mut line = PayslipLine {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        position: employee.position.clone(),
        branch: employee.branch.clone(),
        days_present: days_present.max(Decimal::ZERO),
        double_pay_amount: double_pay_amount.max(Decimal::ZERO),
        profile_snapshot: snapshot_profile(profile, selection)?,
        gross_pay: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        net_pay: Decimal::ZERO,
    };
    line.recompute()?;

    debug!(
        employee_id = %line.employee_id,
        days_present = %line.days_present,
        gross_pay = %line.gross_pay,
        total_deductions = %line.total_deductions,
        net_pay = %line.net_pay,
        "Payslip calculated"
    );

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allowances, Deductions, LoanDeduction, OtherDeduction};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Maria Santos".to_string(),
            position: "Cashier".to_string(),
            branch: "Makati".to_string(),
        }
    }

    fn create_test_profile() -> CompensationProfile {
        CompensationProfile {
            daily_rate: dec("500"),
            allowances: Allowances {
                special: dec("200"),
            },
            deductions: Deductions {
                sss_contribution: dec("250"),
                philhealth_contribution: dec("150"),
                company_loan: LoanDeduction {
                    amortization: dec("1000"),
                    balance: dec("20000"),
                },
                other_deductions: vec![OtherDeduction {
                    name: "Uniform".to_string(),
                    amount: dec("50"),
                }],
                ..Deductions::default()
            },
        }
    }

    fn sss_and_other() -> DeductionSelection {
        DeductionSelection::from([DeductionType::Sss, DeductionType::OtherDeductions])
    }

    #[test]
    fn test_reference_scenario() {
        let line = calculate_payslip(
            &create_test_employee(),
            Some(&create_test_profile()),
            dec("15"),
            Decimal::ZERO,
            &sss_and_other(),
        )
        .unwrap();

        assert_eq!(line.gross_pay, dec("7500"));
        assert_eq!(line.profile_snapshot.allowances_total, dec("200"));
        assert_eq!(line.total_deductions, dec("300"));
        assert_eq!(line.net_pay, dec("7400"));
        assert_eq!(line.employee_name, "Maria Santos");
        assert_eq!(line.branch, "Makati");
    }

    #[test]
    fn test_unselected_sss_is_absent_and_not_deducted() {
        let selection = DeductionSelection::from([DeductionType::OtherDeductions]);
        let line = calculate_payslip(
            &create_test_employee(),
            Some(&create_test_profile()),
            dec("15"),
            Decimal::ZERO,
            &selection,
        )
        .unwrap();

        assert!(
            !line
                .profile_snapshot
                .deduction_details
                .contains_key(&DeductionType::Sss)
        );
        assert_eq!(line.total_deductions, dec("50"));
        assert_eq!(line.net_pay, dec("7650"));
    }

    #[test]
    fn test_selected_zero_amount_is_kept_in_breakdown() {
        let selection = DeductionSelection::from([DeductionType::CashAdvance]);
        let line = calculate_payslip(
            &create_test_employee(),
            Some(&create_test_profile()),
            dec("15"),
            Decimal::ZERO,
            &selection,
        )
        .unwrap();

        assert_eq!(
            line.profile_snapshot.deduction_details.get(&DeductionType::CashAdvance),
            Some(&Decimal::ZERO)
        );
    }

    #[test]
    fn test_missing_profile_yields_zero_line() {
        let line = calculate_payslip(
            &create_test_employee(),
            None,
            dec("15"),
            Decimal::ZERO,
            &sss_and_other(),
        )
        .unwrap();

        assert_eq!(line.profile_snapshot.daily_rate, Decimal::ZERO);
        assert_eq!(line.gross_pay, Decimal::ZERO);
        assert_eq!(line.profile_snapshot.allowances_total, Decimal::ZERO);
        assert!(line.profile_snapshot.deduction_details.is_empty());
        assert_eq!(line.total_deductions, Decimal::ZERO);
        assert_eq!(line.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_zero_daily_rate_ignores_allowances_and_deductions() {
        let mut profile = create_test_profile();
        profile.daily_rate = Decimal::ZERO;

        let line = calculate_payslip(
            &create_test_employee(),
            Some(&profile),
            dec("15"),
            Decimal::ZERO,
            &sss_and_other(),
        )
        .unwrap();

        assert_eq!(line.net_pay, Decimal::ZERO);
        assert!(line.profile_snapshot.deduction_details.is_empty());
    }

    #[test]
    fn test_double_pay_adds_to_net() {
        let line = calculate_payslip(
            &create_test_employee(),
            Some(&create_test_profile()),
            dec("15"),
            dec("1000"),
            &sss_and_other(),
        )
        .unwrap();

        assert_eq!(line.gross_pay, dec("7500"));
        assert_eq!(line.net_pay, dec("8400"));
    }

    #[test]
    fn test_large_loan_produces_negative_net() {
        let selection = DeductionSelection::from([DeductionType::CompanyLoan]);
        let line = calculate_payslip(
            &create_test_employee(),
            Some(&create_test_profile()),
            dec("1"),
            Decimal::ZERO,
            &selection,
        )
        .unwrap();

        assert_eq!(line.gross_pay, dec("500"));
        assert_eq!(line.net_pay, dec("-300"));
    }

    #[test]
    fn test_fractional_days_round_to_cents() {
        let mut profile = create_test_profile();
        profile.daily_rate = dec("537.33");

        let line = calculate_payslip(
            &create_test_employee(),
            Some(&profile),
            dec("12.5"),
            Decimal::ZERO,
            &DeductionSelection::empty(),
        )
        .unwrap();

        // 12.5 x 537.33 = 6716.625
        assert_eq!(line.gross_pay, dec("6716.63"));
        assert_eq!(line.net_pay, dec("6916.63"));
    }

    #[test]
    fn test_negative_inputs_are_treated_as_zero() {
        let line = calculate_payslip(
            &create_test_employee(),
            Some(&create_test_profile()),
            dec("-3"),
            dec("-100"),
            &DeductionSelection::empty(),
        )
        .unwrap();

        assert_eq!(line.days_present, Decimal::ZERO);
        assert_eq!(line.double_pay_amount, Decimal::ZERO);
        assert_eq!(line.gross_pay, Decimal::ZERO);
        assert_eq!(line.net_pay, dec("200"));
    }

    #[test]
    fn test_overflowing_profile_is_an_error() {
        let mut profile = create_test_profile();
        profile.daily_rate = Decimal::MAX;

        let result = calculate_payslip(
            &create_test_employee(),
            Some(&profile),
            dec("15"),
            Decimal::ZERO,
            &DeductionSelection::empty(),
        );
        assert!(matches!(
            result,
            Err(crate::error::EngineError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let profile = create_test_profile();
        let first = calculate_payslip(
            &create_test_employee(),
            Some(&profile),
            dec("13"),
            dec("250"),
            &sss_and_other(),
        )
        .unwrap();
        let second = calculate_payslip(
            &create_test_employee(),
            Some(&profile),
            dec("13"),
            dec("250"),
            &sss_and_other(),
        )
        .unwrap();
        assert_eq!(first, second);
    }
}
