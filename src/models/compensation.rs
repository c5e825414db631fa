//! Compensation profile model.
//!
//! A [`CompensationProfile`] is the per-employee salary record owned by the
//! employee directory. The engine only reads it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::{DeductionType, checked_money_sum};

/// Fixed per-period stipends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allowances {
    /// The special allowance paid every period.
    pub special: Decimal,
}

impl Allowances {
    /// Total of all allowance types.
    pub fn total(&self) -> Decimal {
        self.special
    }
}

/// A loan deduction: the per-period installment and the outstanding balance.
///
/// Only `amortization` is ever withheld from pay; `balance` is informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanDeduction {
    /// The amount deducted each period.
    pub amortization: Decimal,
    /// The remaining loan balance.
    pub balance: Decimal,
}

/// A named ad-hoc deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeduction {
    /// Label shown on the payslip (e.g., "Uniform").
    pub name: String,
    /// The amount deducted.
    pub amount: Decimal,
}

/// Every deduction amount carried on a compensation profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    /// SSS contribution.
    pub sss_contribution: Decimal,
    /// PhilHealth contribution.
    pub philhealth_contribution: Decimal,
    /// Pag-IBIG contribution.
    pub pagibig_contribution: Decimal,
    /// Company cash fund.
    pub company_cash_fund: Decimal,
    /// Cash advance.
    pub cash_advance: Decimal,
    /// Company loan.
    pub company_loan: LoanDeduction,
    /// SSS loan.
    pub sss_loan: LoanDeduction,
    /// Pag-IBIG loan.
    pub pagibig_loan: LoanDeduction,
    /// Itemized other deductions, in entry order.
    pub other_deductions: Vec<OtherDeduction>,
}

impl Deductions {
    /// Returns the per-period amount this profile carries for a deduction type.
    ///
    /// Loans contribute their amortization; `other_deductions` contributes
    /// the sum of its items.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAmount`](crate::error::EngineError::InvalidAmount)
    /// if the `other_deductions` items overflow when summed.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{DeductionType, Deductions, LoanDeduction};
    /// use rust_decimal::Decimal;
    ///
    /// let deductions = Deductions {
    ///     sss_loan: LoanDeduction {
    ///         amortization: Decimal::from(500),
    ///         balance: Decimal::from(12000),
    ///     },
    ///     ..Deductions::default()
    /// };
    /// assert_eq!(deductions.amount_for(DeductionType::SssLoan).unwrap(), Decimal::from(500));
    /// ```
    pub fn amount_for(&self, kind: DeductionType) -> EngineResult<Decimal> {
        let amount = match kind {
            DeductionType::Sss => self.sss_contribution,
            DeductionType::SssLoan => self.sss_loan.amortization,
            DeductionType::Philhealth => self.philhealth_contribution,
            DeductionType::Pagibig => self.pagibig_contribution,
            DeductionType::PagibigLoan => self.pagibig_loan.amortization,
            DeductionType::CompanyLoan => self.company_loan.amortization,
            DeductionType::CompanyCashFund => self.company_cash_fund,
            DeductionType::CashAdvance => self.cash_advance,
            DeductionType::OtherDeductions => checked_money_sum(
                "other_deductions",
                self.other_deductions.iter().map(|item| item.amount),
            )?,
        };
        Ok(amount)
    }
}

/// The salary record the calculator reads for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationProfile {
    /// Pay for one day present.
    #[serde(default)]
    pub daily_rate: Decimal,
    /// Fixed per-period allowances.
    #[serde(default)]
    pub allowances: Allowances,
    /// Deduction amounts.
    #[serde(default)]
    pub deductions: Deductions,
}

impl CompensationProfile {
    /// Returns false when the profile has no daily rate, in which case the
    /// employee receives an all-zero payslip.
    pub fn is_payable(&self) -> bool {
        !self.daily_rate.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn full_profile() -> CompensationProfile {
        CompensationProfile {
            daily_rate: dec("610"),
            allowances: Allowances {
                special: dec("300"),
            },
            deductions: Deductions {
                sss_contribution: dec("450"),
                philhealth_contribution: dec("250"),
                pagibig_contribution: dec("100"),
                company_cash_fund: dec("50"),
                cash_advance: dec("1000"),
                company_loan: LoanDeduction {
                    amortization: dec("750"),
                    balance: dec("9000"),
                },
                sss_loan: LoanDeduction {
                    amortization: dec("400"),
                    balance: dec("4800"),
                },
                pagibig_loan: LoanDeduction {
                    amortization: dec("350"),
                    balance: dec("7000"),
                },
                other_deductions: vec![
                    OtherDeduction {
                        name: "Uniform".to_string(),
                        amount: dec("120"),
                    },
                    OtherDeduction {
                        name: "Canteen".to_string(),
                        amount: dec("80.50"),
                    },
                ],
            },
        }
    }

    #[test]
    fn test_amount_for_each_catalog_type() {
        let deductions = full_profile().deductions;
        assert_eq!(deductions.amount_for(DeductionType::Sss).unwrap(), dec("450"));
        assert_eq!(deductions.amount_for(DeductionType::SssLoan).unwrap(), dec("400"));
        assert_eq!(deductions.amount_for(DeductionType::Philhealth).unwrap(), dec("250"));
        assert_eq!(deductions.amount_for(DeductionType::Pagibig).unwrap(), dec("100"));
        assert_eq!(deductions.amount_for(DeductionType::PagibigLoan).unwrap(), dec("350"));
        assert_eq!(deductions.amount_for(DeductionType::CompanyLoan).unwrap(), dec("750"));
        assert_eq!(
            deductions.amount_for(DeductionType::CompanyCashFund).unwrap(),
            dec("50")
        );
        assert_eq!(deductions.amount_for(DeductionType::CashAdvance).unwrap(), dec("1000"));
        assert_eq!(
            deductions.amount_for(DeductionType::OtherDeductions).unwrap(),
            dec("200.50")
        );
    }

    #[test]
    fn test_loan_balance_never_used_as_amount() {
        let deductions = Deductions {
            company_loan: LoanDeduction {
                amortization: Decimal::ZERO,
                balance: dec("25000"),
            },
            ..Deductions::default()
        };
        assert_eq!(deductions.amount_for(DeductionType::CompanyLoan).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_other_deductions_overflow_is_an_error() {
        let deductions = Deductions {
            other_deductions: vec![
                OtherDeduction {
                    name: "Salary loan".to_string(),
                    amount: Decimal::MAX,
                },
                OtherDeduction {
                    name: "Canteen".to_string(),
                    amount: Decimal::MAX,
                },
            ],
            ..Deductions::default()
        };

        match deductions.amount_for(DeductionType::OtherDeductions) {
            Err(crate::error::EngineError::InvalidAmount { field, .. }) => {
                assert_eq!(field, "other_deductions")
            }
            other => panic!("Expected InvalidAmount error, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_profile_deserializes_with_zero_defaults() {
        let json = r#"{
            "daily_rate": 500,
            "deductions": { "sss_contribution": 250 }
        }"#;

        let profile: CompensationProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.daily_rate, dec("500"));
        assert_eq!(profile.allowances.total(), Decimal::ZERO);
        assert_eq!(profile.deductions.sss_contribution, dec("250"));
        assert_eq!(profile.deductions.sss_loan, LoanDeduction::default());
        assert!(profile.deductions.other_deductions.is_empty());
    }

    #[test]
    fn test_is_payable_requires_daily_rate() {
        assert!(full_profile().is_payable());
        assert!(!CompensationProfile::default().is_payable());
    }
}
