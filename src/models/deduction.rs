//! Deduction catalog and per-run deduction selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A deduction type from the fixed payroll catalog.
///
/// Variants are declared in catalog order; the derived `Ord` keeps
/// breakdowns and selections listed in that order.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionType;
///
/// assert_eq!(DeductionType::PagibigLoan.to_string(), "pagibig_loan");
/// assert_eq!("sss".parse::<DeductionType>(), Ok(DeductionType::Sss));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionType {
    /// SSS contribution.
    Sss,
    /// SSS loan amortization.
    SssLoan,
    /// PhilHealth contribution.
    Philhealth,
    /// Pag-IBIG contribution.
    Pagibig,
    /// Pag-IBIG loan amortization.
    PagibigLoan,
    /// Company loan amortization.
    CompanyLoan,
    /// Company cash fund.
    CompanyCashFund,
    /// Cash advance.
    CashAdvance,
    /// Sum of the profile's itemized other deductions.
    OtherDeductions,
}

impl DeductionType {
    /// Every deduction type, in catalog order.
    pub const ALL: [DeductionType; 9] = [
        DeductionType::Sss,
        DeductionType::SssLoan,
        DeductionType::Philhealth,
        DeductionType::Pagibig,
        DeductionType::PagibigLoan,
        DeductionType::CompanyLoan,
        DeductionType::CompanyCashFund,
        DeductionType::CashAdvance,
        DeductionType::OtherDeductions,
    ];

    /// Returns the wire identifier of this deduction type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeductionType::Sss => "sss",
            DeductionType::SssLoan => "sss_loan",
            DeductionType::Philhealth => "philhealth",
            DeductionType::Pagibig => "pagibig",
            DeductionType::PagibigLoan => "pagibig_loan",
            DeductionType::CompanyLoan => "company_loan",
            DeductionType::CompanyCashFund => "company_cash_fund",
            DeductionType::CashAdvance => "cash_advance",
            DeductionType::OtherDeductions => "other_deductions",
        }
    }
}

impl std::fmt::Display for DeductionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeductionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeductionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown deduction type: {}", s))
    }
}

/// The set of deduction types withheld in one payroll run.
///
/// Types outside the selection contribute nothing to that run, even when
/// the employee's profile carries a non-zero amount for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeductionSelection(BTreeSet<DeductionType>);

impl DeductionSelection {
    /// Creates an empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the given type is withheld.
    pub fn contains(&self, kind: DeductionType) -> bool {
        self.0.contains(&kind)
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected types.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<DeductionType> for DeductionSelection {
    fn from_iter<I: IntoIterator<Item = DeductionType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[DeductionType; N]> for DeductionSelection {
    fn from(kinds: [DeductionType; N]) -> Self {
        kinds.into_iter().collect()
    }
}
