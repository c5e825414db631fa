//! Cutoff classification.
//!
//! Maps a period's end date to a cutoff category and the deduction types
//! conventionally withheld at that cutoff. Mid-month payrolls withhold
//! PhilHealth and Pag-IBIG; end-of-month payrolls withhold SSS.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DeductionSelection, DeductionType, PayPeriod, last_day_of_month};

/// Day of month that closes the mid-month cutoff.
pub const MID_CUTOFF_DAY: u32 = 15;

/// Deduction types withheld by default at the mid-month cutoff.
pub const MID_CUTOFF_DEDUCTIONS: [DeductionType; 7] = [
    DeductionType::Philhealth,
    DeductionType::Pagibig,
    DeductionType::PagibigLoan,
    DeductionType::CompanyLoan,
    DeductionType::CompanyCashFund,
    DeductionType::CashAdvance,
    DeductionType::OtherDeductions,
];

/// Deduction types withheld by default at the end-of-month cutoff.
pub const END_CUTOFF_DEDUCTIONS: [DeductionType; 5] = [
    DeductionType::Sss,
    DeductionType::SssLoan,
    DeductionType::CompanyLoan,
    DeductionType::CashAdvance,
    DeductionType::OtherDeductions,
];

/// The cutoff a pay period closes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutoffCategory {
    /// Period ends on the 15th.
    #[serde(rename = "Mid-Cutoff")]
    MidCutoff,
    /// Period ends at month end.
    #[serde(rename = "End-Cutoff")]
    EndCutoff,
    /// Any other end date; the caller picks deductions explicitly.
    Custom,
}

impl std::fmt::Display for CutoffCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CutoffCategory::MidCutoff => write!(f, "Mid-Cutoff"),
            CutoffCategory::EndCutoff => write!(f, "End-Cutoff"),
            CutoffCategory::Custom => write!(f, "Custom"),
        }
    }
}

/// A cutoff category with its suggested deduction selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffClassification {
    /// The cutoff category.
    pub category: CutoffCategory,
    /// Deductions suggested for this cutoff. Empty for [`CutoffCategory::Custom`].
    pub default_deductions: DeductionSelection,
}

/// Classifies a period end date into a cutoff category.
///
/// - Day 15 is the mid-month cutoff.
/// - Day 28 or later is the end-of-month cutoff when it is day 30, day 31,
///   or the last day of the month (so Feb 28/29 qualify, Jan 28 does not).
/// - Anything else is custom, with no default deductions.
///
/// The classifier only suggests; run creation may override the selection.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{CutoffCategory, classify_cutoff};
/// use chrono::NaiveDate;
///
/// let mid = classify_cutoff(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
/// assert_eq!(mid.category, CutoffCategory::MidCutoff);
///
/// let end = classify_cutoff(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(end.category, CutoffCategory::EndCutoff);
///
/// let custom = classify_cutoff(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
/// assert_eq!(custom.category, CutoffCategory::Custom);
/// assert!(custom.default_deductions.is_empty());
/// ```
pub fn classify_cutoff(period_end: NaiveDate) -> CutoffClassification {
    let day = period_end.day();
    let last_day = last_day_of_month(period_end).day();

    if day == MID_CUTOFF_DAY {
        CutoffClassification {
            category: CutoffCategory::MidCutoff,
            default_deductions: DeductionSelection::from(MID_CUTOFF_DEDUCTIONS),
        }
    } else if day >= 28 && (day >= 30 || day == last_day) {
        CutoffClassification {
            category: CutoffCategory::EndCutoff,
            default_deductions: DeductionSelection::from(END_CUTOFF_DEDUCTIONS),
        }
    } else {
        CutoffClassification {
            category: CutoffCategory::Custom,
            default_deductions: DeductionSelection::empty(),
        }
    }
}

/// Suggests the semi-monthly period containing `today`.
///
/// Days 1 to 15 fall in the first half; the rest run from the 16th to the
/// last day of the month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::suggest_period;
/// use chrono::NaiveDate;
///
/// let period = suggest_period(NaiveDate::from_ymd_opt(2025, 2, 20).unwrap());
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 2, 16).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// ```
pub fn suggest_period(today: NaiveDate) -> PayPeriod {
    let (start_day, end_date) = if today.day() <= MID_CUTOFF_DAY {
        (1, today.with_day(MID_CUTOFF_DAY))
    } else {
        (MID_CUTOFF_DAY + 1, Some(last_day_of_month(today)))
    };
    let start_date = today.with_day(start_day).unwrap_or(today);
    let end_date = end_date.unwrap_or(today);

    PayPeriod {
        start_date,
        end_date,
    }
}
