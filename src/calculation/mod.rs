//! Calculation logic for the payroll engine.
//!
//! This module contains cutoff classification, the pure payslip calculator,
//! run generation over an employee set, and live recalculation of edited
//! lines.

mod cutoff;
mod payslip;
mod recalculation;
mod run_generation;

pub use cutoff::{
    CutoffCategory, CutoffClassification, END_CUTOFF_DEDUCTIONS, MID_CUTOFF_DAY,
    MID_CUTOFF_DEDUCTIONS, classify_cutoff, suggest_period,
};
pub use payslip::{calculate_payslip, snapshot_profile};
pub use recalculation::{EditableField, apply_field_edit};
pub use run_generation::{DEFAULT_DAYS_PRESENT, RunDefaults, generate_run};
