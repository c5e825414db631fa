//! Payroll calculation and recalculation engine
//!
//! This crate computes semi-monthly payroll runs for daily-rated employees.
//! It classifies pay periods into cutoffs, suggests the statutory and
//! company deductions withheld at each cutoff, generates a payslip line per
//! employee from a frozen compensation snapshot, recalculates lines as
//! attendance is edited, and persists runs with optimistic versioning.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
