//! Employee model.
//!
//! The engine only needs the identifying fields that appear on a payslip;
//! the rest of the employee record lives with the employee directory.

use serde::{Deserialize, Serialize};

/// Represents an employee eligible for payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name printed on the payslip.
    pub name: String,
    /// Job position or title.
    #[serde(default)]
    pub position: String,
    /// The branch the employee is assigned to.
    #[serde(default)]
    pub branch: String,
}

/// Selects which employees a payroll run covers.
///
/// On the wire this is a plain string: `"All"` (any case, or an empty
/// string) selects every employee, anything else is a branch name matched
/// exactly.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{BranchFilter, Employee};
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Santos".to_string(),
///     position: "Cashier".to_string(),
///     branch: "Makati".to_string(),
/// };
/// assert!(BranchFilter::from("All".to_string()).matches(&employee));
/// assert!(BranchFilter::from("Makati".to_string()).matches(&employee));
/// assert!(!BranchFilter::from("Cebu".to_string()).matches(&employee));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BranchFilter {
    /// Every employee regardless of branch.
    #[default]
    All,
    /// Only employees assigned to the named branch.
    Branch(String),
}

impl BranchFilter {
    /// Returns true if the employee falls under this filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            BranchFilter::All => true,
            BranchFilter::Branch(name) => employee.branch == *name,
        }
    }
}

impl From<String> for BranchFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            BranchFilter::All
        } else {
            BranchFilter::Branch(trimmed.to_string())
        }
    }
}

impl From<BranchFilter> for String {
    fn from(filter: BranchFilter) -> Self {
        match filter {
            BranchFilter::All => "All".to_string(),
            BranchFilter::Branch(name) => name,
        }
    }
}
