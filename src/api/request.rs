//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for every endpoint and
//! their conversion into validated domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{EditableField, classify_cutoff};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BranchFilter, DeductionSelection, PayPeriod, PayrollRun, PayslipLine, RunStatus,
    deserialize_lenient_amount,
};

/// Request body for `POST /calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Deduction types to withhold. When omitted, the cutoff default for
    /// `end_date` applies.
    #[serde(default)]
    pub selected_deductions: Option<DeductionSelection>,
    /// Branch name or "All". Omitted means "All".
    #[serde(default)]
    pub branch: BranchFilter,
}

impl CalculationRequest {
    /// Returns the validated pay period.
    pub fn period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.start_date, self.end_date)
    }

    /// Returns the explicit selection, or the cutoff default for the end date.
    pub fn selection(&self) -> DeductionSelection {
        self.selected_deductions
            .clone()
            .unwrap_or_else(|| classify_cutoff(self.end_date).default_deductions)
    }
}

/// Request body for `POST /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRunRequest {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Branch the run was generated for.
    #[serde(default)]
    pub branch: BranchFilter,
    /// Payslip lines, already recomputed by the caller.
    pub items: Vec<PayslipLine>,
    /// Status to save with.
    #[serde(default)]
    pub status: RunStatus,
}

/// Request body for `PATCH /payroll/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRunRequest {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Replacement payslip lines.
    pub items: Vec<PayslipLine>,
    /// New status.
    pub status: RunStatus,
    /// The version the edit is based on.
    pub version: u64,
}

impl UpdateRunRequest {
    /// Returns the validated pay period after checking line amounts.
    pub fn validated_period(&self) -> EngineResult<PayPeriod> {
        validate_lines(&self.items)?;
        PayPeriod::new(self.period_start, self.period_end)
    }
}

/// Request body for `POST /recalculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculateRequest {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// The run's current lines.
    pub items: Vec<PayslipLine>,
    /// The employee whose line is edited.
    pub employee_id: String,
    /// The edited field.
    pub field: EditableField,
    /// The new value. Non-numeric input reads as zero.
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub value: Decimal,
}

impl TryFrom<RecalculateRequest> for PayrollRun {
    type Error = EngineError;

    fn try_from(req: RecalculateRequest) -> Result<Self, Self::Error> {
        validate_lines(&req.items)?;
        Ok(PayrollRun {
            period: PayPeriod::new(req.period_start, req.period_end)?,
            branch_filter: BranchFilter::All,
            status: RunStatus::Draft,
            lines: req.items,
        })
    }
}

impl TryFrom<SaveRunRequest> for PayrollRun {
    type Error = EngineError;

    fn try_from(req: SaveRunRequest) -> Result<Self, Self::Error> {
        validate_lines(&req.items)?;
        Ok(PayrollRun {
            period: PayPeriod::new(req.period_start, req.period_end)?,
            branch_filter: req.branch,
            status: req.status,
            lines: req.items,
        })
    }
}

/// Query for `GET /cutoff`.
#[derive(Debug, Clone, Deserialize)]
pub struct CutoffQuery {
    /// The period end date to classify.
    pub period_end: NaiveDate,
}

/// Query for `GET /cutoff/suggest`.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestPeriodQuery {
    /// The date to suggest a period for.
    pub today: NaiveDate,
}

/// Rejects lines carrying a negative attendance figure, rate, allowance or
/// deduction amount.
fn validate_lines(lines: &[PayslipLine]) -> EngineResult<()> {
    for line in lines {
        let snapshot = &line.profile_snapshot;
        let amounts = [
            ("days_present".to_string(), line.days_present),
            ("double_pay_amount".to_string(), line.double_pay_amount),
            ("daily_rate".to_string(), snapshot.daily_rate),
            ("allowances".to_string(), snapshot.allowances_total),
        ]
        .into_iter()
        .chain(
            snapshot
                .deduction_details
                .iter()
                .map(|(kind, amount)| (format!("deduction_details.{}", kind), *amount)),
        );

        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    field,
                    message: format!(
                        "must not be negative for employee '{}', got {}",
                        line.employee_id, value
                    ),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeductionType;

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "startDate": "2025-03-16",
            "endDate": "2025-03-31",
            "selectedDeductions": ["sss", "other_deductions"],
            "branch": "Makati"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.branch, BranchFilter::Branch("Makati".to_string()));
        assert_eq!(
            request.selection(),
            DeductionSelection::from([DeductionType::Sss, DeductionType::OtherDeductions])
        );
    }

    #[test]
    fn test_calculation_request_defaults_to_cutoff_selection() {
        let json = r#"{ "startDate": "2025-03-01", "endDate": "2025-03-15" }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.branch, BranchFilter::All);
        assert_eq!(
            request.selection(),
            classify_cutoff(request.end_date).default_deductions
        );
        assert!(request.selection().contains(DeductionType::Philhealth));
    }

    #[test]
    fn test_calculation_request_rejects_unknown_deduction() {
        let json = r#"{
            "startDate": "2025-03-16",
            "endDate": "2025-03-31",
            "selectedDeductions": ["income_tax"]
        }"#;

        assert!(serde_json::from_str::<CalculationRequest>(json).is_err());
    }

    #[test]
    fn test_calculation_request_period_validation() {
        let json = r#"{ "startDate": "2025-03-31", "endDate": "2025-03-16" }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request.period(),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    fn item_json(days_present: &str) -> String {
        format!(
            r#"{{
                "employee_id": "emp_001",
                "days_present": {},
                "daily_rate": 500,
                "gross_pay": 0,
                "total_deductions": 0,
                "net_pay": 0
            }}"#,
            days_present
        )
    }

    #[test]
    fn test_save_request_converts_to_run() {
        let json = format!(
            r#"{{
                "period_start": "2025-03-01",
                "period_end": "2025-03-15",
                "items": [{}],
                "status": "Finalized"
            }}"#,
            item_json("15")
        );

        let request: SaveRunRequest = serde_json::from_str(&json).unwrap();
        let run = PayrollRun::try_from(request).unwrap();
        assert_eq!(run.status, RunStatus::Finalized);
        assert_eq!(run.branch_filter, BranchFilter::All);
        assert_eq!(run.lines.len(), 1);
    }

    #[test]
    fn test_save_request_rejects_negative_days() {
        let json = format!(
            r#"{{
                "period_start": "2025-03-01",
                "period_end": "2025-03-15",
                "items": [{}]
            }}"#,
            item_json("-2")
        );

        let request: SaveRunRequest = serde_json::from_str(&json).unwrap();
        match PayrollRun::try_from(request) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "days_present"),
            _ => panic!("Expected InvalidAmount error"),
        }
    }

    fn save_request_with_item(item: &str) -> SaveRunRequest {
        let json = format!(
            r#"{{
                "period_start": "2025-03-01",
                "period_end": "2025-03-15",
                "items": [{}]
            }}"#,
            item
        );
        serde_json::from_str(&json).unwrap()
    }

    fn rejected_field(request: SaveRunRequest) -> String {
        match PayrollRun::try_from(request) {
            Err(EngineError::InvalidAmount { field, .. }) => field,
            other => panic!("Expected InvalidAmount error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_request_rejects_negative_daily_rate() {
        let request = save_request_with_item(
            r#"{ "employee_id": "emp_001", "days_present": 15, "daily_rate": -500,
                 "gross_pay": 0, "total_deductions": 0, "net_pay": 0 }"#,
        );
        assert_eq!(rejected_field(request), "daily_rate");
    }

    #[test]
    fn test_save_request_rejects_negative_allowances() {
        let request = save_request_with_item(
            r#"{ "employee_id": "emp_001", "days_present": 15, "daily_rate": 500,
                 "allowances": -200, "gross_pay": 0, "total_deductions": 0, "net_pay": 0 }"#,
        );
        assert_eq!(rejected_field(request), "allowances");
    }

    #[test]
    fn test_save_request_rejects_negative_deduction_detail() {
        let request = save_request_with_item(
            r#"{ "employee_id": "emp_001", "days_present": 15, "daily_rate": 500,
                 "deduction_details": { "sss": -1000 },
                 "gross_pay": 0, "total_deductions": 0, "net_pay": 0 }"#,
        );
        assert_eq!(rejected_field(request), "deduction_details.sss");
    }

    #[test]
    fn test_negative_net_pay_is_accepted() {
        let request = save_request_with_item(
            r#"{ "employee_id": "emp_001", "days_present": 1, "daily_rate": 500,
                 "deduction_details": { "company_loan": 1000 },
                 "gross_pay": 500, "total_deductions": 1000, "net_pay": -500 }"#,
        );
        assert!(PayrollRun::try_from(request).is_ok());
    }

    #[test]
    fn test_recalculate_request_coerces_value() {
        let json = format!(
            r#"{{
                "period_start": "2025-03-01",
                "period_end": "2025-03-15",
                "items": [{}],
                "employee_id": "emp_001",
                "field": "days_present",
                "value": "abc"
            }}"#,
            item_json("15")
        );

        let request: RecalculateRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.field, EditableField::DaysPresent);
        assert_eq!(request.value, Decimal::ZERO);
    }
}
