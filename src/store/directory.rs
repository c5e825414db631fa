//! In-memory employee directory.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationProfile, Employee};

use super::CompensationSource;

/// One employee record with its optional compensation profile, as listed
/// in a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The employee.
    #[serde(flatten)]
    pub employee: Employee,
    /// The employee's compensation profile, if one has been set up.
    #[serde(default)]
    pub compensation: Option<CompensationProfile>,
}

#[derive(Debug, Default)]
struct DirectoryData {
    employees: Vec<Employee>,
    profiles: HashMap<String, CompensationProfile>,
}

/// A [`CompensationSource`] held in memory.
///
/// Profiles can be replaced at any time; runs already generated keep the
/// snapshot taken at generation.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    data: RwLock<DirectoryData>,
}

impl InMemoryDirectory {
    /// Creates a directory from employees paired with optional profiles.
    pub fn new(entries: Vec<(Employee, Option<CompensationProfile>)>) -> Self {
        let mut data = DirectoryData::default();
        for (employee, profile) in entries {
            if let Some(profile) = profile {
                data.profiles.insert(employee.id.clone(), profile);
            }
            data.employees.push(employee);
        }
        Self {
            data: RwLock::new(data),
        }
    }

    /// Creates a directory from roster entries.
    pub fn from_roster(roster: Vec<RosterEntry>) -> Self {
        Self::new(
            roster
                .into_iter()
                .map(|entry| (entry.employee, entry.compensation))
                .collect(),
        )
    }

    /// Sets or replaces an employee's compensation profile.
    pub fn set_profile(&self, employee_id: &str, profile: CompensationProfile) -> EngineResult<()> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.profiles.insert(employee_id.to_string(), profile);
        Ok(())
    }
}

impl CompensationSource for InMemoryDirectory {
    fn employees(&self) -> EngineResult<Vec<Employee>> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.employees.clone())
    }

    fn profile(&self, employee_id: &str) -> EngineResult<Option<CompensationProfile>> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.profiles.get(employee_id).cloned())
    }
}

fn poisoned() -> EngineError {
    EngineError::Storage {
        message: "employee directory lock poisoned".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            position: "Staff".to_string(),
            branch: "Makati".to_string(),
        }
    }

    #[test]
    fn test_employees_keep_insertion_order() {
        let directory = InMemoryDirectory::new(vec![
            (employee("emp_b"), None),
            (employee("emp_a"), None),
        ]);
        let ids: Vec<String> = directory
            .employees()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["emp_b", "emp_a"]);
    }

    #[test]
    fn test_profile_lookup() {
        let mut profile = CompensationProfile::default();
        profile.daily_rate = Decimal::from(550);
        let directory =
            InMemoryDirectory::new(vec![(employee("emp_001"), Some(profile.clone())), (employee("emp_002"), None)]);

        assert_eq!(directory.profile("emp_001").unwrap(), Some(profile));
        assert_eq!(directory.profile("emp_002").unwrap(), None);
        assert_eq!(directory.profile("emp_404").unwrap(), None);
    }

    #[test]
    fn test_set_profile_replaces_existing() {
        let directory = InMemoryDirectory::new(vec![(employee("emp_001"), None)]);
        let mut profile = CompensationProfile::default();
        profile.daily_rate = Decimal::from(700);

        directory.set_profile("emp_001", profile).unwrap();
        assert_eq!(
            directory.profile("emp_001").unwrap().unwrap().daily_rate,
            Decimal::from(700)
        );
    }

    #[test]
    fn test_roster_entry_deserializes_flattened_employee() {
        let yaml = r#"
id: emp_001
name: Maria Santos
position: Cashier
branch: Makati
compensation:
  daily_rate: 500
  allowances:
    special: 200
"#;
        let entry: RosterEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.employee.name, "Maria Santos");
        assert_eq!(
            entry.compensation.unwrap().allowances.special,
            Decimal::from(200)
        );
    }
}
