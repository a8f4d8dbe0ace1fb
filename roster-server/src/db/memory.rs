//! In-process employee store
//!
//! Same matching rules as the PostgreSQL store (case-insensitive substring on
//! `nombre`, ordered by id). Used by the `STORAGE=memory` mode and tests.

use std::path::Path;

use async_trait::async_trait;
use shared::models::Employee;

use super::EmployeeStore;
use crate::BoxError;
use crate::error::ServiceResult;

#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    employees: Vec<Employee>,
}

impl MemoryEmployeeStore {
    pub fn new(mut employees: Vec<Employee>) -> Self {
        employees.sort_by_key(|e| e.id);
        Self { employees }
    }

    /// Load employees from a JSON array file
    pub async fn from_seed_file(path: &Path) -> Result<Self, BoxError> {
        let bytes = tokio::fs::read(path).await?;
        let employees: Vec<Employee> = serde_json::from_slice(&bytes)?;
        tracing::info!(count = employees.len(), path = %path.display(), "Seeded memory store");
        Ok(Self::new(employees))
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_by_name_pattern(&self, pattern: &str) -> ServiceResult<Vec<Employee>> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.name_contains(pattern))
            .cloned()
            .collect())
    }
}
