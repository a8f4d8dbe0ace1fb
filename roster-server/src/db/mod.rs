//! Database access layer

pub mod employees;
pub mod memory;

use async_trait::async_trait;
use shared::models::Employee;

use crate::error::ServiceResult;

pub use employees::PgEmployeeStore;
pub use memory::MemoryEmployeeStore;

/// Read access to the employee table
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Employees whose `nombre` contains `pattern` (case-insensitive), ordered by id.
    ///
    /// An empty pattern returns every employee.
    async fn find_by_name_pattern(&self, pattern: &str) -> ServiceResult<Vec<Employee>>;
}

/// Escape LIKE metacharacters so the pattern is matched literally.
///
/// Uses `\` as the escape character (paired with `ESCAPE '\'` in SQL).
pub fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
