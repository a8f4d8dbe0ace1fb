//! Employee queries against PostgreSQL

use async_trait::async_trait;
use shared::models::Employee;
use sqlx::PgPool;

use super::{EmployeeStore, escape_like};
use crate::error::ServiceResult;

/// `EmployeeStore` backed by the `Empleados` table
#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_by_name_pattern(&self, pattern: &str) -> ServiceResult<Vec<Employee>> {
        let rows: Vec<Employee> = sqlx::query_as(
            r#"
            SELECT id, nombre, email, edad, direccion, password, salario,
                   rol, status, user_image, "createdAt", "updatedAt"
            FROM "Empleados"
            WHERE nombre ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(escape_like(pattern))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
