//! Employee Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee role (`empleado_rol` enum column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "empleado_rol"))]
pub enum Role {
    #[default]
    #[serde(rename = "Empleado")]
    #[cfg_attr(feature = "db", sqlx(rename = "Empleado"))]
    Worker,
    #[serde(rename = "Supervisor")]
    #[cfg_attr(feature = "db", sqlx(rename = "Supervisor"))]
    Supervisor,
}

/// Employment status (`empleado_status` enum column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "empleado_status"))]
pub enum Status {
    #[default]
    #[serde(rename = "Activo")]
    #[cfg_attr(feature = "db", sqlx(rename = "Activo"))]
    Active,
    #[serde(rename = "Inactivo")]
    #[cfg_attr(feature = "db", sqlx(rename = "Inactivo"))]
    Inactive,
}

/// Employee row from the `Empleados` table.
///
/// Field names follow the stored column names, which is also the JSON shape
/// returned by `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub edad: i32,
    pub direccion: String,
    pub password: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub salario: Decimal,
    #[serde(default)]
    pub rol: Role,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub user_image: Option<String>,
    #[serde(rename = "createdAt")]
    #[cfg_attr(feature = "db", sqlx(rename = "createdAt"))]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[cfg_attr(feature = "db", sqlx(rename = "updatedAt"))]
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Case-insensitive substring match on `nombre`.
    ///
    /// Mirrors the storage-side `ILIKE '%query%'` filter; an empty query
    /// matches every employee.
    pub fn name_contains(&self, query: &str) -> bool {
        query.is_empty() || self.nombre.to_lowercase().contains(&query.to_lowercase())
    }
}
