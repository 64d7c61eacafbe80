//! SQLite-backed store for departments, roles, and employees.
//!
//! All mutations use positional placeholders; listings are static joins.
//! Referential integrity is left to SQLite's foreign keys.

pub mod db;
pub mod models;

pub use db::Store;
pub use models::{Department, DepartmentRow, Employee, EmployeeRow, Role, RoleRow, Salary};
