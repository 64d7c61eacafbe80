use std::fmt;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};

/// A department as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// A role as stored. Salary is whatever numeric value the store accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i64,
    pub title: String,
    pub salary: Salary,
    pub department_id: i64,
}

/// An employee as stored. Both references are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<i64>,
    pub manager_id: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ── Listing rows ──────────────────────────────────────────────────────

/// One line of the "View all departments" listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentRow {
    pub id: i64,
    pub department: String,
}

/// One line of the "View all roles" listing.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRow {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub salary: Salary,
}

/// One line of the "View all employees" listing.
///
/// Role-derived columns are `None` for an employee without a role.
/// `manager` is empty when the employee has no manager.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub salary: Option<Salary>,
    pub manager: String,
}

/// A salary exactly as the store holds it.
///
/// The column keeps integers and reals apart, so whole amounts are read back
/// without passing through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Salary {
    Integer(i64),
    Real(f64),
}

impl FromSql for Salary {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(i) => Ok(Salary::Integer(i)),
            ValueRef::Real(r) => Ok(Salary::Real(r)),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salary::Integer(i) => write!(f, "{}", i),
            Salary::Real(r) => write!(f, "{}", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_with_space() {
        let emp = Employee {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role_id: None,
            manager_id: None,
        };
        assert_eq!(emp.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_salary_display() {
        assert_eq!(Salary::Integer(90000).to_string(), "90000");
        assert_eq!(Salary::Integer(12345678901234567).to_string(), "12345678901234567");
        assert_eq!(Salary::Real(85000.5).to_string(), "85000.5");
        assert_eq!(Salary::Real(120000.0).to_string(), "120000");
    }
}
