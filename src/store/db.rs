use std::path::Path;

use rusqlite::{Connection, params};
use tracing::debug;

use super::models::*;
use crate::errors::{CmsError, Result, StoreContext};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS department (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS role (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        salary NUMERIC NOT NULL
            CHECK (typeof(salary) IN ('integer', 'real'))
            CHECK (abs(salary) <= 1.7976931348623157e308),
        department_id INTEGER NOT NULL REFERENCES department(id)
    );

    CREATE TABLE IF NOT EXISTS employee (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        role_id INTEGER REFERENCES role(id),
        manager_id INTEGER REFERENCES employee(id)
    );

    CREATE INDEX IF NOT EXISTS idx_role_department ON role(department_id);
    CREATE INDEX IF NOT EXISTS idx_employee_role ON employee(role_id);
    CREATE INDEX IF NOT EXISTS idx_employee_manager ON employee(manager_id);
";

const VIEW_DEPARTMENTS: &str = "SELECT id, name FROM department ORDER BY id";

const VIEW_ROLES: &str = "
    SELECT role.id, role.title, department.name, role.salary
    FROM role
    JOIN department ON role.department_id = department.id
    ORDER BY role.id";

const VIEW_EMPLOYEES: &str = "
    SELECT
        employee.id,
        employee.first_name,
        employee.last_name,
        role.title,
        department.name,
        role.salary,
        COALESCE(manager.first_name || ' ' || manager.last_name, '')
    FROM employee
    LEFT JOIN role ON employee.role_id = role.id
    LEFT JOIN department ON role.department_id = department.id
    LEFT JOIN employee manager ON employee.manager_id = manager.id
    ORDER BY employee.id";

/// The one store connection a session works against.
///
/// Opened once at startup and borrowed by every handler. Each statement is
/// auto-committed; there is no transaction spanning a handler.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| CmsError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.init()?;
        debug!(path = %path.display(), "opened store");
        Ok(store)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| CmsError::Open {
            path: ":memory:".into(),
            source,
        })?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .store_context("enable foreign keys")?;
        self.conn
            .execute_batch(SCHEMA)
            .store_context("create schema")?;
        Ok(())
    }

    // ── Reference lists ───────────────────────────────────────────────

    pub fn list_departments(&self) -> Result<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM department ORDER BY id")
            .store_context("prepare department list")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Department {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .store_context("query departments")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store_context("read department row")
    }

    pub fn list_roles(&self) -> Result<Vec<Role>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, salary, department_id FROM role ORDER BY id")
            .store_context("prepare role list")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Role {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    salary: row.get(2)?,
                    department_id: row.get(3)?,
                })
            })
            .store_context("query roles")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store_context("read role row")
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, first_name, last_name, role_id, manager_id FROM employee ORDER BY id",
            )
            .store_context("prepare employee list")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Employee {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    role_id: row.get(3)?,
                    manager_id: row.get(4)?,
                })
            })
            .store_context("query employees")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store_context("read employee row")
    }

    // ── Listings ──────────────────────────────────────────────────────

    pub fn department_rows(&self) -> Result<Vec<DepartmentRow>> {
        let mut stmt = self
            .conn
            .prepare(VIEW_DEPARTMENTS)
            .store_context("prepare department listing")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DepartmentRow {
                    id: row.get(0)?,
                    department: row.get(1)?,
                })
            })
            .store_context("query department listing")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store_context("read department listing row")
    }

    pub fn role_rows(&self) -> Result<Vec<RoleRow>> {
        let mut stmt = self
            .conn
            .prepare(VIEW_ROLES)
            .store_context("prepare role listing")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RoleRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    department: row.get(2)?,
                    salary: row.get(3)?,
                })
            })
            .store_context("query role listing")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store_context("read role listing row")
    }

    pub fn employee_rows(&self) -> Result<Vec<EmployeeRow>> {
        let mut stmt = self
            .conn
            .prepare(VIEW_EMPLOYEES)
            .store_context("prepare employee listing")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EmployeeRow {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    title: row.get(3)?,
                    department: row.get(4)?,
                    salary: row.get(5)?,
                    manager: row.get(6)?,
                })
            })
            .store_context("query employee listing")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .store_context("read employee listing row")
    }

    // ── Mutations ─────────────────────────────────────────────────────

    pub fn add_department(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO department (name) VALUES (?1)", params![name])
            .store_context("insert department")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a role. `salary` is passed through as text; the column's
    /// numeric affinity and CHECKs decide whether it is acceptable. Values
    /// that overflow to infinity are rejected.
    pub fn add_role(&self, title: &str, salary: &str, department_id: i64) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO role (title, salary, department_id) VALUES (?1, ?2, ?3)",
                params![title, salary, department_id],
            )
            .store_context("insert role")?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_employee(
        &self,
        first_name: &str,
        last_name: &str,
        role_id: i64,
        manager_id: Option<i64>,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES (?1, ?2, ?3, ?4)",
                params![first_name, last_name, role_id, manager_id],
            )
            .store_context("insert employee")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Point an employee at a different role. Returns the number of rows changed.
    pub fn update_employee_role(&self, employee_id: i64, role_id: i64) -> Result<usize> {
        self.conn
            .execute(
                "UPDATE employee SET role_id = ?1 WHERE id = ?2",
                params![role_id, employee_id],
            )
            .store_context("update employee role")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_open_creates_schema() -> Result<()> {
        let store = Store::open_in_memory()?;
        let table_count: i32 = store.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('department', 'role', 'employee')",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(table_count, 3);
        Ok(())
    }

    #[test]
    fn test_open_is_idempotent_on_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("roster.db");
        {
            let store = Store::open(&path)?;
            store.add_department("Sales")?;
        }
        let store = Store::open(&path)?;
        let departments = store.list_departments()?;
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].name, "Sales");
        Ok(())
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("roster.db");
        let err = Store::open(&path).err().expect("open should fail");
        assert!(matches!(err, CmsError::Open { .. }));
    }

    #[test]
    fn test_department_listing_contains_added_name() -> Result<()> {
        let store = Store::open_in_memory()?;
        let id = store.add_department("Engineering")?;
        let rows = store.department_rows()?;
        assert_eq!(
            rows,
            vec![DepartmentRow {
                id,
                department: "Engineering".into()
            }]
        );
        Ok(())
    }

    #[test]
    fn test_role_listing_joins_department_name() -> Result<()> {
        let store = Store::open_in_memory()?;
        store.add_department("Sales")?;
        let eng = store.add_department("Engineering")?;
        store.add_role("Engineer", "90000", eng)?;

        let rows = store.role_rows()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Engineer");
        assert_eq!(rows[0].department, "Engineering");
        assert_eq!(rows[0].salary, Salary::Integer(90000));
        Ok(())
    }

    #[test]
    fn test_decimal_salary_is_kept() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Finance")?;
        store.add_role("Analyst", "72500.50", dept)?;
        assert_eq!(store.list_roles()?[0].salary, Salary::Real(72500.5));
        Ok(())
    }

    #[test]
    fn test_non_numeric_salary_is_rejected() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Finance")?;
        let err = store.add_role("Analyst", "lots", dept).unwrap_err();
        assert!(matches!(err, CmsError::Store { action: "insert role", .. }));
        assert!(store.list_roles()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_large_integer_salary_is_read_back_exactly() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Finance")?;
        store.add_role("Treasurer", "12345678901234567", dept)?;
        store.add_role("Auditor", "9007199254740993", dept)?;

        let rows = store.role_rows()?;
        assert_eq!(rows[0].salary, Salary::Integer(12345678901234567));
        assert_eq!(rows[0].salary.to_string(), "12345678901234567");
        assert_eq!(rows[1].salary.to_string(), "9007199254740993");
        Ok(())
    }

    #[test]
    fn test_overflowing_salary_is_rejected() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Finance")?;
        let err = store.add_role("Analyst", "1e400", dept).unwrap_err();
        assert!(matches!(err, CmsError::Store { action: "insert role", .. }));
        assert!(store.list_roles()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_role_requires_existing_department() -> Result<()> {
        let store = Store::open_in_memory()?;
        let err = store.add_role("Ghost", "1", 999).unwrap_err();
        assert!(matches!(err, CmsError::Store { .. }));
        Ok(())
    }

    #[test]
    fn test_employee_without_manager_has_blank_manager() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Engineering")?;
        let role = store.add_role("Engineer", "90000", dept)?;
        store.add_employee("Ada", "Lovelace", role, None)?;

        let rows = store.employee_rows()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].manager, "");
        assert_eq!(rows[0].title.as_deref(), Some("Engineer"));
        assert_eq!(rows[0].department.as_deref(), Some("Engineering"));
        assert_eq!(rows[0].salary, Some(Salary::Integer(90000)));
        Ok(())
    }

    #[test]
    fn test_employee_with_manager_shows_full_name() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Engineering")?;
        let role = store.add_role("Engineer", "90000", dept)?;
        let ada = store.add_employee("Ada", "Lovelace", role, None)?;
        store.add_employee("Bob", "Smith", role, Some(ada))?;

        let rows = store.employee_rows()?;
        let bob = rows.iter().find(|r| r.first_name == "Bob").unwrap();
        assert_eq!(bob.manager, "Ada Lovelace");
        Ok(())
    }

    #[test]
    fn test_employee_without_role_still_listed() -> Result<()> {
        let store = Store::open_in_memory()?;
        store.conn.execute(
            "INSERT INTO employee (first_name, last_name) VALUES ('Grace', 'Hopper')",
            [],
        )?;
        let rows = store.employee_rows()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, None);
        assert_eq!(rows[0].department, None);
        assert_eq!(rows[0].salary, None);
        Ok(())
    }

    #[test]
    fn test_employee_manager_must_exist() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Engineering")?;
        let role = store.add_role("Engineer", "90000", dept)?;
        let err = store.add_employee("Bob", "Smith", role, Some(42)).unwrap_err();
        assert!(matches!(err, CmsError::Store { action: "insert employee", .. }));
        Ok(())
    }

    #[test]
    fn test_update_employee_role_changes_title_and_salary() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Engineering")?;
        let engineer = store.add_role("Engineer", "90000", dept)?;
        let lead = store.add_role("Lead", "120000", dept)?;
        let bob = store.add_employee("Bob", "Smith", engineer, None)?;

        assert_eq!(store.update_employee_role(bob, lead)?, 1);
        let row = &store.employee_rows()?[0];
        assert_eq!(row.title.as_deref(), Some("Lead"));
        assert_eq!(row.salary, Some(Salary::Integer(120000)));

        // Same target again leaves the listing unchanged.
        assert_eq!(store.update_employee_role(bob, lead)?, 1);
        assert_eq!(&store.employee_rows()?[0], row);
        Ok(())
    }

    #[test]
    fn test_reference_lists_are_ordered_by_id() -> Result<()> {
        let store = Store::open_in_memory()?;
        let dept = store.add_department("Ops")?;
        let role = store.add_role("Operator", "50000", dept)?;
        store.add_employee("Zed", "Zulu", role, None)?;
        store.add_employee("Amy", "Alpha", role, None)?;

        let names: Vec<String> = store
            .list_employees()?
            .iter()
            .map(Employee::full_name)
            .collect();
        assert_eq!(names, vec!["Zed Zulu", "Amy Alpha"]);
        Ok(())
    }
}
