//! One function per menu action.
//!
//! Each handler fetches whatever reference lists it needs right before
//! prompting, issues a single statement, and reports the result. Nothing is
//! caught here: any failure goes straight back to the command loop.

use std::io::Write;

use tracing::{debug, info};

use crate::errors::Result;
use crate::prompt::choices::{department_choices, employee_choices, manager_choices, role_choices};
use crate::prompt::{Prompter, choose};
use crate::store::Store;
use crate::ui::listing;
use crate::ui::icons::CHECK;

pub const DEPARTMENT_HEADERS: [&str; 2] = ["ID", "Department"];
pub const ROLE_HEADERS: [&str; 4] = ["ID", "Title", "Department", "Salary"];
pub const EMPLOYEE_HEADERS: [&str; 7] = [
    "ID",
    "First Name",
    "Last Name",
    "Title",
    "Department",
    "Salary",
    "Manager",
];

pub fn view_departments<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    let rows = store.department_rows()?;
    debug!(count = rows.len(), "listing departments");

    let mut table = listing(DEPARTMENT_HEADERS);
    for row in rows {
        table.add_row([row.id.to_string(), row.department]);
    }
    writeln!(out, "{}", table)?;
    Ok(())
}

pub fn view_roles<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    let rows = store.role_rows()?;
    debug!(count = rows.len(), "listing roles");

    let mut table = listing(ROLE_HEADERS);
    for row in rows {
        table.add_row([
            row.id.to_string(),
            row.title,
            row.department,
            row.salary.to_string(),
        ]);
    }
    writeln!(out, "{}", table)?;
    Ok(())
}

pub fn view_employees<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    let rows = store.employee_rows()?;
    debug!(count = rows.len(), "listing employees");

    let mut table = listing(EMPLOYEE_HEADERS);
    for row in rows {
        table.add_row([
            row.id.to_string(),
            row.first_name,
            row.last_name,
            row.title.unwrap_or_default(),
            row.department.unwrap_or_default(),
            row.salary.map(|s| s.to_string()).unwrap_or_default(),
            row.manager,
        ]);
    }
    writeln!(out, "{}", table)?;
    Ok(())
}

pub fn add_department<P, W>(store: &Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let name = prompter.input("Enter the name of the department:")?;

    let id = store.add_department(&name)?;
    info!(id, name = %name, "added department");
    writeln!(out, "{}Added {} to departments.", CHECK, name)?;
    Ok(())
}

pub fn add_role<P, W>(store: &Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let departments = department_choices(&store.list_departments()?);

    let title = prompter.input("Enter the title of the role:")?;
    let salary = prompter.input("Enter the salary for the role:")?;
    let department_id = choose(prompter, "Select the department for the role:", &departments)?;

    let id = store.add_role(&title, &salary, department_id)?;
    info!(id, title = %title, department_id, "added role");
    writeln!(out, "{}Added {} to roles.", CHECK, title)?;
    Ok(())
}

pub fn add_employee<P, W>(store: &Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let roles = role_choices(&store.list_roles()?);
    let managers = manager_choices(&store.list_employees()?);

    let first_name = prompter.input("Enter the employee's first name:")?;
    let last_name = prompter.input("Enter the employee's last name:")?;
    let role_id = choose(prompter, "Select the employee's role:", &roles)?;
    let manager_id = choose(prompter, "Select the employee's manager:", &managers)?;

    let id = store.add_employee(&first_name, &last_name, role_id, manager_id)?;
    info!(id, role_id, ?manager_id, "added employee");
    writeln!(
        out,
        "{}Added {} {} to employees.",
        CHECK, first_name, last_name
    )?;
    Ok(())
}

pub fn update_employee_role<P, W>(store: &Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let employees = employee_choices(&store.list_employees()?);
    let roles = role_choices(&store.list_roles()?);

    let employee_id = choose(prompter, "Select the employee to update:", &employees)?;
    let role_id = choose(prompter, "Select the new role for the employee:", &roles)?;

    let changed = store.update_employee_role(employee_id, role_id)?;
    info!(employee_id, role_id, changed, "updated employee role");
    writeln!(out, "{}Updated employee role.", CHECK)?;
    Ok(())
}
