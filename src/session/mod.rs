//! The interactive command loop.
//!
//! A session shows the action menu, runs the chosen handler, and shows the
//! menu again until the operator picks `Exit`. Handler failures are not
//! caught; they end the loop and are returned to the caller.

pub mod handlers;

use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::errors::{CmsError, Result};
use crate::prompt::Prompter;
use crate::store::Store;
use crate::ui::icons::WAVE;

pub const MENU_PROMPT: &str = "What would you like to do?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    Exit,
}

impl Action {
    /// Menu order.
    pub const ALL: [Action; 8] = [
        Action::ViewDepartments,
        Action::ViewRoles,
        Action::ViewEmployees,
        Action::AddDepartment,
        Action::AddRole,
        Action::AddEmployee,
        Action::UpdateEmployeeRole,
        Action::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::ViewDepartments => "View all departments",
            Action::ViewRoles => "View all roles",
            Action::ViewEmployees => "View all employees",
            Action::AddDepartment => "Add a department",
            Action::AddRole => "Add a role",
            Action::AddEmployee => "Add an employee",
            Action::UpdateEmployeeRole => "Update an employee role",
            Action::Exit => "Exit",
        }
    }

    pub fn menu_labels() -> Vec<String> {
        Self::ALL.iter().map(|a| a.label().to_string()).collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Drives one operator session against a borrowed store.
pub struct Session<'a, P, W> {
    store: &'a Store,
    prompter: P,
    out: W,
}

impl<'a, P, W> Session<'a, P, W>
where
    P: Prompter,
    W: Write,
{
    pub fn new(store: &'a Store, prompter: P, out: W) -> Self {
        Self {
            store,
            prompter,
            out,
        }
    }

    /// Show the menu until `Exit` is chosen. Returns the first failure, if any.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let action = self.next_action()?;
            if action == Action::Exit {
                writeln!(self.out, "{}Goodbye!", WAVE)?;
                self.out.flush()?;
                debug!("session ended by operator");
                return Ok(());
            }
            self.dispatch(action)?;
        }
    }

    fn next_action(&mut self) -> Result<Action> {
        let index = self.prompter.select(MENU_PROMPT, &Action::menu_labels())?;
        Action::ALL
            .get(index)
            .copied()
            .ok_or(CmsError::SelectionOutOfRange {
                index,
                len: Action::ALL.len(),
            })
    }

    /// Run the handler for a single action. `Exit` does nothing here.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!(%action, "dispatching");
        let store = self.store;
        let prompter = &mut self.prompter;
        let out = &mut self.out;
        match action {
            Action::ViewDepartments => handlers::view_departments(store, out),
            Action::ViewRoles => handlers::view_roles(store, out),
            Action::ViewEmployees => handlers::view_employees(store, out),
            Action::AddDepartment => handlers::add_department(store, prompter, out),
            Action::AddRole => handlers::add_role(store, prompter, out),
            Action::AddEmployee => handlers::add_employee(store, prompter, out),
            Action::UpdateEmployeeRole => handlers::update_employee_role(store, prompter, out),
            Action::Exit => Ok(()),
        }
    }

    pub fn into_parts(self) -> (P, W) {
        (self.prompter, self.out)
    }
}
