//! Choice lists for "select from existing" prompts.
//!
//! Labels are what the operator reads; values are what goes into the
//! statement. Lists are built from freshly fetched rows and keep store order.

use crate::store::{Department, Employee, Role};

/// Label shown for the "no manager" entry.
pub const NO_MANAGER: &str = "None";

#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

/// An ordered set of `(label, value)` pairs for single selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceList<T> {
    what: &'static str,
    choices: Vec<Choice<T>>,
}

impl<T> ChoiceList<T> {
    /// `what` names the entities listed, for error messages.
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            choices: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: T) {
        self.choices.push(Choice {
            label: label.into(),
            value,
        });
    }

    /// Put a synthetic entry ahead of the fetched ones.
    pub fn prepend(&mut self, label: impl Into<String>, value: T) {
        self.choices.insert(
            0,
            Choice {
                label: label.into(),
                value,
            },
        );
    }

    pub fn what(&self) -> &'static str {
        self.what
    }

    pub fn labels(&self) -> Vec<String> {
        self.choices.iter().map(|c| c.label.clone()).collect()
    }

    pub fn value(&self, index: usize) -> Option<&T> {
        self.choices.get(index).map(|c| &c.value)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

}

pub fn department_choices(departments: &[Department]) -> ChoiceList<i64> {
    let mut list = ChoiceList::new("departments");
    for dept in departments {
        list.push(dept.name.clone(), dept.id);
    }
    list
}

pub fn role_choices(roles: &[Role]) -> ChoiceList<i64> {
    let mut list = ChoiceList::new("roles");
    for role in roles {
        list.push(role.title.clone(), role.id);
    }
    list
}

pub fn employee_choices(employees: &[Employee]) -> ChoiceList<i64> {
    let mut list = ChoiceList::new("employees");
    for emp in employees {
        list.push(emp.full_name(), emp.id);
    }
    list
}

/// Every employee as a possible manager, led by a `None` entry.
pub fn manager_choices(employees: &[Employee]) -> ChoiceList<Option<i64>> {
    let mut list = ChoiceList::new("employees");
    for emp in employees {
        list.push(emp.full_name(), Some(emp.id));
    }
    list.prepend(NO_MANAGER, None);
    list
}
