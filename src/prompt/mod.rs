//! Operator prompts.
//!
//! The session only talks to the terminal through [`Prompter`], so the
//! command loop can be driven by a script in tests.

pub mod choices;

use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::errors::{CmsError, Result};

pub use choices::{Choice, ChoiceList};

pub trait Prompter {
    /// Ask the operator to pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Ask for a line of free text. Empty answers are allowed.
    fn input(&mut self, prompt: &str) -> Result<String>;
}

/// Interactive prompts on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(selection)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

/// Present a choice list and return the value behind the chosen label.
pub fn choose<P, T>(prompter: &mut P, prompt: &str, list: &ChoiceList<T>) -> Result<T>
where
    P: Prompter + ?Sized,
    T: Clone,
{
    if list.is_empty() {
        return Err(CmsError::EmptyChoices { what: list.what() });
    }
    let index = prompter.select(prompt, &list.labels())?;
    list.value(index)
        .cloned()
        .ok_or(CmsError::SelectionOutOfRange {
            index,
            len: list.len(),
        })
}
