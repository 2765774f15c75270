//! Interactive collaborator for tag editing.

use crate::error::{Error, Result};
use dialoguer::{Input, MultiSelect};

/// What the tag editor needs from a user: pick several options and type a
/// line of text. Either may fail (the user aborts), which ends the edit.
pub trait TagPrompter {
    /// Returns the chosen subset of `options`, as strings from `options`.
    fn select_multiple(
        &mut self,
        prompt: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>>;

    fn input_text(&mut self, prompt: &str) -> Result<String>;

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TagPrompter for TerminalPrompter {
    fn select_multiple(
        &mut self,
        prompt: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>> {
        let checked: Vec<bool> =
            options.iter().map(|o| defaults.contains(o)).collect();
        let picked = MultiSelect::new()
            .with_prompt(prompt)
            .items(options)
            .defaults(&checked)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))?;
        Ok(picked.into_iter().map(|i| options[i].clone()).collect())
    }

    fn input_text(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| Error::Prompt(e.to_string()))
    }
}
