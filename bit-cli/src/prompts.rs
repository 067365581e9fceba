//! # Prompts Module
//!
//! Interactive prompts and the dialoguer theme used to render them.

use anyhow::{Context, Result};
use console::Style;
use dialoguer::MultiSelect;
use dialoguer::theme::ColorfulTheme;

/// Returns a dialoguer theme matching bit's color palette.
pub fn bit_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

/// Asks the user to pick any number of items from a list
pub trait Selector {
  /// Returns the indices of the chosen items, in list order
  fn select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;
}

/// Checklist rendered on the terminal with dialoguer
pub struct Checklist;

impl Selector for Checklist {
  fn select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
    let mut picks = MultiSelect::with_theme(&bit_theme())
      .with_prompt(prompt)
      .items(items)
      .interact()
      .context("Failed to read selection")?;
    picks.sort_unstable();
    Ok(picks)
  }
}
