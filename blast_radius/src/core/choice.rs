//! Parsing of operator answers to the two interactive menus.
//!
//! Neither parser rejects input: anything that is not a valid menu number is
//! taken as a literal path.

use std::path::PathBuf;

use crate::core::types::{DirectoryChoice, EntryChoice};

/// Interpret an answer to the directory menu.
///
/// `1..=menu.len()` selects a preset. Empty input means the current directory.
pub fn parse_directory_choice(input: &str, menu: &[String]) -> DirectoryChoice {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DirectoryChoice::Custom(PathBuf::from("."));
    }
    match menu_index(trimmed, menu.len()) {
        Some(index) => DirectoryChoice::Preset(menu[index].clone()),
        None => DirectoryChoice::Custom(PathBuf::from(trimmed)),
    }
}

/// Interpret an answer to the numbered candidate list of length `count`.
pub fn parse_entry_choice(input: &str, count: usize) -> EntryChoice {
    let trimmed = input.trim();
    match menu_index(trimmed, count) {
        Some(index) => EntryChoice::Listed(index),
        None => EntryChoice::Literal(PathBuf::from(trimmed)),
    }
}

/// Map a 1-based answer to a 0-based index, if it is in range.
fn menu_index(answer: &str, len: usize) -> Option<usize> {
    let number: usize = answer.parse().ok()?;
    (1..=len).contains(&number).then(|| number - 1)
}
