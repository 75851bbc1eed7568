//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use crate::domain::{InfoField, OverrideSelection};
use crate::error::{InfoSyncError, Result};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    describe_write, display_error, display_info_block, display_status, display_success,
    display_warning,
};

/// Prompts for a free-text value on the terminal.
///
/// Shows `default` in brackets; an empty answer accepts it.
///
/// # Returns
/// * `Ok(Some(String))` - The answer, or the default on empty input
/// * `Ok(None)` - Empty input and no default
pub fn prompt_input(message: &str, default: Option<&str>) -> Result<Option<String>> {
    let stdin = io::stdin();
    prompt_input_with(&mut stdin.lock(), &mut io::stdout(), message, default)
}

/// Prompts for the set of fields to override.
///
/// Lists every field with its default state and accepts a comma-separated
/// list of names. Empty input keeps `default`; `none` selects nothing.
pub fn prompt_overrides(default: &OverrideSelection) -> Result<OverrideSelection> {
    let stdin = io::stdin();
    prompt_overrides_with(&mut stdin.lock(), &mut io::stdout(), default)
}

pub(crate) fn prompt_input_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: Option<&str>,
) -> Result<Option<String>> {
    match default {
        Some(default) if !default.is_empty() => write!(output, "{} [{}]: ", message, default)?,
        _ => write!(output, "{}: ", message)?,
    }
    output.flush()?;

    let answer = read_answer(input)?;
    if answer.is_empty() {
        Ok(default.map(str::to_string))
    } else {
        Ok(Some(answer))
    }
}

pub(crate) fn prompt_overrides_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &OverrideSelection,
) -> Result<OverrideSelection> {
    writeln!(output, "\n\x1b[1mSelect the field names you wish to override:\x1b[0m")?;
    for field in InfoField::ALL {
        let mark = if default.contains(field) { "x" } else { " " };
        writeln!(output, "  [{}] {}", mark, field)?;
    }
    write!(output, "\nFields (comma-separated, 'none' for no overrides) [{}]: ", default)?;
    output.flush()?;

    let answer = read_answer(input)?;
    if answer.is_empty() {
        Ok(default.clone())
    } else {
        OverrideSelection::parse_list(&answer)
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(InfoSyncError::prompt("input closed before an answer was given"));
    }
    Ok(line.trim().to_string())
}
