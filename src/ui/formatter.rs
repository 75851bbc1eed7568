//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use std::path::Path;

use crate::document::WriteKind;
use crate::warning::SyncWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a non-fatal warning to the user.
pub fn display_warning(warning: &SyncWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Display the rendered `info` block, indented under a heading.
///
/// # Arguments
/// * `heading` - Bold heading printed above the block
/// * `rendered` - YAML text of the `info:` entry
pub fn display_info_block(heading: &str, rendered: &str) {
    println!("\n\x1b[1m{}\x1b[0m", heading);
    for line in rendered.lines() {
        println!("  \x1b[36m{}\x1b[0m", line);
    }
}

/// Describe what a write did to the document at `path`.
pub fn describe_write(kind: WriteKind, path: &Path) -> String {
    match kind {
        WriteKind::Created => format!("Created {}", path.display()),
        WriteKind::Updated => format!("Updated info block in {}", path.display()),
        WriteKind::InfoInserted => format!("Added info block to {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_functions() {
        // Visual verification test - output is printed to stdout/stderr
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_warning(&SyncWarning::LocalIdentityUnavailable);
        display_info_block("Info", "info:\n  title: t\n");
    }

    #[test]
    fn test_describe_write() {
        let path = Path::new("api/openapi.yaml");
        assert_eq!(describe_write(WriteKind::Created, path), "Created api/openapi.yaml");
        assert!(describe_write(WriteKind::Updated, path).starts_with("Updated"));
        assert!(describe_write(WriteKind::InfoInserted, path).starts_with("Added"));
    }
}
