//! Text-level editing of top-level YAML mapping entries.
//!
//! A top-level entry starts at a column-0 `key:` line and runs over every
//! following indented, blank or comment line up to the next column-0 token.
//! Trailing blank lines and column-0 comments are left to whatever follows.
//! Only the bytes of the located entry are ever touched.

use std::ops::Range;

/// Locate the top-level entry for `key` in block-style YAML `source`.
pub fn find_top_level_entry(source: &str, key: &str) -> Option<Range<usize>> {
    let lines = lines_with_offsets(source);
    let start_index = lines
        .iter()
        .position(|(_, line)| is_key_line(line, key))?;

    let mut end_index = start_index + 1;
    while end_index < lines.len() && is_continuation(lines[end_index].1) {
        end_index += 1;
    }

    // hand trailing blank lines and column-0 comments back to the next entry
    while end_index > start_index + 1 && is_detached(lines[end_index - 1].1) {
        end_index -= 1;
    }

    let start = lines[start_index].0;
    let end = lines
        .get(end_index)
        .map(|(offset, _)| *offset)
        .unwrap_or(source.len());
    Some(start..end)
}

/// Replace the top-level entry for `key` with `rendered`.
///
/// Returns `None` when `source` has no such entry.
pub fn replace_top_level_entry(source: &str, key: &str, rendered: &str) -> Option<String> {
    let range = find_top_level_entry(source, key)?;
    let mut replacement = match_line_endings(source, rendered);

    if range.end == source.len() && !source.ends_with('\n') {
        let trimmed = replacement.trim_end_matches(['\r', '\n']).len();
        replacement.truncate(trimmed);
    }

    let mut output = String::with_capacity(source.len() + replacement.len());
    output.push_str(&source[..range.start]);
    output.push_str(&replacement);
    output.push_str(&source[range.end..]);
    Some(output)
}

/// Insert `rendered` right after the top-level entry for `after_key`, or at
/// the end of `source` when there is no such entry.
pub fn insert_top_level_entry(source: &str, after_key: &str, rendered: &str) -> String {
    let replacement = match_line_endings(source, rendered);
    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let at = find_top_level_entry(source, after_key)
        .map(|range| range.end)
        .unwrap_or(source.len());

    let mut output = String::with_capacity(source.len() + replacement.len() + 1);
    output.push_str(&source[..at]);
    if at > 0 && !output.ends_with('\n') {
        output.push_str(newline);
    }
    output.push_str(&replacement);
    output.push_str(&source[at..]);
    output
}

/// Whether `source` is a flow-style (JSON-like) document at its root.
pub fn is_flow_document(source: &str) -> bool {
    source
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && *line != "---")
        .is_some_and(|line| line.starts_with('{'))
}

fn lines_with_offsets(source: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line)
        })
        .collect()
}

fn is_key_line(line: &str, key: &str) -> bool {
    let rest = [format!("{}:", key), format!("\"{}\":", key), format!("'{}':", key)]
        .into_iter()
        .find_map(|prefix| line.strip_prefix(prefix.as_str()).map(str::to_string));

    match rest {
        Some(rest) => rest.chars().next().map_or(true, char::is_whitespace),
        None => false,
    }
}

fn is_continuation(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with([' ', '\t']) || line.starts_with('#')
}

fn is_detached(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

fn match_line_endings(source: &str, rendered: &str) -> String {
    if source.contains("\r\n") {
        rendered.replace("\r\n", "\n").replace('\n', "\r\n")
    } else {
        rendered.to_string()
    }
}
