//! Terminal colorization for tree dumps
//!
//! Applies ANSI escape codes to dump lines using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize a tree dump using ANSI escape codes
///
/// `leaves` holds one flag per dump line, in the same pre-order the
/// renderer writes them:
/// - Branch glyphs: Cyan
/// - Internal node keys: Yellow
/// - Leaf keys: Green
/// - Node ids: Dark grey
///
/// Lines without a flag are left untouched.
pub fn colorize_output(input: &str, leaves: &[bool]) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for (index, line) in input.lines().enumerate() {
        match leaves.get(index) {
            Some(&is_leaf) => result.push_str(&colorize_line(line, is_leaf)),
            None => result.push_str(line),
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

fn colorize_line(line: &str, is_leaf: bool) -> String {
    let split = label_start(line);
    let (prefix, label) = line.split_at(split);
    let (keys, id) = match label.rfind(" (") {
        Some(at) if label.ends_with(')') => label.split_at(at),
        _ => (label, ""),
    };

    let key_color = if is_leaf { Color::Green } else { Color::Yellow };
    let mut out = String::new();
    if !prefix.is_empty() {
        out.push_str(&format!("{}", prefix.with(Color::Cyan)));
    }
    out.push_str(&format!("{}", keys.with(key_color)));
    if !id.is_empty() {
        out.push_str(&format!("{}", id.with(Color::DarkGrey)));
    }
    out
}

/// Byte offset where the branch glyphs end
fn label_start(line: &str) -> usize {
    line.char_indices()
        .find(|(_, c)| !matches!(c, '│' | '├' | '└' | '─' | '|' | '+' | '`' | '-' | ' '))
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
