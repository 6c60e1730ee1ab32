/// Repair pass — sentence-initial capitals and terminal periods.

use log::info;
use std::path::Path;

use crate::core::walker::TERMINALS;

/// Capitalize every line and make sure it ends in terminal punctuation.
///
/// Capitalization follows the usual "capitalize" rule: the first character
/// is upper-cased and every other character lower-cased. Lines that do not
/// already end in `.`, `!` or `?` get a `.` appended. Empty lines stay empty.
pub fn fix_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(&capitalize(line));
            if !line.ends_with(TERMINALS) {
                out.push('.');
            }
        }
        out.push('\n');
    }
    out
}

fn capitalize(line: &str) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Apply [`fix_text`] to `input`, writing the result to `output`.
///
/// `input` and `output` may be the same path.
pub fn fix_file(input: &Path, output: &Path) -> std::io::Result<()> {
    let bytes = std::fs::read(input)?;
    let fixed = fix_text(&String::from_utf8_lossy(&bytes));
    std::fs::write(output, &fixed)?;
    info!(
        "fixed {} -> {} ({} lines)",
        input.display(),
        output.display(),
        fixed.lines().count()
    );
    Ok(())
}
