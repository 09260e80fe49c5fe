/*!
 * Line filtering for pasted vocabulary text.
 *
 * Splits raw input into candidate entry lines. Blank lines, lines without a
 * separator and section headers such as "(Greetings)" are dropped silently.
 */

use log::trace;

/// Separator between the foreign side and the translation side
pub const PAIR_SEPARATOR: char = ':';

/// Why a line was rejected by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    /// Nothing left after trimming
    Empty,
    /// No `:` anywhere in the line
    MissingSeparator,
    /// Parenthesised title with no separator ahead of it
    SectionHeader,
}

/// Classify a single trimmed line; `None` means the line is kept
pub fn check_line(line: &str) -> Option<LineRejection> {
    if line.is_empty() {
        return Some(LineRejection::Empty);
    }

    let Some(separator_pos) = line.find(PAIR_SEPARATOR) else {
        return Some(LineRejection::MissingSeparator);
    };

    if is_section_header(line, separator_pos) {
        return Some(LineRejection::SectionHeader);
    }

    None
}

/// A line holding a `(...)` pair counts as a header unless the separator
/// comes before the opening parenthesis. The pair is the first `(` and the
/// first `)` after it; a stray `)` on its own does not open one.
fn is_section_header(line: &str, separator_pos: usize) -> bool {
    let Some(open) = line.find('(') else {
        return false;
    };

    line[open..].contains(')') && separator_pos > open
}

/// Iterate over the surviving, trimmed lines of `text` in input order
pub fn filter_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| match check_line(line) {
        None => true,
        Some(reason) => {
            if reason != LineRejection::Empty {
                trace!("Dropping line {:?}: {:?}", line, reason);
            }
            false
        }
    })
}
