/*!
 * Splits an entry line into its foreign and translation halves.
 */

use super::line_filter::PAIR_SEPARATOR;
use super::RawPair;

/// Split on the first `:` only; both trimmed sides must be non-empty
pub fn split_pair(line: &str) -> Option<RawPair> {
    let (foreign, translation) = line.split_once(PAIR_SEPARATOR)?;

    let foreign = foreign.trim();
    let translation = translation.trim();

    if foreign.is_empty() || translation.is_empty() {
        return None;
    }

    Some(RawPair {
        foreign_text: foreign.to_string(),
        translation_text: translation.to_string(),
    })
}
