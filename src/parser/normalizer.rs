/*!
 * Punctuation-stripped working copies of an entry.
 *
 * Stripped text drives the length check, the comma classifier and the comma
 * split. Cards always carry the unstripped text.
 */

use log::trace;

use super::MIN_TEXT_LENGTH;

/// Trailing characters removed from the working copy
const TERMINAL_PUNCTUATION: [char; 3] = ['!', '?', '.'];

/// An entry that passed the minimum length check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    /// Foreign text as written (punctuation intact)
    pub foreign_original: String,
    /// Foreign text without trailing `!?.`
    pub foreign_stripped: String,
    /// Translation as written, tag annotation already removed
    pub translation_original: String,
    /// Tags extracted from the translation
    pub tags: Vec<String>,
}

/// Remove every trailing `!`, `?` and `.`
pub fn strip_terminal_punctuation(text: &str) -> &str {
    text.trim_end_matches(TERMINAL_PUNCTUATION)
}

/// Length in characters, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Build the working copies, dropping the entry if either stripped side is too short
pub fn normalize(foreign: &str, translation: &str, tags: Vec<String>) -> Option<NormalizedEntry> {
    let foreign_stripped = strip_terminal_punctuation(foreign);
    let translation_stripped = strip_terminal_punctuation(translation);

    if char_len(foreign_stripped) < MIN_TEXT_LENGTH
        || char_len(translation_stripped) < MIN_TEXT_LENGTH
    {
        trace!("Dropping short entry {:?}: {:?}", foreign, translation);
        return None;
    }

    Some(NormalizedEntry {
        foreign_original: foreign.to_string(),
        foreign_stripped: foreign_stripped.to_string(),
        translation_original: translation.to_string(),
        tags,
    })
}
