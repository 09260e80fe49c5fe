/*!
 * Variant expansion: one entry line in, one or more cards out.
 *
 * Precedence is slash, then separating comma, then nothing. The unexpanded
 * card is always emitted first.
 */

use log::debug;

use super::comma_classifier::CommaClassifier;
use super::normalizer::{char_len, NormalizedEntry};
use super::{Card, MIN_TEXT_LENGTH};

/// Separator for alternative forms ("pe / peste")
pub const SLASH_SEPARATOR: char = '/';

/// Separator for alternative vocabulary items ("doamnă, doamne")
pub const COMMA_SEPARATOR: char = ',';

/// How an entry is expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Split the original foreign text on `/`
    Slash,
    /// Split the stripped foreign text on `,`
    Comma,
    /// Emit the entry as a single card
    None,
}

/// Pick the expansion for an entry
pub fn choose_expansion(entry: &NormalizedEntry, classifier: &CommaClassifier) -> Expansion {
    if entry.foreign_original.contains(SLASH_SEPARATOR) {
        return Expansion::Slash;
    }

    if entry.foreign_stripped.contains(COMMA_SEPARATOR)
        && classifier.is_separating(&entry.foreign_original, &entry.foreign_stripped)
    {
        return Expansion::Comma;
    }

    Expansion::None
}

/// Produce the cards for one entry
pub fn expand(entry: &NormalizedEntry, classifier: &CommaClassifier) -> Vec<Card> {
    let full = Card::new(
        entry.foreign_original.clone(),
        entry.translation_original.clone(),
        entry.tags.clone(),
    );

    let (source, separator) = match choose_expansion(entry, classifier) {
        Expansion::None => return vec![full],
        Expansion::Slash => (entry.foreign_original.as_str(), SLASH_SEPARATOR),
        Expansion::Comma => (entry.foreign_stripped.as_str(), COMMA_SEPARATOR),
    };

    let variants = alternatives(source, separator).map(|alternative| {
        Card::new(
            alternative.to_string(),
            entry.translation_original.clone(),
            entry.tags.clone(),
        )
    });

    let mut cards = vec![full];
    cards.extend(variants);

    debug!(
        "Expanded {:?} into {} cards on {:?}",
        entry.foreign_original,
        cards.len(),
        separator
    );

    cards
}

/// Trimmed pieces of `source` long enough to become cards, left to right
fn alternatives(source: &str, separator: char) -> impl Iterator<Item = &str> {
    source
        .split(separator)
        .map(str::trim)
        .filter(|piece| char_len(piece) >= MIN_TEXT_LENGTH)
}
