/*!
 * Bulk vocabulary parser.
 *
 * Turns pasted "foreign: translation" text into flashcards. The pipeline is
 * pure and synchronous:
 *
 * - `line_filter`: drops blank lines, headers and lines without `:`
 * - `pair_splitter`: splits on the first `:`
 * - `tags`: extracts the trailing `[tag, ...]` annotation
 * - `normalizer`: builds punctuation-stripped working copies and length-checks them
 * - `comma_classifier`: decides whether commas list alternatives
 * - `expander`: emits the full card followed by slash or comma variants
 */

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub mod comma_classifier;
pub mod expander;
pub mod line_filter;
pub mod normalizer;
pub mod pair_splitter;
pub mod tags;

pub use comma_classifier::{CommaClassifier, CommaRole, DEFAULT_PHRASE_PATTERNS};
pub use expander::Expansion;

/// Minimum length, in characters, of either side and of each variant
pub const MIN_TEXT_LENGTH: usize = 2;

static DEFAULT_PARSER: Lazy<BulkParser> = Lazy::new(BulkParser::default);

/// A single flashcard produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// The term being learned
    pub foreign_text: String,
    /// Its translation, bracket annotation removed
    pub translation_text: String,
    /// Normalized tags in annotation order
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Card {
    pub fn new(foreign_text: String, translation_text: String, tags: Vec<String>) -> Self {
        Self {
            foreign_text,
            translation_text,
            tags,
        }
    }
}

/// Both sides of an entry line, trimmed but otherwise as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub foreign_text: String,
    pub translation_text: String,
}

/// Parser over the bulk text syntax with a configurable phrase table
#[derive(Debug, Clone, Default)]
pub struct BulkParser {
    classifier: CommaClassifier,
}

impl BulkParser {
    /// Create a parser that uses the given comma classifier
    pub fn new(classifier: CommaClassifier) -> Self {
        Self { classifier }
    }

    /// Create a parser from a list of phrase patterns
    pub fn with_phrase_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(CommaClassifier::with_patterns(patterns))
    }

    pub fn classifier(&self) -> &CommaClassifier {
        &self.classifier
    }

    /// Parse bulk text into cards, in input order
    pub fn parse(&self, text: &str) -> Vec<Card> {
        line_filter::filter_lines(text)
            .flat_map(|line| self.parse_line(line))
            .collect()
    }

    /// Cards for a single line; empty when the line is rejected
    pub fn parse_line(&self, line: &str) -> Vec<Card> {
        let Some(pair) = pair_splitter::split_pair(line) else {
            return Vec::new();
        };

        let tagged = tags::extract_tags(&pair.translation_text);

        match normalizer::normalize(&pair.foreign_text, &tagged.text, tagged.tags) {
            Some(entry) => expander::expand(&entry, &self.classifier),
            None => Vec::new(),
        }
    }
}

/// Parse bulk text with the default Romanian phrase table
pub fn parse_bulk_text(text: &str) -> Vec<Card> {
    DEFAULT_PARSER.parse(text)
}

/// Render a card back into bulk syntax: `foreign: translation [tag, ...]`
pub fn format_card_line(card: &Card) -> String {
    let mut line = format!("{}: {}", card.foreign_text, card.translation_text);

    if !card.tags.is_empty() {
        line.push_str(&format!(" [{}]", card.tags.join(", ")));
    }

    line
}
