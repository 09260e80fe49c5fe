/*!
 * Comma disambiguation for the foreign side of an entry.
 *
 * The same comma separates alternative words ("doamnă, doamne") and
 * punctuates phrases ("Bună, Maria"). The classifier runs an ordered list of
 * rules and stops at the first one that decides; anything undecided is a
 * phrase.
 *
 * Rule order:
 * 1. sentence punctuation anywhere in the original text: phrase
 * 2. more than two whitespace-separated words: phrase
 * 3. a known conversational fragment: phrase
 * 4. exactly two comma parts: list only if the second part is not
 *    capitalised and both parts are single words
 * 5. three or more comma parts, each a single word: list
 */

use log::trace;

/// Conversational fragments that mark a comma as phrase punctuation.
///
/// Matched as substrings of the lowercased text. The table is data: swap it
/// through `ParserConfig::phrase_patterns` for another language.
pub const DEFAULT_PHRASE_PATTERNS: &[&str] = &[
    "bună dimineața",
    "la revedere",
    "mulțumesc",
    "bună,",
    "salut,",
];

/// Characters in the original text that imply a sentence
const SENTENCE_PUNCTUATION: [char; 3] = ['!', '?', '.'];

/// Word limit for the whole foreign side
const MAX_WORDS: usize = 2;

/// Outcome of a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommaRole {
    /// Commas separate alternative vocabulary items
    Separating,
    /// Commas belong to a phrase
    Phrase,
}

/// Identifies the rule that decided a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierRule {
    SentencePunctuation,
    TooManyWords,
    PhrasePattern,
    TwoParts,
    WordList,
    Default,
}

/// A classification together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub role: CommaRole,
    pub rule: ClassifierRule,
}

/// Decides whether commas in a foreign text separate alternatives
#[derive(Debug, Clone)]
pub struct CommaClassifier {
    phrase_patterns: Vec<String>,
}

impl CommaClassifier {
    /// Create a classifier with the default Romanian phrase table
    pub fn new() -> Self {
        Self::with_patterns(DEFAULT_PHRASE_PATTERNS.iter().map(|p| p.to_string()))
    }

    /// Create a classifier with a custom phrase table
    pub fn with_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrase_patterns = patterns
            .into_iter()
            .map(|p| p.into().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        Self { phrase_patterns }
    }

    /// The active phrase table
    pub fn phrase_patterns(&self) -> &[String] {
        &self.phrase_patterns
    }

    /// `true` when commas in `stripped` separate alternative items.
    ///
    /// `original` is the foreign text before punctuation stripping.
    pub fn is_separating(&self, original: &str, stripped: &str) -> bool {
        self.classify(original, stripped).role == CommaRole::Separating
    }

    /// Run the rules in order and report which one decided
    pub fn classify(&self, original: &str, stripped: &str) -> Classification {
        let decided = Self::check_sentence_punctuation(original)
            .map(|role| (role, ClassifierRule::SentencePunctuation))
            .or_else(|| {
                Self::check_word_count(stripped).map(|role| (role, ClassifierRule::TooManyWords))
            })
            .or_else(|| {
                self.check_phrase_patterns(stripped)
                    .map(|role| (role, ClassifierRule::PhrasePattern))
            })
            .or_else(|| Self::check_two_parts(stripped).map(|role| (role, ClassifierRule::TwoParts)))
            .or_else(|| Self::check_word_list(stripped).map(|role| (role, ClassifierRule::WordList)));

        let (role, rule) = decided.unwrap_or((CommaRole::Phrase, ClassifierRule::Default));
        trace!("Comma classification for {:?}: {:?} ({:?})", stripped, role, rule);

        Classification { role, rule }
    }

    fn check_sentence_punctuation(original: &str) -> Option<CommaRole> {
        original
            .contains(SENTENCE_PUNCTUATION)
            .then_some(CommaRole::Phrase)
    }

    fn check_word_count(text: &str) -> Option<CommaRole> {
        (word_count(text) > MAX_WORDS).then_some(CommaRole::Phrase)
    }

    fn check_phrase_patterns(&self, text: &str) -> Option<CommaRole> {
        let lowered = text.to_lowercase();

        self.phrase_patterns
            .iter()
            .any(|pattern| lowered.contains(pattern.as_str()))
            .then_some(CommaRole::Phrase)
    }

    fn check_two_parts(text: &str) -> Option<CommaRole> {
        let parts = comma_parts(text);
        if parts.len() != 2 {
            return None;
        }

        // "Salut, Ana": a greeting followed by a name
        let capitalised = parts[1].chars().next().is_some_and(char::is_uppercase);
        if capitalised {
            return Some(CommaRole::Phrase);
        }

        if parts.iter().all(|part| word_count(part) <= 1) {
            Some(CommaRole::Separating)
        } else {
            Some(CommaRole::Phrase)
        }
    }

    fn check_word_list(text: &str) -> Option<CommaRole> {
        let parts = comma_parts(text);

        (parts.len() >= 3 && parts.iter().all(|part| word_count(part) == 1))
            .then_some(CommaRole::Separating)
    }
}

impl Default for CommaClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Whitespace-delimited word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn comma_parts(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).collect()
}
