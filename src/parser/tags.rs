/*!
 * Bracket tag annotations on the translation side.
 *
 * `cat [animal, Pet]` becomes the translation `cat` with tags
 * `["animal", "pet"]`. Duplicates are kept here; the store dedups them.
 */

/// Translation text with its bracket annotation removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedText {
    /// Translation with the bracketed part cut out, trimmed
    pub text: String,
    /// Lowercased, trimmed, non-empty tags in source order
    pub tags: Vec<String>,
}

/// Pull the last `[...]` group out of `translation`.
///
/// Without a `[` that precedes the last `]`, the text is returned unchanged
/// and the tag list is empty.
pub fn extract_tags(translation: &str) -> TaggedText {
    let bracket = translation
        .rfind('[')
        .zip(translation.rfind(']'))
        .filter(|(open, close)| open < close);

    let Some((open, close)) = bracket else {
        return TaggedText {
            text: translation.to_string(),
            tags: Vec::new(),
        };
    };

    let tags = parse_tag_list(&translation[open + 1..close]);

    let mut text = String::with_capacity(translation.len());
    text.push_str(&translation[..open]);
    text.push_str(&translation[close + 1..]);

    TaggedText {
        text: text.trim().to_string(),
        tags,
    }
}

/// Split a comma-separated tag list into normalized tags
pub fn parse_tag_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}
