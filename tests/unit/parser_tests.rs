/*!
 * Tests for the bulk text parser through its public API
 */

use vocabdeck::parser::{format_card_line, parse_bulk_text, BulkParser, Card};
use crate::common;

fn card(foreign: &str, translation: &str, tags: &[&str]) -> Card {
    Card::new(
        foreign.to_string(),
        translation.to_string(),
        tags.iter().map(|t| t.to_string()).collect(),
    )
}

fn foreign_texts(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.foreign_text.as_str()).collect()
}

/// Test that a mixed lesson keeps only entry lines, in order
#[test]
fn test_parseBulkText_withSampleLesson_shouldKeepEntriesInOrder() {
    let cards = parse_bulk_text(common::SAMPLE_LESSON);

    assert_eq!(
        foreign_texts(&cards),
        vec![
            "Bună dimineața, doamnă!",
            "doamnă, doamne",
            "doamnă",
            "doamne",
            "pe / peste",
            "pe",
            "peste",
            "masă",
        ]
    );
    assert_eq!(cards[1].tags, vec!["people"]);
    assert_eq!(cards[3].translation_text, "madam / lady");
    assert_eq!(cards[7], card("masă", "table", &["noun", "furniture"]));
}

/// Test that only the first colon splits the line
#[test]
fn test_parseBulkText_withColonInTranslation_shouldSplitOnFirstOnly() {
    assert_eq!(
        parse_bulk_text("ora: at 10:30"),
        vec![card("ora", "at 10:30", &[])]
    );
}

/// Test that CRLF input parses like LF input
#[test]
fn test_parseBulkText_withCrlf_shouldParseAllLines() {
    let cards = parse_bulk_text("masă: table\r\nscaun: chair\r\n");

    assert_eq!(
        cards,
        vec![card("masă", "table", &[]), card("scaun", "chair", &[])]
    );
}

/// Test that parentheses after the colon do not make a header
#[test]
fn test_parseBulkText_withParenthesesAfterColon_shouldKeepLine() {
    assert_eq!(
        parse_bulk_text("Lecție: (intro)"),
        vec![card("Lecție", "(intro)", &[])]
    );
    assert!(parse_bulk_text("Lecția 2 (verbe): notes").is_empty());
}

/// Test that a stray closing parenthesis before the colon is not a header
#[test]
fn test_parseBulkText_withStrayCloseParenthesis_shouldKeepLine() {
    assert_eq!(
        parse_bulk_text("a) unu: one (1)"),
        vec![card("a) unu", "one (1)", &[])]
    );
}

/// Test that stripped length decides, while the stored text keeps punctuation
#[test]
fn test_parseBulkText_withTerminalPunctuation_shouldCheckStrippedLength() {
    assert_eq!(parse_bulk_text("da!: yes"), vec![card("da!", "yes", &[])]);
    assert!(parse_bulk_text("a!: yes").is_empty());
    assert!(parse_bulk_text("bine: a.").is_empty());
}

/// Test that lengths count characters rather than bytes
#[test]
fn test_parseBulkText_withDiacritics_shouldCountCharacters() {
    assert_eq!(parse_bulk_text("ță: ok"), vec![card("ță", "ok", &[])]);
    assert!(parse_bulk_text("ț: ok").is_empty());
}

/// Test that slash expansion wins over a separating comma
#[test]
fn test_parseBulkText_withSlashAndComma_shouldExpandBySlashOnly() {
    let cards = parse_bulk_text("pe, peste / sub: on, over / under");

    assert_eq!(foreign_texts(&cards), vec!["pe, peste / sub", "pe, peste", "sub"]);
    assert!(cards.iter().all(|c| c.translation_text == "on, over / under"));
}

/// Test that spaced three-item lists count as too many words
#[test]
fn test_parseBulkText_withSpacedWordList_shouldNotExpand() {
    assert_eq!(parse_bulk_text("roșu, verde, albastru: colors").len(), 1);
}

/// Test that an unspaced list of single words expands
#[test]
fn test_parseBulkText_withCompactWordList_shouldExpand() {
    let cards = parse_bulk_text("roșu,verde,albastru: colors");

    assert_eq!(
        foreign_texts(&cards),
        vec!["roșu,verde,albastru", "roșu", "verde", "albastru"]
    );
}

/// Test that a phrase pattern blocks expansion of a lowercase pair
#[test]
fn test_parseBulkText_withPhrasePattern_shouldNotExpand() {
    assert_eq!(
        parse_bulk_text("salut, ana: hi ana"),
        vec![card("salut, ana", "hi ana", &[])]
    );
}

/// Test that an empty phrase table lets the same pair expand
#[test]
fn test_bulkParser_withoutPhrasePatterns_shouldExpandGreeting() {
    let parser = BulkParser::with_phrase_patterns(Vec::<String>::new());

    let cards = parser.parse("salut, ana: hi ana");

    assert_eq!(foreign_texts(&cards), vec!["salut, ana", "salut", "ana"]);
}

/// Test that too-short comma variants are dropped but the full card stays
#[test]
fn test_parseBulkText_withShortVariant_shouldDropOnlyVariant() {
    let cards = parse_bulk_text("eu, a: me / a");

    assert_eq!(foreign_texts(&cards), vec!["eu, a", "eu"]);
}

/// Test that a misplaced bracket pair is not treated as tags
#[test]
fn test_parseBulkText_withReversedBrackets_shouldKeepTranslation() {
    assert_eq!(
        parse_bulk_text("pisică: cat ]x["),
        vec![card("pisică", "cat ]x[", &[])]
    );
}

/// Test that repeated tags survive parsing (the store dedups them)
#[test]
fn test_parseBulkText_withRepeatedTags_shouldKeepDuplicates() {
    let cards = parse_bulk_text("câine: dog [Pet, pet, , animal]");

    assert_eq!(cards[0].tags, vec!["pet", "pet", "animal"]);
}

/// Test that formatting then re-parsing an unexpanded card is stable
#[test]
fn test_formatCardLine_thenParse_shouldYieldSameCard() {
    let lines = [
        "cat: cat [animal, pet]",
        "Bună dimineața, doamnă!: Good morning, madam!",
        "ora: at 10:30",
    ];

    for line in lines {
        let cards = parse_bulk_text(line);
        assert_eq!(cards.len(), 1, "line should not expand: {}", line);

        let reparsed = parse_bulk_text(&format_card_line(&cards[0]));
        assert_eq!(reparsed, cards);
    }
}

/// Test that every expanded line starts with its full card
#[test]
fn test_parseBulkText_withExpandedLines_shouldLeadWithFullCard() {
    for line in ["doamnă, doamne: madam / lady", "pe / peste: on / over", "roșu,verde: red"] {
        let cards = parse_bulk_text(line);
        let (foreign, _) = line.split_once(':').unwrap();

        assert!(cards.len() > 1);
        assert_eq!(cards[0].foreign_text, foreign.trim());
    }
}

/// Test that cards serialize with snake_case field names
#[test]
fn test_card_serialize_shouldUseSnakeCaseFields() {
    let json = serde_json::to_value(card("masă", "table", &["noun"])).unwrap();

    assert_eq!(json["foreign_text"], "masă");
    assert_eq!(json["translation_text"], "table");
    assert_eq!(json["tags"][0], "noun");
}
