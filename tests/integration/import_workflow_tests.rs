/*!
 * End-to-end import workflow through the controller
 */

use anyhow::Result;
use vocabdeck::app_controller::{Controller, ProgressOutput};
use vocabdeck::database::{CardQuery, CardUpdate, SortField, SortOrder};
use vocabdeck::errors::{CardError, ImportError};
use crate::common;

/// Test that importing a lesson stores every parsed card
#[tokio::test]
async fn test_import_withSampleLesson_shouldStoreAllCards() -> Result<()> {
    let controller = common::create_test_controller()?;

    let summary = controller
        .import_text(common::SAMPLE_LESSON, false, ProgressOutput::Silent)
        .await?;

    assert_eq!(summary.total_parsed, 8);
    assert_eq!(summary.added_count, 8);
    assert_eq!(summary.failed_count, 0);
    assert_eq!(controller.stats()?.card_count, 8);
    Ok(())
}

/// Test that a second import of the same lesson skips everything
#[tokio::test]
async fn test_import_twice_shouldSkipDuplicates() -> Result<()> {
    let controller = common::create_test_controller()?;
    controller
        .import_text(common::SAMPLE_LESSON, false, ProgressOutput::Silent)
        .await?;

    let summary = controller
        .import_text(common::SAMPLE_LESSON, false, ProgressOutput::Silent)
        .await?;

    assert_eq!(summary.added_count, 0);
    assert_eq!(summary.skipped_count, 8);
    assert_eq!(controller.stats()?.card_count, 8);
    Ok(())
}

/// Test that allowing duplicates stores the lesson again
#[tokio::test]
async fn test_import_withAllowDuplicates_shouldStoreAgain() -> Result<()> {
    let controller = common::create_test_controller()?;
    controller.import_text("masă: table", false, ProgressOutput::Silent).await?;

    let summary = controller.import_text("masă: desk", true, ProgressOutput::Silent).await?;

    assert_eq!(summary.added_count, 1);
    assert_eq!(controller.stats()?.card_count, 2);
    Ok(())
}

/// Test that text without pairs surfaces NoValidPairs
#[tokio::test]
async fn test_import_withoutPairs_shouldReportNoValidPairs() -> Result<()> {
    let controller = common::create_test_controller()?;

    let error = controller
        .import_text("(Greetings)\njust notes\n", false, ProgressOutput::Silent)
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<ImportError>(),
        Some(ImportError::NoValidPairs)
    ));
    Ok(())
}

/// Test that a file import persists across controller instances
#[tokio::test]
async fn test_run_import_withFileDatabase_shouldPersist() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lesson = common::create_test_file(temp_dir.path(), "lesson.txt", common::SAMPLE_LESSON)?;

    {
        let controller = common::create_file_controller(temp_dir.path())?;
        controller
            .run_import(&lesson.to_string_lossy(), false, ProgressOutput::Silent)
            .await?;
    }

    let controller = common::create_file_controller(temp_dir.path())?;
    let stats = controller.stats()?;

    assert_eq!(stats.card_count, 8);
    assert_eq!(stats.tag_count, 4);
    assert!(stats.file_size_bytes > 0);
    Ok(())
}

/// Test listing, filtering, updating and deleting imported cards
#[tokio::test]
async fn test_cardLifecycle_afterImport_shouldSupportCrud() -> Result<()> {
    let controller = common::create_test_controller()?;
    controller
        .import_text(common::SAMPLE_LESSON, false, ProgressOutput::Silent)
        .await?;

    let by_tag = controller
        .list_cards(&CardQuery {
            tag: Some("preposition".to_string()),
            sort: SortField::ForeignText,
            order: SortOrder::Ascending,
            ..controller.default_query()
        })
        .await?;
    let foreign: Vec<&str> = by_tag.cards.iter().map(|c| c.foreign_text.as_str()).collect();
    assert_eq!(foreign, vec!["pe", "pe / peste", "peste"]);

    let target = by_tag.cards[0].id.clone();
    let updated = controller
        .update_card(
            &target,
            &CardUpdate {
                tags: Some(vec!["preposition".to_string(), "short".to_string()]),
                ..CardUpdate::default()
            },
        )
        .await?;
    assert_eq!(updated.tags, vec!["preposition", "short"]);

    controller.delete_card(&target).await?;
    let missing = controller
        .update_card(
            &target,
            &CardUpdate {
                foreign_text: Some("pe".to_string()),
                ..CardUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        missing.downcast_ref::<CardError>(),
        Some(CardError::NotFound(_))
    ));

    let tags = controller.list_tags().await?;
    let short = tags.iter().find(|t| t.tag == "short");
    assert!(short.is_none());
    Ok(())
}

/// Test that the parse dry run renders JSON and stores nothing
#[test]
fn test_parse_input_shouldRenderJsonWithoutDatabase() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lesson = common::create_test_file(temp_dir.path(), "lesson.txt", "masă: table [noun]")?;

    let json = Controller::parse_input(&vocabdeck::Config::default(), &lesson.to_string_lossy())?;
    let cards: Vec<vocabdeck::Card> = serde_json::from_str(&json)?;

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].tags, vec!["noun"]);
    assert!(!temp_dir.path().join("deck.db").exists());
    Ok(())
}
