/*!
 * Export a deck and import it into a fresh one
 */

use anyhow::Result;
use vocabdeck::app_controller::ProgressOutput;
use crate::common;

/// Test that exported phrase cards re-import unchanged
#[tokio::test]
async fn test_export_thenImport_shouldReproduceUnexpandedCards() -> Result<()> {
    let source = common::create_test_controller()?;
    source
        .import_text(
            "Bună dimineața, doamnă!: Good morning, madam!\nmasă: table [noun, furniture]\nora: at 10:30",
            false,
            ProgressOutput::Silent,
        )
        .await?;

    let exported = source.export_text().await?;
    assert_eq!(
        exported,
        "Bună dimineața, doamnă!: Good morning, madam!\nmasă: table [noun, furniture]\nora: at 10:30\n"
    );

    let target = common::create_test_controller()?;
    let summary = target.import_text(&exported, false, ProgressOutput::Silent).await?;

    assert_eq!(summary.added_count, 3);
    assert_eq!(target.export_text().await?, exported);
    Ok(())
}

/// Test that re-importing an expanded export skips the variants already present
#[tokio::test]
async fn test_export_withExpandedCards_shouldSkipVariantsOnReimport() -> Result<()> {
    let controller = common::create_test_controller()?;
    controller
        .import_text("pe / peste: on / over", false, ProgressOutput::Silent)
        .await?;

    let exported = controller.export_text().await?;
    let summary = controller.import_text(&exported, false, ProgressOutput::Silent).await?;

    // each exported line expands again; every resulting card already exists
    assert_eq!(summary.total_parsed, 5);
    assert_eq!(summary.added_count, 0);
    assert_eq!(summary.skipped_count, 5);
    Ok(())
}

/// Test that exporting into a directory picks a timestamped file
#[tokio::test]
async fn test_export_to_file_withDirectory_shouldGenerateName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::create_test_controller()?;
    controller.import_text("masă: table", false, ProgressOutput::Silent).await?;

    let written = controller.export_to_file(temp_dir.path()).await?;

    assert!(written.starts_with(temp_dir.path()));
    assert_eq!(std::fs::read_to_string(&written)?, "masă: table\n");
    Ok(())
}

/// Test that an empty deck exports as empty text
#[test]
fn test_export_withEmptyDeck_shouldBeEmpty() -> Result<()> {
    let controller = common::create_test_controller()?;

    let exported = tokio_test::block_on(controller.export_text())?;

    assert_eq!(exported, "");
    Ok(())
}
