use crate::batch::{chapter_19, ApplyReport, UpdateBatch};
use crate::config::Config;
use crate::error::Result;
use crate::storage::ProjectDocument;
use crate::summary::Summary;

/// Load the document, apply `batch`, and write the document back.
///
/// Nothing is written unless every edit succeeds.
pub fn apply_batch(config: &Config, batch: &UpdateBatch) -> Result<(ApplyReport, Summary)> {
    let path = config.project_path();
    tracing::info!(path = %path.display(), unit = %batch.unit.id, "updating project document");

    let mut doc = ProjectDocument::open(path)?;
    let report = batch.apply(&mut doc)?;
    doc.save(path)?;

    let summary = Summary::from_document(&doc, &config.file_name())?;
    Ok((report, summary))
}

pub fn handle_apply(config: &Config) -> Result<()> {
    let batch = chapter_19()?;
    let (_report, summary) = apply_batch(config, &batch)?;

    for line in summary.render() {
        println!("{}", line);
    }

    Ok(())
}
