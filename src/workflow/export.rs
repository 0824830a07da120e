use crate::api::{ApiClient, CombinationSet, ExportFormat};
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported,
    /// No result set was available; no request was sent.
    Skipped,
}

/// Fire a single export request for the current result set.
///
/// Runs outside the generate/interaction pipeline and never mutates the
/// result cycle; a failed export leaves a successful result view intact.
#[tracing::instrument(
    name = "export",
    skip(client, combinations),
    fields(export.format = format.as_str())
)]
pub async fn export_as(
    client: &dyn ApiClient,
    format: ExportFormat,
    combinations: Option<&CombinationSet>,
) -> AppResult<ExportOutcome> {
    let Some(set) = combinations else {
        tracing::debug!("no result set to export");
        return Ok(ExportOutcome::Skipped);
    };

    client.export(format, set).await?;
    tracing::info!("export complete");
    Ok(ExportOutcome::Exported)
}
