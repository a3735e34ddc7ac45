use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use state::export::{ExportFormat, ExportMeta, render};
use state::{DashboardData, DateRange, FetchOrchestrator, FetchState, StatsScope, fetch_dashboard};
use tracing::{error, info, trace};

use crate::api::ApiClient;

pub async fn export(
    client: &ApiClient,
    format: ExportFormat,
    range: DateRange,
    output: Option<&Path>,
) -> Result<()> {
    trace!("Entering export function");
    let document = build_export(client, format, range).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            info!("Wrote {} export to {}", format.label(), path.display());
        }
        None => print!("{}", document),
    }
    Ok(())
}

/// Runs the analytics fetch group for `range` and renders it.
pub async fn build_export(
    client: &ApiClient,
    format: ExportFormat,
    range: DateRange,
) -> Result<String> {
    info!("Exporting analytics for {} as {}", range, format.label());
    let mut group: FetchOrchestrator<DateRange, DashboardData> = FetchOrchestrator::new();
    let outcome = group
        .run(range, |range| fetch_dashboard(client, range, StatsScope::Range))
        .await;

    let data = match outcome {
        FetchState::Ready(data) => data,
        FetchState::Failed(e) => {
            error!("Export aborted: {}", e);
            return Err(e.clone().into());
        }
        FetchState::Loading => bail!("Analytics fetch did not complete"),
    };

    let meta = ExportMeta::new(Utc::now()).with_range(range);
    let document = render(format, &data.export_dataset()?, &meta)?;
    Ok(document)
}
