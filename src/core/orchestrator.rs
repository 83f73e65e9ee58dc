//! Main orchestrator for the daily publishing pipeline.
//!
//! One run is strictly linear: select today's content, render the video,
//! compose the caption, publish, record the outcome. Failure containment
//! per stage:
//! - selection, generation, and configuration failures abort the run with
//!   no ledger entry
//! - a publish failure is captured as data and still reaches the ledger;
//!   the run is reported failed only after logging it
//! - a ledger write failure is fatal and unrecovered

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tokio::fs;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::adapters::{ArtifactGenerator, CaptionGenerator, Publisher};
use crate::calendar::CalendarStore;
use crate::config::{CredentialProvider, ResolvedConfig};
use crate::domain::{ContentDescriptor, LedgerEntry, PublishOutcome, RunReport};

use super::ledger::Ledger;
use super::stage::{Stage, StageError};

/// Caption side file name, overwritten each run
pub const CAPTION_FILE: &str = "latest_caption.txt";

const BANNER: &str = "============================================================";

/// Artifact file name for a date and content item
pub fn artifact_file_name(date: NaiveDate, descriptor: &ContentDescriptor) -> String {
    format!(
        "dailydose_{}_{}.mp4",
        date.format("%Y%m%d"),
        descriptor.title_slug()
    )
}

/// Main pipeline orchestrator.
///
/// Generic over its collaborators so tests drive the full pipeline with
/// stubs.
pub struct Orchestrator<G, C, P, K> {
    /// Video renderer
    renderer: G,

    /// Caption generator
    captioner: C,

    /// Platform publisher
    publisher: P,

    /// Publish credential source
    credentials: K,

    /// Calendar document path
    calendar_path: PathBuf,

    /// Output directory (artifacts + caption side file)
    output_dir: PathBuf,

    /// Execution ledger
    ledger: Ledger,
}

impl<G, C, P, K> Orchestrator<G, C, P, K>
where
    G: ArtifactGenerator,
    C: CaptionGenerator,
    P: Publisher,
    K: CredentialProvider,
{
    /// Create an orchestrator over the given collaborators
    pub fn new(config: &ResolvedConfig, renderer: G, captioner: C, publisher: P, credentials: K) -> Self {
        Self {
            renderer,
            captioner,
            publisher,
            credentials,
            calendar_path: config.calendar.clone(),
            output_dir: config.output_dir.clone(),
            ledger: Ledger::new(config.ledger_path.clone()),
        }
    }

    /// Run the pipeline for the current local date
    pub async fn run_today(&self) -> Result<RunReport, StageError> {
        self.run_for_date(Local::now().date_naive()).await
    }

    /// Run the pipeline for a specific date
    #[instrument(skip(self), fields(date = %date))]
    pub async fn run_for_date(&self, date: NaiveDate) -> Result<RunReport, StageError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        info!("{}", BANNER);
        info!(%run_id, "daily publishing run started");
        info!("{}", BANNER);

        let result = self.execute(run_id, date, started_at).await;

        // Completion banner, emitted on every exit path
        info!("{}", BANNER);
        match &result {
            Ok(report) if report.succeeded() => {
                info!(
                    %run_id,
                    url = report.outcome.url.as_deref().unwrap_or(""),
                    "run succeeded"
                );
            }
            Ok(report) => {
                error!(
                    %run_id,
                    error = report.outcome.error.as_deref().unwrap_or("unknown"),
                    "publish failed; outcome recorded"
                );
            }
            Err(e) => {
                error!(%run_id, stage = %e.stage(), error = %e, "run failed");
            }
        }
        info!("{}", BANNER);

        result
    }

    async fn execute(
        &self,
        run_id: Uuid,
        date: NaiveDate,
        started_at: DateTime<Utc>,
    ) -> Result<RunReport, StageError> {
        // Stage 1: select today's content
        let calendar = CalendarStore::load(&self.calendar_path).await?;
        let descriptor = calendar.select_for_date(date)?;
        info!(
            kind = %descriptor.kind,
            title = %descriptor.title,
            "today's content selected"
        );

        // Stage 2: render the video artifact
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            StageError::Generation {
                stage: Stage::Render,
                source: anyhow::Error::from(e).context("Failed to create output directory"),
            }
        })?;

        let desired_path = self.output_dir.join(artifact_file_name(date, &descriptor));
        let artifact = self
            .renderer
            .render(&descriptor, &desired_path)
            .await
            .map_err(|source| StageError::Generation {
                stage: Stage::Render,
                source,
            })?;
        info!(
            path = %artifact.path.display(),
            size_bytes = artifact.size_bytes,
            "video artifact ready"
        );

        // Stage 3: compose the caption and persist the side file
        let caption = self
            .captioner
            .compose(&descriptor)
            .await
            .map_err(|source| StageError::Generation {
                stage: Stage::Caption,
                source,
            })?;

        let caption_path = self.output_dir.join(CAPTION_FILE);
        fs::write(&caption_path, &caption).await.map_err(|e| {
            StageError::Generation {
                stage: Stage::Caption,
                source: anyhow::Error::from(e)
                    .context(format!("Failed to write caption file: {}", caption_path.display())),
            }
        })?;
        info!(chars = caption.chars().count(), "caption ready");

        // Stage 4: publish. Credentials are resolved before the publisher
        // is touched; a publisher failure is an outcome, not an abort.
        let credentials = self.credentials.publish_credentials()?;

        let outcome = match self
            .publisher
            .publish(&credentials, &artifact.path, &caption)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = format!("{e:#}");
                warn!(error = %message, "publisher call failed; recording failed outcome");
                PublishOutcome::failure(message)
            }
        };

        if outcome.success {
            info!(url = outcome.url.as_deref().unwrap_or(""), "published");
        } else {
            warn!(
                error = outcome.error.as_deref().unwrap_or("unknown"),
                "publish failed"
            );
        }

        // Stage 5: record the outcome
        let entry = LedgerEntry::from_run(date, &descriptor, &artifact.path, &outcome);
        self.ledger
            .append(entry)
            .await
            .map_err(|source| StageError::Persistence { source })?;
        info!(ledger = %self.ledger.path().display(), "run outcome recorded");

        Ok(RunReport {
            run_id,
            date,
            content_type: descriptor.kind,
            content_title: descriptor.title,
            artifact_path: artifact.path,
            outcome,
            started_at,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_name() {
        let descriptor = ContentDescriptor {
            kind: "quote".to_string(),
            title: "Morning Focus".to_string(),
            payload: serde_json::Map::new(),
        };
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

        assert_eq!(
            artifact_file_name(date, &descriptor),
            "dailydose_20260807_Morning_Focus.mp4"
        );
    }

    // Full pipeline runs with stub collaborators live in tests/pipeline.rs
}
