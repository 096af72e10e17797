use crate::infrastructure::repositories::ArtifactRepository;
use chrono::Duration;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Periodically delete artifacts older than `window`.
///
/// The first sweep runs immediately. The task runs until aborted.
pub fn spawn_reclaim_task(
    artifact_repo: Arc<dyn ArtifactRepository>,
    window: Duration,
    every: std::time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = every.as_secs(),
            retention_hours = window.num_hours(),
            "Artifact reclaim task started"
        );

        loop {
            ticker.tick().await;
            let report = artifact_repo.reclaim(window).await;
            if report.removed > 0 || report.failed > 0 {
                tracing::info!(
                    removed = report.removed,
                    failed = report.failed,
                    scanned = report.scanned,
                    "Periodic artifact reclaim"
                );
            }
        }
    })
}
