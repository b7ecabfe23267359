//! Per-activity effort processing.
//!
//! Fetches an activity's streams, computes the effort for every reachable
//! target distance and hands the report to the store. Failures stay local to
//! the activity they happened in.

use std::sync::Arc;

use async_trait::async_trait;
use rayon::prelude::*;
use tracing::{Instrument, debug, error, info, warn};

use crate::{
    correlation::RunContext,
    effort_finder::{find_segment_extremes, is_reachable},
    errors::AppError,
    models::{EffortRecord, EffortReport, StoredEffortReport, TargetDistance},
    streams::{ActivityStreams, RawStreams, StreamPolicy},
};

/// Where activity streams come from.
#[async_trait]
pub trait StreamSource: Send + Sync {
    /// Returns `None` when the activity or either of its streams is missing.
    async fn get_time_distance_streams(
        &self,
        activity_id: i64,
    ) -> Result<Option<RawStreams>, AppError>;
}

/// Where finished reports go.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn store_effort_report(&self, report: &EffortReport) -> Result<(), AppError>;

    async fn get_effort_report(
        &self,
        activity_id: i64,
    ) -> Result<Option<StoredEffortReport>, AppError>;
}

/// Compute the report for one activity.
///
/// Targets beyond the activity's total distance are left out of the report.
pub fn compute_report(
    activity_id: i64,
    streams: &ActivityStreams,
    targets: &[TargetDistance],
) -> EffortReport {
    let time = streams.time();
    let distance = streams.distance();

    let efforts = targets
        .par_iter()
        .filter(|target| is_reachable(distance, target.meters()))
        .filter_map(|target| {
            find_segment_extremes(time, distance, target.meters())
                .map(|extremes| (*target, EffortRecord::from(extremes)))
        })
        .collect();

    EffortReport {
        activity_id,
        efforts,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityOutcome {
    /// A report was computed and stored.
    Stored(EffortReport),
    /// The activity had no usable streams; nothing was stored.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct EffortProcessor<S, R> {
    source: S,
    store: R,
    targets: Arc<[TargetDistance]>,
    policy: StreamPolicy,
}

impl<S, R> EffortProcessor<S, R>
where
    S: StreamSource,
    R: ReportStore,
{
    pub fn new(source: S, store: R, targets: Vec<TargetDistance>, policy: StreamPolicy) -> Self {
        Self {
            source,
            store,
            targets: targets.into(),
            policy,
        }
    }

    pub async fn process_activity(
        &self,
        ctx: &RunContext,
        activity_id: i64,
    ) -> Result<ActivityOutcome, AppError> {
        self.process_one(activity_id).instrument(ctx.span()).await
    }

    async fn process_one(&self, activity_id: i64) -> Result<ActivityOutcome, AppError> {
        let Some(raw) = self.source.get_time_distance_streams(activity_id).await? else {
            warn!("No streams for activity {activity_id}, skipping");
            return Ok(ActivityOutcome::Skipped);
        };

        let streams = ActivityStreams::parse(&raw, self.policy)?;
        debug!(
            "Activity {activity_id}: {} samples over {:.1}m",
            streams.len(),
            streams.total_distance()
        );

        // The sweeps run on rayon, off the async workers
        let targets = Arc::clone(&self.targets);
        let report =
            tokio::task::spawn_blocking(move || compute_report(activity_id, &streams, &targets))
                .await?;
        self.store.store_effort_report(&report).await?;

        info!(
            "Stored {} of {} efforts for activity {activity_id}",
            report.efforts.len(),
            self.targets.len()
        );

        Ok(ActivityOutcome::Stored(report))
    }

    /// The stored report for an activity, if one exists.
    pub async fn stored_report(
        &self,
        activity_id: i64,
    ) -> Result<Option<StoredEffortReport>, AppError> {
        self.store.get_effort_report(activity_id).await
    }

    /// Process activities one after another. A failing activity is logged and
    /// counted, and the batch moves on.
    pub async fn run_batch(&self, ctx: &RunContext, activity_ids: &[i64]) -> BatchSummary {
        let total = activity_ids.len();
        let mut summary = BatchSummary::default();

        async {
            for (counter, &activity_id) in activity_ids.iter().enumerate() {
                info!("Handling activity {activity_id} ({}/{total})", counter + 1);

                match self.process_one(activity_id).await {
                    Ok(ActivityOutcome::Stored(_)) => summary.processed += 1,
                    Ok(ActivityOutcome::Skipped) => summary.skipped += 1,
                    Err(e) => {
                        error!("Failed to process activity {activity_id}: {e}");
                        summary.failed += 1;
                    }
                }
            }

            info!(
                "Batch finished: {} processed, {} skipped, {} failed",
                summary.processed, summary.skipped, summary.failed
            );
        }
        .instrument(ctx.span())
        .await;

        summary
    }
}
