use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    correlation::RunContext,
    effort_service::{ActivityOutcome, EffortProcessor, ReportStore, StreamSource},
    errors::AppError,
    models::{EffortReport, StoredEffort, StoredEffortReport, TargetDistance},
};

#[derive(Debug, Serialize)]
pub struct EffortReportResponse {
    pub activity_id: i64,
    pub effort: BTreeMap<TargetDistance, StoredEffort>,
}

impl From<&EffortReport> for EffortReportResponse {
    fn from(report: &EffortReport) -> Self {
        Self {
            activity_id: report.activity_id,
            effort: report.to_stored(),
        }
    }
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Compute and store efforts for one activity.
pub async fn process_activity_efforts<S, R>(
    Extension(processor): Extension<EffortProcessor<S, R>>,
    Extension(ctx): Extension<RunContext>,
    Path(activity_id): Path<i64>,
) -> Result<Response, AppError>
where
    S: StreamSource + Clone + 'static,
    R: ReportStore + Clone + 'static,
{
    match processor.process_activity(&ctx, activity_id).await? {
        ActivityOutcome::Stored(report) => {
            Ok(Json(EffortReportResponse::from(&report)).into_response())
        }
        ActivityOutcome::Skipped => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn get_activity_efforts<S, R>(
    Extension(processor): Extension<EffortProcessor<S, R>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<StoredEffortReport>, AppError>
where
    S: StreamSource + Clone + 'static,
    R: ReportStore + Clone + 'static,
{
    let report = processor
        .stored_report(activity_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(report))
}
