use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use time::OffsetDateTime;

use crate::{
    effort_service::{ReportStore, StreamSource},
    errors::AppError,
    models::{EffortReport, StoredEffort, StoredEffortReport, TargetDistance},
    streams::RawStreams,
};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// All activity IDs, newest first.
    pub async fn list_activity_ids(&self) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar("SELECT id FROM activities ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Insert an activity together with its streams, returning the new ID.
    pub async fn create_activity_with_streams(
        &self,
        name: &str,
        streams: &RawStreams,
    ) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar("INSERT INTO activities (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO activity_streams (activity_id, time_stream, distance_stream)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(&streams.time)
        .bind(&streams.distance)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }
}

#[async_trait]
impl StreamSource for Database {
    async fn get_time_distance_streams(
        &self,
        activity_id: i64,
    ) -> Result<Option<RawStreams>, AppError> {
        let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
            r#"
            SELECT time_stream, distance_stream
            FROM activity_streams
            WHERE activity_id = $1
            "#,
        )
        .bind(activity_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some((Some(time), Some(distance))) => Some(RawStreams { time, distance }),
            _ => None,
        })
    }
}

#[async_trait]
impl ReportStore for Database {
    async fn store_effort_report(&self, report: &EffortReport) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO activity_efforts (activity_id, effort, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (activity_id)
            DO UPDATE SET effort = EXCLUDED.effort, created_at = EXCLUDED.created_at
            "#,
        )
        .bind(report.activity_id)
        .bind(Json(report.to_stored()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_effort_report(
        &self,
        activity_id: i64,
    ) -> Result<Option<StoredEffortReport>, AppError> {
        let row: Option<(i64, Json<BTreeMap<TargetDistance, StoredEffort>>, OffsetDateTime)> =
            sqlx::query_as(
                r#"
                SELECT activity_id, effort, created_at
                FROM activity_efforts
                WHERE activity_id = $1
                "#,
            )
            .bind(activity_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(activity_id, Json(effort), created_at)| StoredEffortReport {
            activity_id,
            effort,
            created_at,
        }))
    }
}
