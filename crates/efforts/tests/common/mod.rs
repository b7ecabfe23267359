//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use efforts::{
    effort_service::{EffortProcessor, ReportStore, StreamSource},
    errors::AppError,
    models::{EffortReport, StoredEffortReport, TargetDistance},
    streams::{RawStreams, StreamPolicy},
};
use time::OffsetDateTime;

pub const TIME: &str = "0,10,20,30,40";
pub const DISTANCE: &str = "0,100,210,300,420";

#[derive(Clone, Default)]
pub struct MemorySource {
    streams: HashMap<i64, RawStreams>,
}

impl MemorySource {
    pub fn with(mut self, activity_id: i64, time: &str, distance: &str) -> Self {
        self.streams.insert(
            activity_id,
            RawStreams {
                time: time.to_string(),
                distance: distance.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl StreamSource for MemorySource {
    async fn get_time_distance_streams(
        &self,
        activity_id: i64,
    ) -> Result<Option<RawStreams>, AppError> {
        Ok(self.streams.get(&activity_id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    reports: Arc<Mutex<Vec<EffortReport>>>,
}

impl MemoryStore {
    pub fn stored(&self) -> Vec<EffortReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn store_effort_report(&self, report: &EffortReport) -> Result<(), AppError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn get_effort_report(
        &self,
        activity_id: i64,
    ) -> Result<Option<StoredEffortReport>, AppError> {
        // Latest write wins, like the upsert in Postgres
        let reports = self.reports.lock().unwrap();
        Ok(reports
            .iter()
            .rev()
            .find(|r| r.activity_id == activity_id)
            .map(|r| StoredEffortReport {
                activity_id,
                effort: r.to_stored(),
                created_at: OffsetDateTime::now_utc(),
            }))
    }
}

pub fn processor(
    source: MemorySource,
    store: MemoryStore,
    policy: StreamPolicy,
) -> EffortProcessor<MemorySource, MemoryStore> {
    EffortProcessor::new(source, store, TargetDistance::defaults(), policy)
}
