//! Integration tests for per-activity effort processing.
//!
//! Streams and reports live in memory, so these run without a database.

mod common;

use common::{DISTANCE, MemorySource, MemoryStore, TIME, processor};
use efforts::{
    correlation::RunContext,
    effort_service::{ActivityOutcome, BatchSummary},
    errors::AppError,
    models::TargetDistance,
    streams::{StreamPolicy, join_stream},
};

#[tokio::test]
async fn test_stores_report_for_reachable_targets_only() {
    let store = MemoryStore::default();
    let source = MemorySource::default().with(1, TIME, DISTANCE);
    let processor = processor(source, store.clone(), StreamPolicy::Validate);

    let outcome = processor
        .process_activity(&RunContext::new(), 1)
        .await
        .unwrap();

    let ActivityOutcome::Stored(report) = outcome else {
        panic!("expected a stored report");
    };
    assert_eq!(report.activity_id, 1);

    let targets: Vec<_> = report.efforts.keys().copied().collect();
    assert_eq!(
        targets,
        vec![TargetDistance(100), TargetDistance(200), TargetDistance(400)]
    );
    assert!(report.get(TargetDistance(800)).is_none());

    let at_200 = report.get(TargetDistance(200)).unwrap();
    assert_eq!(at_200.best_duration, 20.0);
    assert_eq!(at_200.worst_duration, 20.0);
    assert_eq!(at_200.best_start_distance, 0.0);
    assert_eq!(at_200.worst_start_distance, 0.0);

    assert_eq!(store.stored(), vec![report]);
}

#[tokio::test]
async fn test_missing_streams_are_skipped() {
    let store = MemoryStore::default();
    let processor = processor(MemorySource::default(), store.clone(), StreamPolicy::Validate);

    let outcome = processor
        .process_activity(&RunContext::new(), 99)
        .await
        .unwrap();

    assert_eq!(outcome, ActivityOutcome::Skipped);
    assert!(store.stored().is_empty());
}

#[tokio::test]
async fn test_malformed_stream_stores_nothing() {
    let store = MemoryStore::default();
    let source = MemorySource::default().with(5, "0,10,x,30", "0,100,200,300");
    let processor = processor(source, store.clone(), StreamPolicy::Validate);

    let err = processor
        .process_activity(&RunContext::new(), 5)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedStream { index: 2, .. }));
    assert!(store.stored().is_empty());
}

#[tokio::test]
async fn test_distance_reset_policy() {
    let source = MemorySource::default().with(3, "0,10,20,30", "0,150,20,400");

    let strict = processor(source.clone(), MemoryStore::default(), StreamPolicy::Validate);
    let err = strict
        .process_activity(&RunContext::new(), 3)
        .await
        .unwrap_err();
    assert!(err.is_data_error());

    let store = MemoryStore::default();
    let trusting = processor(source, store.clone(), StreamPolicy::Trust);
    let outcome = trusting
        .process_activity(&RunContext::new(), 3)
        .await
        .unwrap();
    assert!(matches!(outcome, ActivityOutcome::Stored(_)));
    assert_eq!(store.stored().len(), 1);
}

#[tokio::test]
async fn test_batch_continues_after_failures() {
    let store = MemoryStore::default();
    let source = MemorySource::default()
        .with(1, TIME, DISTANCE)
        .with(2, "0,1,2", "0,5")
        .with(4, TIME, DISTANCE);
    let processor = processor(source, store.clone(), StreamPolicy::Validate);

    let summary = processor
        .run_batch(&RunContext::new(), &[1, 2, 3, 4])
        .await;

    assert_eq!(
        summary,
        BatchSummary {
            processed: 2,
            skipped: 1,
            failed: 1,
        }
    );

    let ids: Vec<_> = store.stored().iter().map(|r| r.activity_id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[tokio::test]
async fn test_reprocessing_is_deterministic() {
    let time: Vec<f64> = (0..3600).map(|s| s as f64).collect();
    let distance: Vec<f64> = (0..3600)
        .map(|s| s as f64 * 3.2 + ((s % 60) as f64 * 0.01))
        .collect();

    let store = MemoryStore::default();
    let source = MemorySource::default().with(8, &join_stream(&time), &join_stream(&distance));
    let processor = processor(source, store.clone(), StreamPolicy::Validate);

    let ctx = RunContext::new();
    processor.process_activity(&ctx, 8).await.unwrap();
    processor.process_activity(&ctx, 8).await.unwrap();

    let reports = store.stored();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0], reports[1]);

    let report = &reports[0];
    assert!(report.get(TargetDistance(10000)).is_some());
    assert!(report.get(TargetDistance(15000)).is_none());
    for record in report.efforts.values() {
        assert!(record.best_duration <= record.worst_duration);
    }
}
