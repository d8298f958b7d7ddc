// エラーハンドリング統合テスト
use crate::fixtures::{quiet_engine, PanicOnTask, RecordingReporter};
use data_processing::core::traits::{MockResultStore, MockTaskProcessor};
use data_processing::core::ErrorSeverity;
use data_processing::services::ReportStatus;
use data_processing::{
    DefaultProcessingConfig, MemoryResultStore, NoOpProgressReporter, ProcessingEngine,
    ProcessingError, ProcessingReport, SequentialPayload, UppercaseProcessor,
};
use std::time::Duration;

#[tokio::test]
async fn test_publish_timeout_yields_partial_batch() {
    // タスクキュー容量5、ワーカー起動前に6件目の投入がタイムアウトする
    let reporter = RecordingReporter::new();
    let engine = ProcessingEngine::new(
        UppercaseProcessor::new(),
        SequentialPayload::new(),
        DefaultProcessingConfig::new(4, 15)
            .with_task_queue_capacity(5)
            .with_publish_timeout(Duration::from_millis(30)),
        reporter.clone(),
        MemoryResultStore::new(),
    );

    let summary = engine.run().await.unwrap();
    let report = ProcessingReport::from_summary(&summary);

    assert_eq!(summary.published_tasks, 5);
    assert_eq!(report.processed_results, 5);
    assert_eq!(report.status, ReportStatus::Mismatch);
    assert_eq!(*reporter.errors.lock().unwrap(), vec![6]);

    let progress = reporter.progress.lock().unwrap().clone();
    assert_eq!(progress.len(), 5);
    assert!(progress.iter().all(|(_, expected)| *expected == 15));
    assert_eq!(progress.last(), Some(&(5, 15)));

    let error = summary.aborted.as_ref().unwrap();
    assert!(matches!(error, ProcessingError::PublishTimeout { task_id: 6, timeout_ms: 30 }));
    assert_eq!(error.severity(), ErrorSeverity::High);

    let text = report.render();
    assert!(text.contains("WARNING: Result count mismatch!"));
    assert!(text.contains("Expected: 15, Actual: 5"));
    assert!(text.contains("Task generation aborted"));
}

#[tokio::test]
async fn test_processing_failures_are_skipped() {
    let mut processor = MockTaskProcessor::new();
    processor.expect_process().times(10).returning(|task| {
        if task.id % 5 == 0 {
            Err(anyhow::anyhow!("corrupt payload {}", task.payload))
        } else {
            Ok(task.payload.to_lowercase())
        }
    });

    let engine = ProcessingEngine::new(
        processor,
        SequentialPayload::new(),
        DefaultProcessingConfig::new(3, 10),
        NoOpProgressReporter::new(),
        MemoryResultStore::new(),
    );

    let summary = engine.run().await.unwrap();
    let report = ProcessingReport::from_summary(&summary);

    assert_eq!(summary.failed_tasks, 2);
    assert_eq!(report.processed_results, 8);
    assert!(!report.is_success());
    assert!(summary.aborted.is_none());
    assert!(report.render().contains("Failed Tasks: 2, Dropped Results: 0"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_panicking_task_is_skipped_and_reported() {
    let engine = ProcessingEngine::new(
        PanicOnTask(3),
        SequentialPayload::new(),
        DefaultProcessingConfig::new(4, 15),
        NoOpProgressReporter::new(),
        MemoryResultStore::new(),
    );

    let summary = engine.run().await.unwrap();
    let report = ProcessingReport::from_summary(&summary);

    assert_eq!(summary.failed_tasks, 1);
    assert_eq!(summary.completion_signals, 4);
    assert_eq!(report.processed_results, 14);
    assert!(summary.results.iter().all(|r| r.task_id != 3));

    let text = report.render();
    assert!(text.contains("Failed Tasks: 1, Dropped Results: 0"));
    assert!(text.contains("Expected: 15, Actual: 14"));
}

#[tokio::test]
async fn test_all_tasks_failing_warns_no_results() {
    let mut processor = MockTaskProcessor::new();
    processor
        .expect_process()
        .returning(|_| Err(anyhow::anyhow!("unavailable")));

    let engine = ProcessingEngine::new(
        processor,
        SequentialPayload::new(),
        DefaultProcessingConfig::new(2, 4),
        NoOpProgressReporter::new(),
        MemoryResultStore::new(),
    );

    let summary = engine.run().await.unwrap();
    let text = ProcessingReport::from_summary(&summary).render();

    assert!(text.contains("WARNING: No results were collected!"));
    assert!(text.contains("Expected: 4, Actual: 0"));
}

#[tokio::test]
async fn test_small_result_queue_drops_results() {
    // Collectorの追加処理を遅らせ、容量1の結果キューを溢れさせる
    let mut store = MockResultStore::new();
    store.expect_append().returning(|_| {
        std::thread::sleep(Duration::from_millis(20));
        Ok(())
    });
    store.expect_finalize().returning(|| Ok(()));
    store.expect_snapshot().returning(Vec::new);

    let engine = ProcessingEngine::new(
        UppercaseProcessor::new(),
        SequentialPayload::new(),
        DefaultProcessingConfig::new(4, 20).with_result_queue_capacity(1),
        NoOpProgressReporter::new(),
        store,
    );

    let summary = engine.run().await.unwrap();

    assert!(summary.dropped_results > 0);
    assert!(!summary.is_complete());
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected() {
    let engine = quiet_engine(DefaultProcessingConfig::new(0, 5));

    let error = engine.run().await.unwrap_err();

    assert!(matches!(error, ProcessingError::ConfigurationError { .. }));
    assert!(error.to_string().contains("ワーカー数は1以上である必要があります"));
    assert!(!error.is_recoverable());
}

#[tokio::test]
async fn test_store_failure_aborts_run() {
    let mut store = MockResultStore::new();
    store
        .expect_append()
        .returning(|_| Err(anyhow::anyhow!("disk full")));

    let engine = ProcessingEngine::new(
        UppercaseProcessor::new(),
        SequentialPayload::new(),
        DefaultProcessingConfig::new(2, 3),
        NoOpProgressReporter::new(),
        store,
    );

    let error = engine.run().await.unwrap_err();
    assert!(matches!(error, ProcessingError::StoreError { .. }));
}
