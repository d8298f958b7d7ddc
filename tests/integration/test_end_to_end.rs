// エンドツーエンド統合テスト
use crate::fixtures::{quiet_engine, RecordingReporter};
use data_processing::{
    DefaultProcessingConfig, MemoryResultStore, ProcessingEngine, ProcessingReport, ResultStore,
    RunPhase, SequentialPayload, UppercaseProcessor,
};
use data_processing::services::ReportStatus;
use std::collections::{HashMap, HashSet};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_default_batch_workflow() {
    let engine = quiet_engine(DefaultProcessingConfig::default());

    let summary = engine.run().await.unwrap();
    let report = ProcessingReport::from_summary(&summary);

    assert_eq!(report.expected_tasks, 15);
    assert_eq!(report.processed_results, 15);
    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(summary.completion_signals, 4);

    // 各タスクはちょうど1回処理される
    let ids: HashSet<u64> = summary.results.iter().map(|r| r.task_id).collect();
    assert_eq!(ids, (1..=15).collect());

    // ワーカー別件数の合計は結果数と一致
    assert_eq!(report.worker_counts.len(), 4);
    let total: usize = report.worker_counts.iter().map(|c| c.tasks_processed).sum();
    assert_eq!(total, 15);
    assert!(summary.results.iter().all(|r| (1..=4).contains(&r.worker_id)));

    let text = report.render();
    assert!(text.contains("Expected Tasks: 15"));
    assert!(text.contains("Processed Results: 15"));
    assert!(text.contains("SUCCESS: All tasks processed successfully!"));

    // ワーカー行は ID 順に4行、件数の合計は15
    let worker_lines: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("  Worker "))
        .collect();
    assert_eq!(worker_lines.len(), 4);
    let mut rendered_total = 0;
    for (line, count) in worker_lines.iter().zip(&report.worker_counts) {
        assert_eq!(
            *line,
            format!("  Worker {}: {} tasks processed", count.worker_id, count.tasks_processed)
        );
        rendered_total += line
            .split_whitespace()
            .nth(2)
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap();
    }
    assert_eq!(rendered_total, 15);
}

#[tokio::test]
async fn test_payload_transformation_end_to_end() {
    let engine = ProcessingEngine::new(
        UppercaseProcessor::new(),
        SequentialPayload::new(),
        DefaultProcessingConfig::new(2, 6),
        RecordingReporter::new(),
        MemoryResultStore::new(),
    );

    let summary = engine.run().await.unwrap();

    let payloads: HashMap<u64, String> = summary
        .results
        .iter()
        .map(|r| (r.task_id, r.processed_payload.clone()))
        .collect();
    assert_eq!(payloads[&1], "[PROCESSED] DATA-1-TEXT");
    assert_eq!(payloads[&6], "[PROCESSED] DATA-6-DOCUMENT");
    assert_eq!(engine.store().snapshot().len(), 6);
}

#[tokio::test]
async fn test_single_worker_processes_everything() {
    let engine = quiet_engine(DefaultProcessingConfig::new(1, 8));

    let summary = engine.run().await.unwrap();

    assert_eq!(summary.processed_results(), 8);
    assert_eq!(summary.per_worker_counts(), vec![(1, 8)]);
}

#[tokio::test]
async fn test_more_workers_than_tasks() {
    let engine = quiet_engine(DefaultProcessingConfig::new(8, 3));

    let summary = engine.run().await.unwrap();
    let report = ProcessingReport::from_summary(&summary);

    assert!(report.is_success());
    // 全ワーカーが一覧に出る（0件のワーカーも含む）
    assert_eq!(report.worker_counts.len(), 8);
    assert_eq!(summary.completion_signals, 8);
}

#[tokio::test]
async fn test_zero_tasks_reports_success() {
    let engine = quiet_engine(DefaultProcessingConfig::new(4, 0));

    let summary = engine.run().await.unwrap();
    let report = ProcessingReport::from_summary(&summary);

    assert!(report.is_success());
    assert!(report.results.is_empty());
    assert!(!report.render().contains("No results were collected"));
}

#[tokio::test]
async fn test_lifecycle_phases_and_progress() {
    let reporter = RecordingReporter::new();
    let engine = ProcessingEngine::new(
        UppercaseProcessor::new(),
        SequentialPayload::new(),
        DefaultProcessingConfig::new(3, 5),
        reporter.clone(),
        MemoryResultStore::new(),
    );

    engine.run().await.unwrap();

    assert_eq!(reporter.phases().first(), Some(&RunPhase::Init));
    assert_eq!(reporter.phases().last(), Some(&RunPhase::Done));
    assert_eq!(reporter.phases().len(), 8);

    let progress = reporter.progress.lock().unwrap().clone();
    assert_eq!(progress.len(), 5);
    assert_eq!(progress.last(), Some(&(5, 5)));
    assert_eq!(*reporter.completed.lock().unwrap(), Some((5, 5)));
}

#[tokio::test]
async fn test_json_report_matches_summary() {
    let engine = quiet_engine(DefaultProcessingConfig::new(2, 4));

    let summary = engine.run().await.unwrap();
    let json = ProcessingReport::from_summary(&summary).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["expected_tasks"], 4);
    assert_eq!(value["processed_results"], 4);
    assert_eq!(value["status"], "success");
    assert_eq!(value["results"].as_array().unwrap().len(), 4);
}
