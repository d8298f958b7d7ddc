// Pipeline - Producer-Worker-Collector パイプライン
// ライフサイクル管理とシャットダウンのオーケストレーション

use super::{consumer::spawn_workers, producer::spawn_producer};
use crate::{
    core::{
        PayloadGenerator, ProcessingConfig, ProcessingError, ProcessingResult, ProcessingSummary,
        ProgressReporter, ResultStore, RunPhase, Task, TaskProcessor, TaskResult,
    },
    services::{config::validate_config, persistence::spawn_result_collector},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// 責任が明確に分離されたパイプライン
pub struct ProcessingPipeline<P: ?Sized, G: ?Sized> {
    processor: Arc<P>,
    payloads: Arc<G>,
}

impl<P, G> ProcessingPipeline<P, G>
where
    P: TaskProcessor + ?Sized + 'static,
    G: PayloadGenerator + ?Sized + 'static,
{
    pub fn new(processor: Arc<P>, payloads: Arc<G>) -> Self {
        Self {
            processor,
            payloads,
        }
    }

    /// 1バッチを最後まで実行する
    ///
    /// `PublishTimeout` は生成を打ち切るが、投入済みのタスクでシャットダウンまで
    /// 進め、サマリーの `aborted` に記録する。
    pub async fn execute<C, R, S>(
        &self,
        config: &C,
        reporter: Arc<R>,
        store: Arc<S>,
    ) -> ProcessingResult<ProcessingSummary>
    where
        C: ProcessingConfig + ?Sized,
        R: ProgressReporter + 'static,
        S: ResultStore + 'static,
    {
        let start_time = Instant::now();
        validate_config(config)?;

        let task_count = config.task_count();
        let worker_count = config.worker_count();
        enter_phase(reporter.as_ref(), RunPhase::Init).await;
        if config.enable_progress_reporting() {
            reporter.report_started(task_count, worker_count).await;
        }

        // Init → Generating: キューとシグナルチャンネルを構築
        let (work_tx, work_rx) = mpsc::channel::<Task>(config.task_queue_capacity());
        let (result_tx, result_rx) = mpsc::channel::<TaskResult>(config.result_queue_capacity());
        let (done_tx, mut done_rx) = mpsc::channel::<usize>(worker_count);
        enter_phase(reporter.as_ref(), RunPhase::Generating).await;

        let producer_handle = spawn_producer(
            Arc::clone(&self.payloads),
            task_count,
            work_tx.clone(),
            config.publish_timeout(),
            config.publish_interval(),
        );

        let (published, aborted) = match producer_handle.await? {
            Ok(published) => (published, None),
            Err(error) => match &error {
                // 失敗したタスクより前のタスクは全て投入済み
                ProcessingError::PublishTimeout { task_id, .. } => {
                    let task_id = *task_id;
                    tracing::error!("[Main] task generation aborted: {error}");
                    reporter.report_error(task_id, &error.to_string()).await;
                    ((task_id - 1) as usize, Some(error))
                }
                _ => return Err(error),
            },
        };
        enter_phase(reporter.as_ref(), RunPhase::Dispatched).await;

        // Dispatched → AwaitingWorkers: タスクキューを閉じてワーカー起動
        drop(work_tx);

        // Collectorはワーカーと並行して動作する
        // 進捗は投入件数ではなく予定タスク数に対して報告する
        let collector_handle = spawn_result_collector(
            result_rx,
            task_count,
            Arc::clone(&store),
            Arc::clone(&reporter),
        );

        let pool = spawn_workers(
            Arc::clone(&self.processor),
            work_rx,
            result_tx,
            done_tx,
            worker_count,
        );
        tracing::info!(worker_count, "[Main] started worker pool");
        enter_phase(reporter.as_ref(), RunPhase::AwaitingWorkers).await;

        let worker_stats = pool.join_all().await?;

        // AwaitingWorkers → AwaitingCollector: 全ワーカーの終了で結果キューの
        // 送信側は全て解放済み
        enter_phase(reporter.as_ref(), RunPhase::AwaitingCollector).await;
        let collected = collector_handle.await??;
        tracing::info!(collected, "[Main] all results collected");

        enter_phase(reporter.as_ref(), RunPhase::AwaitingCompletionSignals).await;
        let completion_signals = drain_completion_signals(
            &mut done_rx,
            worker_count,
            config.completion_signal_timeout(),
        )
        .await;
        done_rx.close();

        enter_phase(reporter.as_ref(), RunPhase::Reporting).await;
        store.finalize().await.map_err(ProcessingError::store)?;

        let results = store.snapshot();
        if config.enable_progress_reporting() {
            reporter.report_completed(results.len(), task_count).await;
        }

        let summary = ProcessingSummary {
            expected_tasks: task_count,
            published_tasks: published,
            worker_count,
            results,
            failed_tasks: worker_stats.iter().map(|s| s.failed).sum(),
            dropped_results: worker_stats.iter().map(|s| s.dropped).sum(),
            completion_signals,
            total_processing_time_ms: start_time.elapsed().as_millis() as u64,
            aborted,
        };
        enter_phase(reporter.as_ref(), RunPhase::Done).await;

        Ok(summary)
    }
}

async fn enter_phase<R: ProgressReporter + ?Sized>(reporter: &R, phase: RunPhase) {
    tracing::debug!(phase = phase.as_str(), "[Main] entering phase");
    reporter.report_phase(phase).await;
}

/// 完了シグナルを最大 `expected` 件、合計 `budget` 以内で回収する
///
/// 不足は診断用の警告に留め、エラーにはしない。
pub async fn drain_completion_signals(
    done_rx: &mut mpsc::Receiver<usize>,
    expected: usize,
    budget: Duration,
) -> usize {
    let deadline = tokio::time::Instant::now() + budget;
    let mut received = 0;

    while received < expected {
        match tokio::time::timeout_at(deadline, done_rx.recv()).await {
            Ok(Some(worker_id)) => {
                tracing::trace!(worker_id, "completion signal received");
                received += 1;
            }
            // 送信側が全て解放済み、またはタイムアウト
            Ok(None) | Err(_) => break,
        }
    }

    if received < expected {
        let missed = ProcessingError::completion_signal_missed(received, expected);
        tracing::warn!("[Main] {missed}");
    }
    received
}
