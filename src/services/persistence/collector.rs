// Collector - 結果収集機能

use crate::core::{ProcessingError, ProcessingResult, ProgressReporter, ResultStore, TaskResult};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Collector: 結果キューが閉じて空になるまで結果をストアへ追加する
///
/// 戻り値は収集した件数。
pub fn spawn_result_collector<S, R>(
    mut result_rx: mpsc::Receiver<TaskResult>,
    expected: usize,
    store: Arc<S>,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<ProcessingResult<usize>>
where
    S: ResultStore + 'static,
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let mut collected = 0;

        while let Some(result) = result_rx.recv().await {
            let task_id = result.task_id;
            let worker_id = result.worker_id;

            store.append(result).await.map_err(ProcessingError::store)?;
            collected += 1;

            tracing::debug!(
                task_id,
                worker_id,
                total = collected,
                "[ResultsCollector] added result"
            );
            reporter.report_progress(collected, expected).await;
        }

        Ok(collected)
    })
}
