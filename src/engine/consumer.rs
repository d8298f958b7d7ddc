// Consumer - 並列ワーカー機能

use crate::{
    core::{
        DropReason, ProcessingError, ProcessingResult, Task, TaskProcessor, TaskResult,
        WorkerStats,
    },
    services::processing::process_single_task,
};
use std::sync::Arc;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    Mutex,
};

/// 共有タスクキューの受信側
pub type SharedTaskReceiver = Arc<Mutex<mpsc::Receiver<Task>>>;

/// 単一ワーカー
///
/// タスクキューが閉じて空になるまでタスクを取り出して処理する。
/// 結果の投入はノンブロッキングで、満杯または閉鎖時は結果を破棄する。
pub fn spawn_single_worker<P>(
    worker_id: usize,
    processor: Arc<P>,
    work_rx: SharedTaskReceiver,
    result_tx: mpsc::Sender<TaskResult>,
    done_tx: mpsc::Sender<usize>,
) -> tokio::task::JoinHandle<WorkerStats>
where
    P: TaskProcessor + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut stats = WorkerStats::new(worker_id);
        tracing::debug!(worker_id, "[Worker] started");

        loop {
            // 次のタスクを取得
            let task = {
                let mut rx = work_rx.lock().await;
                match rx.recv().await {
                    Some(task) => task,
                    None => break, // キュー終了
                }
            };
            tracing::debug!(worker_id, task_id = task.id, "[Worker] processing task");

            let result = match process_isolated(&processor, &task, worker_id).await {
                Ok(result) => result,
                Err(error) => {
                    tracing::warn!(worker_id, "{error}");
                    stats.failed += 1;
                    continue;
                }
            };

            match result_tx.try_send(result) {
                Ok(()) => stats.processed += 1,
                Err(error) => {
                    let reason = match error {
                        TrySendError::Full(_) => DropReason::QueueFull,
                        TrySendError::Closed(_) => DropReason::QueueClosed,
                    };
                    let dropped = ProcessingError::result_dropped(task.id, worker_id, reason);
                    tracing::warn!(worker_id, "{dropped}");
                    stats.dropped += 1;
                }
            }
        }

        // 完了シグナルはベストエフォート（満杯・閉鎖時は送らない）
        if done_tx.try_send(worker_id).is_err() {
            tracing::debug!(worker_id, "[Worker] completion signal skipped");
        }
        tracing::debug!(
            worker_id,
            processed = stats.processed,
            failed = stats.failed,
            dropped = stats.dropped,
            "[Worker] completed"
        );

        stats
    })
}

/// タスク1件を別タスクで処理し、パニックを `ProcessingFailed` として封じ込める
async fn process_isolated<P>(
    processor: &Arc<P>,
    task: &Task,
    worker_id: usize,
) -> ProcessingResult<TaskResult>
where
    P: TaskProcessor + ?Sized + 'static,
{
    let processor = Arc::clone(processor);
    let owned = task.clone();
    let handle =
        tokio::spawn(async move { process_single_task(processor.as_ref(), &owned, worker_id).await });

    match handle.await {
        Ok(result) => result,
        Err(join_error) => Err(ProcessingError::processing_failed(
            task.id,
            anyhow::anyhow!("処理中にパニックが発生しました: {join_error}"),
        )),
    }
}

/// 起動済みワーカー群
pub struct WorkerPool {
    handles: Vec<tokio::task::JoinHandle<WorkerStats>>,
}

impl WorkerPool {
    /// ID 1..=worker_count のワーカーを起動
    pub fn spawn<P>(
        processor: Arc<P>,
        work_rx: mpsc::Receiver<Task>,
        result_tx: mpsc::Sender<TaskResult>,
        done_tx: mpsc::Sender<usize>,
        worker_count: usize,
    ) -> Self
    where
        P: TaskProcessor + ?Sized + 'static,
    {
        let work_rx = Arc::new(Mutex::new(work_rx));
        let handles = (1..=worker_count)
            .map(|worker_id| {
                spawn_single_worker(
                    worker_id,
                    Arc::clone(&processor),
                    Arc::clone(&work_rx),
                    result_tx.clone(),
                    done_tx.clone(),
                )
            })
            .collect();

        Self { handles }
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// 全ワーカーの終了を待つ（タイムアウトなし）
    ///
    /// 異常終了したワーカーがあっても残り全てを待ってから最初のエラーを返す。
    pub async fn join_all(self) -> ProcessingResult<Vec<WorkerStats>> {
        let mut stats = Vec::with_capacity(self.handles.len());
        let mut first_error = None;
        for handle in self.handles {
            match handle.await {
                Ok(worker_stats) => stats.push(worker_stats),
                Err(join_error) => {
                    tracing::error!("[Worker] terminated abnormally: {join_error}");
                    first_error.get_or_insert(ProcessingError::task(join_error));
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(stats),
        }
    }
}

/// `WorkerPool::spawn` の関数形式
pub fn spawn_workers<P>(
    processor: Arc<P>,
    work_rx: mpsc::Receiver<Task>,
    result_tx: mpsc::Sender<TaskResult>,
    done_tx: mpsc::Sender<usize>,
    worker_count: usize,
) -> WorkerPool
where
    P: TaskProcessor + ?Sized + 'static,
{
    WorkerPool::spawn(processor, work_rx, result_tx, done_tx, worker_count)
}
