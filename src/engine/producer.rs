// Producer - タスク生成と配信機能

use crate::core::{PayloadGenerator, ProcessingError, ProcessingResult, Task};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendTimeoutError};

/// Producer: ID 1..=task_count のタスクを順番にタスクキューへ投入
///
/// 各投入は `publish_timeout` 以内に完了しなければならない。タイムアウト時は
/// 以降のタスクを投入せず `PublishTimeout` を返す。戻り値は投入できた件数。
pub fn spawn_producer<G>(
    payloads: Arc<G>,
    task_count: usize,
    work_tx: mpsc::Sender<Task>,
    publish_timeout: Duration,
    publish_interval: Duration,
) -> tokio::task::JoinHandle<ProcessingResult<usize>>
where
    G: PayloadGenerator + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut published = 0;

        for task_id in 1..=task_count as u64 {
            let task = Task::new(task_id, payloads.generate(task_id));

            match work_tx.send_timeout(task, publish_timeout).await {
                Ok(()) => {
                    published += 1;
                    tracing::debug!(
                        task_id,
                        queue_size = work_tx.max_capacity() - work_tx.capacity(),
                        "[Queue] added task"
                    );
                }
                Err(SendTimeoutError::Timeout(_)) => {
                    tracing::error!(task_id, published, "timed out publishing task");
                    return Err(ProcessingError::publish_timeout(task_id, publish_timeout));
                }
                Err(SendTimeoutError::Closed(_)) => {
                    return Err(ProcessingError::channel(format!(
                        "タスクキューが閉じられています (task {task_id})"
                    )));
                }
            }

            if !publish_interval.is_zero() {
                tokio::time::sleep(publish_interval).await;
            }
        }

        // work_txのドロップで送信側を解放
        Ok(published)
    })
}
