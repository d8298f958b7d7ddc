// 処理に関連するデータ型定義
// ステージ間で受け渡される不変の値レコード

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ProcessingError;

/// 優先度の周期（0, 1, 2 を循環）
pub const PRIORITY_LEVELS: u64 = 3;

/// Producerが生成する処理タスク
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub payload: String,
    pub priority: u8,
}

impl Task {
    /// IDから優先度を導出してタスクを作成
    pub fn new(id: u64, payload: impl Into<String>) -> Self {
        Self {
            id,
            payload: payload.into(),
            priority: (id % PRIORITY_LEVELS) as u8,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task{{id={}, payload='{}', priority={}}}",
            self.id, self.payload, self.priority
        )
    }
}

/// ワーカーが1タスクにつき1度だけ生成する処理結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: u64,
    pub processed_payload: String,
    pub worker_id: usize,
    pub timestamp: DateTime<Utc>,
}

impl TaskResult {
    /// 現在時刻でスタンプした結果を作成
    pub fn new(task_id: u64, processed_payload: impl Into<String>, worker_id: usize) -> Self {
        Self {
            task_id,
            processed_payload: processed_payload.into(),
            worker_id,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result{{task_id={}, processed_payload='{}', worker_id={}, timestamp={}}}",
            self.task_id,
            self.processed_payload,
            self.worker_id,
            self.timestamp.timestamp_millis()
        )
    }
}

/// オーケストレーターのライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    Init,
    Generating,
    Dispatched,
    AwaitingWorkers,
    AwaitingCollector,
    AwaitingCompletionSignals,
    Reporting,
    Done,
}

impl RunPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Generating => "generating",
            Self::Dispatched => "dispatched",
            Self::AwaitingWorkers => "awaiting_workers",
            Self::AwaitingCollector => "awaiting_collector",
            Self::AwaitingCompletionSignals => "awaiting_completion_signals",
            Self::Reporting => "reporting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1ワーカー分の処理統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub worker_id: usize,
    pub processed: usize,
    pub failed: usize,
    pub dropped: usize,
}

impl WorkerStats {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Self::default()
        }
    }
}

/// 処理全体のサマリー
///
/// `results` はCollectorのjoin後に凍結されたスナップショット。
/// 到着順（＝完了順）を保持する。
#[derive(Debug)]
pub struct ProcessingSummary {
    pub expected_tasks: usize,
    pub published_tasks: usize,
    pub worker_count: usize,
    pub results: Vec<TaskResult>,
    pub failed_tasks: usize,
    pub dropped_results: usize,
    pub completion_signals: usize,
    pub total_processing_time_ms: u64,
    /// Producerを中断させたエラー（PublishTimeout等）
    pub aborted: Option<ProcessingError>,
}

impl ProcessingSummary {
    pub fn processed_results(&self) -> usize {
        self.results.len()
    }

    /// 期待タスク数と収集結果数が一致したか
    pub fn is_complete(&self) -> bool {
        self.results.len() == self.expected_tasks
    }

    /// ワーカーID 1..=N ごとの処理件数
    pub fn per_worker_counts(&self) -> Vec<(usize, usize)> {
        (1..=self.worker_count)
            .map(|worker_id| {
                let count = self
                    .results
                    .iter()
                    .filter(|result| result.worker_id == worker_id)
                    .count();
                (worker_id, count)
            })
            .collect()
    }
}
