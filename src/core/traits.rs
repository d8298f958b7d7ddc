// パイプラインのトレイト定義
// 外部コラボレーター（処理関数・ペイロード生成・進捗報告・結果保存）の抽象化

use super::types::{RunPhase, Task, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// バッチ実行の設定を抽象化するトレイト
#[automock]
pub trait ProcessingConfig: Send + Sync {
    /// ワーカー数
    fn worker_count(&self) -> usize;

    /// 生成するタスク数
    fn task_count(&self) -> usize;

    /// タスク1件あたりの投入待ち上限
    fn publish_timeout(&self) -> Duration;

    /// タスク投入間の待機時間
    fn publish_interval(&self) -> Duration;

    /// 完了シグナル回収フェーズ全体の待ち上限
    fn completion_signal_timeout(&self) -> Duration;

    /// タスクキューの容量
    fn task_queue_capacity(&self) -> usize;

    /// 結果キューの容量
    fn result_queue_capacity(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// タスク1件を処理結果の文字列へ変換する処理関数
#[automock]
#[async_trait]
pub trait TaskProcessor: Send + Sync {
    async fn process(&self, task: &Task) -> Result<String>;
}

// TaskProcessor for Box<dyn TaskProcessor>
#[async_trait]
impl TaskProcessor for Box<dyn TaskProcessor> {
    async fn process(&self, task: &Task) -> Result<String> {
        self.as_ref().process(task).await
    }
}

/// タスクのペイロード生成
#[automock]
pub trait PayloadGenerator: Send + Sync {
    fn generate(&self, task_id: u64) -> String;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_tasks: usize, worker_count: usize);

    /// ライフサイクル遷移の報告
    async fn report_phase(&self, phase: RunPhase);

    /// 結果収集の進捗報告
    async fn report_progress(&self, collected: usize, expected: usize);

    /// エラー発生時の報告
    async fn report_error(&self, task_id: u64, error: &str);

    /// 処理完了時の報告
    async fn report_completed(&self, collected: usize, expected: usize);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_tasks: usize, worker_count: usize) {
        self.as_ref().report_started(total_tasks, worker_count).await
    }

    async fn report_phase(&self, phase: RunPhase) {
        self.as_ref().report_phase(phase).await
    }

    async fn report_progress(&self, collected: usize, expected: usize) {
        self.as_ref().report_progress(collected, expected).await
    }

    async fn report_error(&self, task_id: u64, error: &str) {
        self.as_ref().report_error(task_id, error).await
    }

    async fn report_completed(&self, collected: usize, expected: usize) {
        self.as_ref().report_completed(collected, expected).await
    }
}

/// 収集済み結果の保存先
///
/// 書き込みはCollectorのみが行い、読み取りはCollectorのjoin後に行う。
#[automock]
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// 結果を1件追加
    async fn append(&self, result: TaskResult) -> Result<()>;

    /// 追加順のスナップショット
    fn snapshot(&self) -> Vec<TaskResult>;

    /// 保存件数
    fn stored_count(&self) -> usize;

    /// 保存の完了処理
    async fn finalize(&self) -> Result<()>;
}
