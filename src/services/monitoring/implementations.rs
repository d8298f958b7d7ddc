// 進捗監視の具象実装

use crate::core::{ProgressReporter, RunPhase};
use async_trait::async_trait;

/// tracing経由でコンソールへ進捗を出力する実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_tasks: usize, worker_count: usize) {
        if !self.quiet {
            tracing::info!(total_tasks, worker_count, "🚀 Starting batch run");
        }
    }

    async fn report_phase(&self, phase: RunPhase) {
        if !self.quiet {
            tracing::debug!(phase = phase.as_str(), "phase transition");
        }
    }

    async fn report_progress(&self, collected: usize, expected: usize) {
        if !self.quiet {
            tracing::info!("📊 Collected {collected}/{expected} results");
        }
    }

    async fn report_error(&self, task_id: u64, error: &str) {
        if !self.quiet {
            tracing::warn!(task_id, "❌ {error}");
        }
    }

    async fn report_completed(&self, collected: usize, expected: usize) {
        if self.quiet {
            return;
        }
        if collected == expected {
            tracing::info!("✅ Completed! Collected: {collected}, Expected: {expected}");
        } else {
            tracing::warn!("⚠️  Completed with missing results. Collected: {collected}, Expected: {expected}");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_tasks: usize, _worker_count: usize) {}

    async fn report_phase(&self, _phase: RunPhase) {}

    async fn report_progress(&self, _collected: usize, _expected: usize) {}

    async fn report_error(&self, _task_id: u64, _error: &str) {}

    async fn report_completed(&self, _collected: usize, _expected: usize) {}
}
