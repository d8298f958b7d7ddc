// Worker - 単一タスク処理機能

use crate::core::{ProcessingError, ProcessingResult, Task, TaskProcessor, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

/// 単一タスクの処理
///
/// 処理関数の失敗は `ProcessingFailed` として返し、結果は作らない。
pub async fn process_single_task<P>(
    processor: &P,
    task: &Task,
    worker_id: usize,
) -> ProcessingResult<TaskResult>
where
    P: TaskProcessor + ?Sized,
{
    let start_time = Instant::now();

    let processed_payload = processor
        .process(task)
        .await
        .map_err(|e| ProcessingError::processing_failed(task.id, e))?;

    tracing::debug!(
        worker_id,
        task_id = task.id,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "task processed"
    );

    Ok(TaskResult::new(task.id, processed_payload, worker_id))
}

/// 大文字化に加えて、範囲内のランダムな遅延で処理時間を模擬する実装
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay_ms: RangeInclusive<u64>,
}

impl SimulatedProcessor {
    /// 500ms〜2000msの遅延
    pub fn new() -> Self {
        Self::with_delay_range(500, 2000)
    }

    pub fn with_delay_range(min_ms: u64, max_ms: u64) -> Self {
        let (low, high) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self { delay_ms: low..=high }
    }

    /// 遅延なし
    pub fn instant() -> Self {
        Self::with_delay_range(0, 0)
    }

    pub fn delay_range(&self) -> &RangeInclusive<u64> {
        &self.delay_ms
    }

    fn pick_delay(&self) -> Duration {
        let millis = rand::rng().random_range(self.delay_ms.clone());
        Duration::from_millis(millis)
    }
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskProcessor for SimulatedProcessor {
    async fn process(&self, task: &Task) -> Result<String> {
        let delay = self.pick_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Ok(format!(
            "[PROCESSED] {} (processed in {}ms)",
            task.payload.to_uppercase(),
            delay.as_millis()
        ))
    }
}

/// 遅延なしの決定的な実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct UppercaseProcessor;

impl UppercaseProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaskProcessor for UppercaseProcessor {
    async fn process(&self, task: &Task) -> Result<String> {
        Ok(format!("[PROCESSED] {}", task.payload.to_uppercase()))
    }
}
