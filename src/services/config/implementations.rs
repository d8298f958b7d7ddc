// 設定管理の具象実装

use crate::core::{ProcessingConfig, ProcessingError, ProcessingResult};
use std::time::Duration;

/// 既定のワーカー数
pub const DEFAULT_WORKER_COUNT: usize = 4;
/// 既定のタスク数
pub const DEFAULT_TASK_COUNT: usize = 15;
/// 既定の投入タイムアウト
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);
/// 既定の完了シグナル回収タイムアウト
pub const DEFAULT_COMPLETION_SIGNAL_TIMEOUT: Duration = Duration::from_secs(1);

/// 実行プリセット
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigPreset {
    /// 4 workers, 15 tasks
    #[default]
    Default,
    /// Default sizes with a 50ms pause between task publishes
    Demo,
    /// Default sizes, intended for zero-delay processors
    Fast,
    /// Many tasks across two workers per CPU
    Stress,
}

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultProcessingConfig {
    worker_count: usize,
    task_count: usize,
    publish_timeout: Duration,
    publish_interval: Duration,
    completion_signal_timeout: Duration,
    task_queue_capacity: Option<usize>,
    result_queue_capacity: Option<usize>,
    enable_progress: bool,
}

impl DefaultProcessingConfig {
    pub fn new(worker_count: usize, task_count: usize) -> Self {
        Self {
            worker_count,
            task_count,
            ..Self::default()
        }
    }

    /// プリセットから設定を作成
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default | ConfigPreset::Fast => Self::default(),
            ConfigPreset::Demo => Self::default().with_publish_interval(Duration::from_millis(50)),
            ConfigPreset::Stress => Self::new(num_cpus::get().max(1) * 2, 1_000),
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_task_count(mut self, task_count: usize) -> Self {
        self.task_count = task_count;
        self
    }

    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    pub fn with_publish_interval(mut self, interval: Duration) -> Self {
        self.publish_interval = interval;
        self
    }

    pub fn with_completion_signal_timeout(mut self, timeout: Duration) -> Self {
        self.completion_signal_timeout = timeout;
        self
    }

    /// タスクキュー容量を明示的に指定（既定はタスク数）
    pub fn with_task_queue_capacity(mut self, capacity: usize) -> Self {
        self.task_queue_capacity = Some(capacity);
        self
    }

    /// 結果キュー容量を明示的に指定（既定はタスク数）
    pub fn with_result_queue_capacity(mut self, capacity: usize) -> Self {
        self.result_queue_capacity = Some(capacity);
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultProcessingConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            task_count: DEFAULT_TASK_COUNT,
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
            publish_interval: Duration::ZERO,
            completion_signal_timeout: DEFAULT_COMPLETION_SIGNAL_TIMEOUT,
            task_queue_capacity: None,
            result_queue_capacity: None,
            enable_progress: true,
        }
    }
}

impl ProcessingConfig for DefaultProcessingConfig {
    fn worker_count(&self) -> usize {
        self.worker_count
    }

    fn task_count(&self) -> usize {
        self.task_count
    }

    fn publish_timeout(&self) -> Duration {
        self.publish_timeout
    }

    fn publish_interval(&self) -> Duration {
        self.publish_interval
    }

    fn completion_signal_timeout(&self) -> Duration {
        self.completion_signal_timeout
    }

    // tokioのmpscは容量0を受け付けないため、タスク数0でも1を確保する
    fn task_queue_capacity(&self) -> usize {
        self.task_queue_capacity
            .unwrap_or_else(|| self.task_count.max(1))
    }

    fn result_queue_capacity(&self) -> usize {
        self.result_queue_capacity
            .unwrap_or_else(|| self.task_count.max(1))
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// 実行前の設定検証
pub fn validate_config<C: ProcessingConfig + ?Sized>(config: &C) -> ProcessingResult<()> {
    if config.worker_count() == 0 {
        return Err(ProcessingError::configuration(
            "ワーカー数は1以上である必要があります",
        ));
    }
    if config.task_queue_capacity() == 0 {
        return Err(ProcessingError::configuration(
            "タスクキュー容量は1以上である必要があります",
        ));
    }
    if config.result_queue_capacity() == 0 {
        return Err(ProcessingError::configuration(
            "結果キュー容量は1以上である必要があります",
        ));
    }
    Ok(())
}
