// テストユーティリティ
// 統合テスト共通のテストダブルとヘルパー

use async_trait::async_trait;
use data_processing::{
    DefaultProcessingConfig, MemoryResultStore, NoOpProgressReporter, ProcessingEngine,
    ProgressReporter, RunPhase, SequentialPayload, SimulatedProcessor, Task, TaskProcessor,
};
use std::sync::{Arc, Mutex};

/// 呼び出しを記録するレポーター
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub phases: Arc<Mutex<Vec<RunPhase>>>,
    pub progress: Arc<Mutex<Vec<(usize, usize)>>>,
    pub errors: Arc<Mutex<Vec<u64>>>,
    pub completed: Arc<Mutex<Option<(usize, usize)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phases(&self) -> Vec<RunPhase> {
        self.phases.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressReporter for RecordingReporter {
    async fn report_started(&self, _total_tasks: usize, _worker_count: usize) {}

    async fn report_phase(&self, phase: RunPhase) {
        self.phases.lock().unwrap().push(phase);
    }

    async fn report_progress(&self, collected: usize, expected: usize) {
        self.progress.lock().unwrap().push((collected, expected));
    }

    async fn report_error(&self, task_id: u64, _error: &str) {
        self.errors.lock().unwrap().push(task_id);
    }

    async fn report_completed(&self, collected: usize, expected: usize) {
        *self.completed.lock().unwrap() = Some((collected, expected));
    }
}

/// 指定タスクでパニックし、それ以外は大文字化する処理
pub struct PanicOnTask(pub u64);

#[async_trait]
impl TaskProcessor for PanicOnTask {
    async fn process(&self, task: &Task) -> anyhow::Result<String> {
        if task.id == self.0 {
            panic!("processor bug on task {}", task.id);
        }
        Ok(format!("[PROCESSED] {}", task.payload.to_uppercase()))
    }
}

pub type QuietEngine = ProcessingEngine<
    SimulatedProcessor,
    SequentialPayload,
    DefaultProcessingConfig,
    NoOpProgressReporter,
    MemoryResultStore,
>;

/// 短い遅延の静音エンジン
pub fn quiet_engine(config: DefaultProcessingConfig) -> QuietEngine {
    ProcessingEngine::new(
        SimulatedProcessor::with_delay_range(1, 10),
        SequentialPayload::new(),
        config,
        NoOpProgressReporter::new(),
        MemoryResultStore::new(),
    )
}
