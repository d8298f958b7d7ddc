// 並列データ処理パイプライン
// Producer → 有界タスクキュー → ワーカープール → 結果キュー → Collector

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod services;

// 公開API
pub use crate::core::{
    PayloadGenerator, ProcessingConfig, ProcessingError, ProcessingResult, ProcessingSummary,
    ProgressReporter, ResultStore, RunPhase, Task, TaskProcessor, TaskResult, WorkerStats,
};
pub use engine::{
    create_default_processing_engine, create_quiet_processing_engine, run_with_engine,
    ProcessingEngine, ProcessingPipeline,
};
pub use services::{
    ConfigPreset, ConsoleProgressReporter, DefaultProcessingConfig, MemoryResultStore,
    NoOpProgressReporter, ProcessingReport, RandomLabelPayload, SequentialPayload,
    SimulatedProcessor, UppercaseProcessor,
};
