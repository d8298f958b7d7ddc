// エンジン層 - 並列処理とオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod api;
pub mod consumer;
pub mod pipeline;
pub mod processing_engine;
pub mod producer;

// 公開API - 主要エンジンクラス
pub use api::{
    create_default_processing_engine, create_quiet_processing_engine, run_with_engine,
    DefaultProcessingEngine,
};
pub use consumer::{spawn_workers, WorkerPool};
pub use pipeline::{drain_completion_signals, ProcessingPipeline};
pub use processing_engine::ProcessingEngine;
pub use producer::spawn_producer;
