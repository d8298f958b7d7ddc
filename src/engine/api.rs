// 高レベル公開API
// ProcessingEngineを簡単に使用できるようにするための便利な関数

use super::ProcessingEngine;
use crate::{
    core::{
        PayloadGenerator, ProcessingConfig, ProcessingResult, ProcessingSummary, ProgressReporter,
        ResultStore, TaskProcessor,
    },
    services::{
        ConsoleProgressReporter, DefaultProcessingConfig, MemoryResultStore, NoOpProgressReporter,
        RandomLabelPayload, SimulatedProcessor,
    },
};

/// 既定構成のエンジン型
pub type DefaultProcessingEngine<R> = ProcessingEngine<
    SimulatedProcessor,
    RandomLabelPayload,
    DefaultProcessingConfig,
    R,
    MemoryResultStore,
>;

/// 設定済みProcessingEngineでバッチを実行（DI推奨）
pub async fn run_with_engine<P, G, C, R, S>(
    engine: &ProcessingEngine<P, G, C, R, S>,
) -> ProcessingResult<ProcessingSummary>
where
    P: TaskProcessor + 'static,
    G: PayloadGenerator + 'static,
    C: ProcessingConfig,
    R: ProgressReporter + 'static,
    S: ResultStore + 'static,
{
    engine.run().await
}

/// ProcessingEngine作成のヘルパー関数
///
/// 0.5〜2秒の擬似処理、ランダムなラベル、コンソール出力
pub fn create_default_processing_engine(
    config: DefaultProcessingConfig,
) -> DefaultProcessingEngine<ConsoleProgressReporter> {
    let store = MemoryResultStore::with_capacity(config.task_count());
    ProcessingEngine::new(
        SimulatedProcessor::new(),
        RandomLabelPayload::new(),
        config,
        ConsoleProgressReporter::new(),
        store,
    )
}

/// ProcessingEngine作成のヘルパー関数（静音版）
///
/// テストやバックグラウンド処理用
pub fn create_quiet_processing_engine(
    config: DefaultProcessingConfig,
) -> DefaultProcessingEngine<NoOpProgressReporter> {
    let store = MemoryResultStore::with_capacity(config.task_count());
    ProcessingEngine::new(
        SimulatedProcessor::new(),
        RandomLabelPayload::new(),
        config,
        NoOpProgressReporter::new(),
        store,
    )
}
