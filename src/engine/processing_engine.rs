// ProcessingEngine - 完全依存性注入による並列処理エンジン
// 全ての依存関係がコンストラクタで注入される

use super::pipeline::ProcessingPipeline;
use crate::core::{
    PayloadGenerator, ProcessingConfig, ProcessingResult, ProcessingSummary, ProgressReporter,
    ResultStore, TaskProcessor,
};
use std::sync::Arc;

/// 完全依存性注入による並列処理エンジン
///
/// 並列処理で共有される依存関係は初期からArcで管理する。
pub struct ProcessingEngine<P, G, C, R, S> {
    processor: Arc<P>,
    payloads: Arc<G>,
    config: Arc<C>,
    reporter: Arc<R>,
    store: Arc<S>,
}

impl<P, G, C, R, S> ProcessingEngine<P, G, C, R, S>
where
    P: TaskProcessor + 'static,
    G: PayloadGenerator + 'static,
    C: ProcessingConfig,
    R: ProgressReporter + 'static,
    S: ResultStore + 'static,
{
    /// 新しい処理エンジンを作成（Constructor Injection）
    pub fn new(processor: P, payloads: G, config: C, reporter: R, store: S) -> Self {
        Self {
            processor: Arc::new(processor),
            payloads: Arc::new(payloads),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
            store: Arc::new(store),
        }
    }

    /// 設定されたバッチを1回実行する
    ///
    /// 結果はエンジンのストアに蓄積されるため、1エンジンにつき1回の実行を想定。
    pub async fn run(&self) -> ProcessingResult<ProcessingSummary> {
        let pipeline = ProcessingPipeline::new(Arc::clone(&self.processor), Arc::clone(&self.payloads));

        let summary = pipeline
            .execute(
                self.config.as_ref(),
                Arc::clone(&self.reporter),
                Arc::clone(&self.store),
            )
            .await?;

        tracing::info!(
            collected = summary.processed_results(),
            expected = summary.expected_tasks,
            elapsed_ms = summary.total_processing_time_ms,
            "[Main] run finished"
        );
        Ok(summary)
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 結果ストアへの参照を取得
    pub fn store(&self) -> &S {
        &self.store
    }
}
