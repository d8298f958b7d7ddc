use crate::cli::OutputFormat;
use crate::core::ProcessingConfig;
use crate::engine::ProcessingEngine;
use crate::services::{
    ConfigPreset, ConsoleProgressReporter, DefaultProcessingConfig, MemoryResultStore,
    ProcessingReport, RandomLabelPayload, SimulatedProcessor,
};
use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_MIN_DELAY_MS: u64 = 500;
const DEFAULT_MAX_DELAY_MS: u64 = 2000;

/// Configuration struct for run command to reduce argument count
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub preset: ConfigPreset,
    pub workers: Option<usize>,
    pub tasks: Option<usize>,
    pub publish_timeout_ms: Option<u64>,
    pub signal_timeout_ms: Option<u64>,
    pub queue_capacity: Option<usize>,
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub format: OutputFormat,
    pub strict: bool,
    pub quiet: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            preset: ConfigPreset::Default,
            workers: None,
            tasks: None,
            publish_timeout_ms: None,
            signal_timeout_ms: None,
            queue_capacity: None,
            min_delay_ms: None,
            max_delay_ms: None,
            format: OutputFormat::Text,
            strict: false,
            quiet: false,
        }
    }
}

impl RunConfig {
    /// プリセットにCLIの上書きを適用した処理設定
    pub fn processing_config(&self) -> DefaultProcessingConfig {
        let mut config = DefaultProcessingConfig::from_preset(self.preset);
        if let Some(workers) = self.workers {
            config = config.with_worker_count(workers);
        }
        if let Some(tasks) = self.tasks {
            config = config.with_task_count(tasks);
        }
        if let Some(ms) = self.publish_timeout_ms {
            config = config.with_publish_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.signal_timeout_ms {
            config = config.with_completion_signal_timeout(Duration::from_millis(ms));
        }
        if let Some(capacity) = self.queue_capacity {
            config = config.with_task_queue_capacity(capacity);
        }
        config.with_progress_reporting(!self.quiet)
    }

    /// 擬似処理の遅延
    ///
    /// 遅延の明示指定はどのプリセットでも優先する。未指定時、fast/stressは遅延なし。
    pub fn processor(&self) -> SimulatedProcessor {
        if self.min_delay_ms.is_none() && self.max_delay_ms.is_none() {
            return match self.preset {
                ConfigPreset::Fast | ConfigPreset::Stress => SimulatedProcessor::instant(),
                ConfigPreset::Default | ConfigPreset::Demo => SimulatedProcessor::new(),
            };
        }
        SimulatedProcessor::with_delay_range(
            self.min_delay_ms.unwrap_or(DEFAULT_MIN_DELAY_MS),
            self.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS),
        )
    }
}

/// プロセス終了コード
///
/// 投入中断は常に1。件数不一致は `--strict` 指定時のみ1。
pub fn exit_code(report: &ProcessingReport, strict: bool) -> i32 {
    if report.aborted.is_some() || (strict && !report.is_success()) {
        1
    } else {
        0
    }
}

/// Execute run command and print the final report to stdout
pub async fn execute_run(config: RunConfig) -> Result<i32> {
    let processing_config = config.processing_config();
    let reporter = if config.quiet {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    };

    tracing::info!(
        preset = ?config.preset,
        workers = processing_config.worker_count(),
        tasks = processing_config.task_count(),
        "[Main] starting run"
    );

    let store = MemoryResultStore::with_capacity(processing_config.task_count());
    let engine = ProcessingEngine::new(
        config.processor(),
        RandomLabelPayload::new(),
        processing_config,
        reporter,
        store,
    );

    let summary = engine.run().await.context("処理の実行に失敗しました")?;
    let report = ProcessingReport::from_summary(&summary);

    match config.format {
        OutputFormat::Text => print!("{}", report.render()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(exit_code(&report, config.strict))
}
