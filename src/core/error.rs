// Custom error types for the batch pipeline
// バッチ処理パイプライン専用のカスタムエラー型定義

use thiserror::Error;

/// 結果を破棄した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// 結果キューが満杯
    QueueFull,
    /// 結果キューが既に閉じている
    QueueClosed,
}

impl DropReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QueueFull => "full",
            Self::QueueClosed => "closed",
        }
    }
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("タスク投入タイムアウト: task {task_id} ({timeout_ms}ms)")]
    PublishTimeout { task_id: u64, timeout_ms: u64 },

    #[error("タスク処理エラー: task {task_id} - {source}")]
    ProcessingFailed {
        task_id: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("結果破棄: task {task_id} (worker {worker_id}, queue {reason})")]
    ResultDropped {
        task_id: u64,
        worker_id: usize,
        reason: DropReason,
    },

    #[error("完了シグナル不足: {received}/{expected}")]
    CompletionSignalMissed { received: usize, expected: usize },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("チャンネルエラー: {message}")]
    ChannelError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("結果ストアエラー: {source}")]
    StoreError {
        #[source]
        source: anyhow::Error,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl ProcessingError {
    /// 投入タイムアウトの作成
    pub fn publish_timeout(task_id: u64, timeout: std::time::Duration) -> Self {
        Self::PublishTimeout {
            task_id,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// タスク処理エラーの作成
    pub fn processing_failed(task_id: u64, source: anyhow::Error) -> Self {
        Self::ProcessingFailed { task_id, source }
    }

    /// 結果破棄の作成
    pub fn result_dropped(task_id: u64, worker_id: usize, reason: DropReason) -> Self {
        Self::ResultDropped {
            task_id,
            worker_id,
            reason,
        }
    }

    /// 完了シグナル不足の作成
    pub fn completion_signal_missed(received: usize, expected: usize) -> Self {
        Self::CompletionSignalMissed { received, expected }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// チャンネルエラーの作成
    pub fn channel(message: impl Into<String>) -> Self {
        Self::ChannelError {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 結果ストアエラーの作成
    pub fn store(source: anyhow::Error) -> Self {
        Self::StoreError { source }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CompletionSignalMissed { .. } => ErrorSeverity::Low,
            Self::ProcessingFailed { .. } | Self::ResultDropped { .. } => ErrorSeverity::Medium,
            Self::PublishTimeout { .. } | Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::ChannelError { .. } | Self::TaskError { .. } | Self::StoreError { .. } => {
                ErrorSeverity::High
            }
            Self::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 発生箇所で封じ込められるか（バッチ全体を中断しないか）
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ProcessingFailed { .. }
            | Self::ResultDropped { .. }
            | Self::CompletionSignalMissed { .. } => true,
            Self::PublishTimeout { .. }
            | Self::ConfigurationError { .. }
            | Self::ChannelError { .. }
            | Self::TaskError { .. }
            | Self::StoreError { .. }
            | Self::InternalError { .. } => false,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - 診断用
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的
    Critical,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// パイプラインの結果型
pub type ProcessingResult<T> = std::result::Result<T, ProcessingError>;

impl From<anyhow::Error> for ProcessingError {
    fn from(error: anyhow::Error) -> Self {
        ProcessingError::InternalError { source: error }
    }
}

impl From<tokio::task::JoinError> for ProcessingError {
    fn from(error: tokio::task::JoinError) -> Self {
        ProcessingError::TaskError { source: error }
    }
}
