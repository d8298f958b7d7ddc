// 設定管理機能
// ワーカー数・タスク数・タイムアウト等の実行パラメーター

pub mod implementations;

// 公開API
pub use implementations::{validate_config, ConfigPreset, DefaultProcessingConfig};
