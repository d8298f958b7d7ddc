// Payload - タスクペイロード生成機能

use crate::core::PayloadGenerator;
use rand::seq::IndexedRandom;

/// ペイロードに付与するデータ種別ラベル
pub const DATA_LABELS: [&str; 6] = ["Text", "Number", "Image", "Video", "Audio", "Document"];

/// `Data-{id}-{label}` 形式のペイロードを作る
pub fn format_payload(task_id: u64, label: &str) -> String {
    format!("Data-{task_id}-{label}")
}

/// ラベルをランダムに選ぶ実装
#[derive(Debug, Default, Clone)]
pub struct RandomLabelPayload;

impl RandomLabelPayload {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadGenerator for RandomLabelPayload {
    fn generate(&self, task_id: u64) -> String {
        let label = DATA_LABELS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(DATA_LABELS[0]);
        format_payload(task_id, label)
    }
}

/// IDに応じてラベルを循環させる決定的な実装
#[derive(Debug, Default, Clone)]
pub struct SequentialPayload;

impl SequentialPayload {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadGenerator for SequentialPayload {
    fn generate(&self, task_id: u64) -> String {
        let index = (task_id as usize).wrapping_sub(1) % DATA_LABELS.len();
        format_payload(task_id, DATA_LABELS[index])
    }
}
