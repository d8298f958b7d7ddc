// タスク処理機能
// ペイロード生成と単一タスクの変換処理

pub mod payload;
pub mod worker;

// 公開API
pub use payload::{format_payload, RandomLabelPayload, SequentialPayload, DATA_LABELS};
pub use worker::{process_single_task, SimulatedProcessor, UppercaseProcessor};
