// 結果保存機能
// 結果キューの収集と共有コレクションへの追加

pub mod collector;
pub mod implementations;

// 公開API
pub use collector::spawn_result_collector;
pub use implementations::MemoryResultStore;
