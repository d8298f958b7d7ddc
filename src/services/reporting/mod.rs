// レポート機能
// 完了統計の集計とテキスト/JSON整形

pub mod report;

// 公開API
pub use report::{ProcessingReport, ReportStatus, WorkerCount};
