// Report - 最終レポートの組み立てと整形

use crate::core::{ProcessingSummary, TaskResult};
use serde::Serialize;
use std::fmt;

const RULE: &str = "========================================";

/// 最終判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    Mismatch,
}

/// ワーカーごとの処理件数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkerCount {
    pub worker_id: usize,
    pub tasks_processed: usize,
}

/// 凍結済みサマリーから作る最終レポート
///
/// 同じサマリーからは常に同じ出力になる。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingReport {
    pub expected_tasks: usize,
    pub processed_results: usize,
    pub worker_counts: Vec<WorkerCount>,
    pub results: Vec<TaskResult>,
    pub failed_tasks: usize,
    pub dropped_results: usize,
    pub completion_signals: usize,
    pub aborted: Option<String>,
    pub status: ReportStatus,
}

impl ProcessingReport {
    pub fn from_summary(summary: &ProcessingSummary) -> Self {
        let worker_counts = summary
            .per_worker_counts()
            .into_iter()
            .map(|(worker_id, tasks_processed)| WorkerCount {
                worker_id,
                tasks_processed,
            })
            .collect();

        let status = if summary.is_complete() {
            ReportStatus::Success
        } else {
            ReportStatus::Mismatch
        };

        Self {
            expected_tasks: summary.expected_tasks,
            processed_results: summary.processed_results(),
            worker_counts,
            results: summary.results.clone(),
            failed_tasks: summary.failed_tasks,
            dropped_results: summary.dropped_results,
            completion_signals: summary.completion_signals,
            aborted: summary.aborted.as_ref().map(ToString::to_string),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReportStatus::Success
    }

    /// 最終行（SUCCESS / WARNING）
    pub fn status_line(&self) -> &'static str {
        match self.status {
            ReportStatus::Success => "SUCCESS: All tasks processed successfully!",
            ReportStatus::Mismatch => "WARNING: Result count mismatch!",
        }
    }

    /// コンソール向けテキスト
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn write_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{RULE}")?;
        writeln!(out, "Processing Results")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Expected Tasks: {}", self.expected_tasks)?;
        writeln!(out, "Processed Results: {}", self.processed_results)?;
        writeln!(out)?;

        if self.processed_results == 0 && self.expected_tasks > 0 {
            writeln!(out, "WARNING: No results were collected!")?;
            writeln!(out)?;
        }

        writeln!(out, "Results by Worker Thread:")?;
        writeln!(out, "-------------------------")?;
        for count in &self.worker_counts {
            writeln!(
                out,
                "  Worker {}: {} tasks processed",
                count.worker_id, count.tasks_processed
            )?;
        }
        writeln!(out)?;

        writeln!(out, "All Results:")?;
        writeln!(out, "------------")?;
        for result in &self.results {
            writeln!(out, "  {result}")?;
        }
        writeln!(out)?;

        if self.failed_tasks > 0 || self.dropped_results > 0 {
            writeln!(
                out,
                "Failed Tasks: {}, Dropped Results: {}",
                self.failed_tasks, self.dropped_results
            )?;
        }
        if let Some(reason) = &self.aborted {
            writeln!(out, "Task generation aborted: {reason}")?;
        }

        writeln!(out, "{}", self.status_line())?;
        if self.status == ReportStatus::Mismatch {
            writeln!(
                out,
                "  Expected: {}, Actual: {}",
                self.expected_tasks, self.processed_results
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ProcessingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}
