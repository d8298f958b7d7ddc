// 結果保存の具象実装

use crate::core::{ResultStore, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// メモリ内に到着順で結果を保持する実装
///
/// クローンは同じ保存領域を共有する。ロックはpushの間だけ保持する。
#[derive(Debug, Clone, Default)]
pub struct MemoryResultStore {
    results: Arc<Mutex<Vec<TaskResult>>>,
    finalized: Arc<AtomicBool>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 予想件数分の領域を確保して作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::with_capacity(capacity))),
            finalized: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::Acquire)
    }

    /// 特定のタスクの結果が保存されているか
    pub fn contains_task(&self, task_id: u64) -> bool {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|result| result.task_id == task_id)
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn append(&self, result: TaskResult) -> Result<()> {
        if self.is_finalized() {
            anyhow::bail!("result store already finalized (task {})", result.task_id);
        }
        self.results
            .lock()
            .map_err(|_| anyhow::anyhow!("result store mutex poisoned"))?
            .push(result);
        Ok(())
    }

    fn snapshot(&self) -> Vec<TaskResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn stored_count(&self) -> usize {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    async fn finalize(&self) -> Result<()> {
        self.finalized.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_preserves_arrival_order() {
        let store = MemoryResultStore::new();

        store.append(TaskResult::new(3, "c", 1)).await.unwrap();
        store.append(TaskResult::new(1, "a", 2)).await.unwrap();
        store.append(TaskResult::new(2, "b", 1)).await.unwrap();

        let ids: Vec<u64> = store.snapshot().iter().map(|r| r.task_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(store.stored_count(), 3);
        assert!(store.contains_task(1));
        assert!(!store.contains_task(4));
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = MemoryResultStore::with_capacity(2);
        let shared = store.clone();

        shared.append(TaskResult::new(1, "a", 1)).await.unwrap();

        assert_eq!(store.stored_count(), 1);
    }

    #[tokio::test]
    async fn test_append_after_finalize_fails() {
        let store = MemoryResultStore::new();
        store.finalize().await.unwrap();

        assert!(store.is_finalized());
        let error = store.append(TaskResult::new(1, "a", 1)).await.unwrap_err();
        assert!(error.to_string().contains("finalized"));
        assert_eq!(store.stored_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let store = MemoryResultStore::new();
        let mut handles = Vec::new();

        for worker_id in 1..=4usize {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..25u64 {
                    let task_id = (worker_id as u64 - 1) * 25 + i + 1;
                    store.append(TaskResult::new(task_id, "x", worker_id)).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.stored_count(), 100);
    }
}
