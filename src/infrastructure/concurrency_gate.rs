//! 并发闸门 - 基础设施层
//!
//! 持有唯一的请求槽位资源（Semaphore），只暴露"获取槽位"的能力

use crate::error::{AppError, AppResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// 并发闸门
///
/// 职责：
/// - 限制同时进行中的请求数量
/// - 统计当前进行中的数量与历史峰值
/// - 不认识页面 / 记录
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    limit: usize,
}

/// 请求槽位
///
/// drop 时归还槽位并更新计数。
#[derive(Debug)]
pub struct GatePermit {
    in_flight: Arc<AtomicUsize>,
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyGate {
    /// 创建新的并发闸门
    pub fn new(limit: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            limit,
        }
    }

    /// 等待并获取一个槽位
    pub async fn acquire(&self) -> AppResult<GatePermit> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AppError::GateClosed)?;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);

        Ok(GatePermit {
            in_flight: self.in_flight.clone(),
            _permit: permit,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 当前持有槽位的数量
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// 历史最大同时持有数量
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready_ok, task};

    #[tokio::test]
    async fn test_permit_drop_releases_slot() {
        let gate = ConcurrencyGate::new(2);

        let first = gate.acquire().await.unwrap();
        let second = gate.acquire().await.unwrap();
        assert_eq!(gate.in_flight(), 2);

        drop(first);
        assert_eq!(gate.in_flight(), 1);
        drop(second);
        assert_eq!(gate.in_flight(), 0);
        assert_eq!(gate.peak(), 2);
    }

    #[test]
    fn test_acquire_queues_when_full() {
        let gate = ConcurrencyGate::new(1);

        let mut first = task::spawn(gate.acquire());
        let held = assert_ready_ok!(first.poll());

        // 闸门已满，第二个请求必须排队
        let mut second = task::spawn(gate.acquire());
        assert_pending!(second.poll());

        drop(held);
        assert!(second.is_woken());
        let _held = assert_ready_ok!(second.poll());
        assert_eq!(gate.in_flight(), 1);
        assert_eq!(gate.peak(), 1);
    }

    #[tokio::test]
    async fn test_peak_never_exceeds_limit() {
        let gate = ConcurrencyGate::new(3);
        let mut handles = Vec::new();

        for _ in 0..12 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                let _permit = gate.acquire().await.unwrap();
                tokio::time::sleep(Duration::from_millis(10)).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(gate.peak() <= gate.limit());
        assert!(gate.peak() >= 1);
        assert_eq!(gate.in_flight(), 0);
    }
}
