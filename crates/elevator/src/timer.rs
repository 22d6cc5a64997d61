//! 单槽延时任务计时器
//!
//! 每台电梯独占一个，用于在模拟行程结束后清除 busy 标志。

use std::future::Future;
use std::time::Duration;

use elevator_domain::DrainOutcome;
use elevator_errors::{ElevatorError, ElevatorResult};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, timeout, Instant};
use tracing::{debug, warn};

/// 计时器生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Running,
    Draining,
    Stopped,
}

/// 被丢弃时自动取消的后台任务
struct PendingAction {
    handle: JoinHandle<()>,
}

impl Drop for PendingAction {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct TimerSlot {
    lifecycle: Lifecycle,
    pending: Option<PendingAction>,
}

pub struct BusyTimer {
    owner_id: u32,
    delay: Duration,
    grace_period: Duration,
    slot: Mutex<TimerSlot>,
}

impl BusyTimer {
    pub fn new(owner_id: u32, delay: Duration, grace_period: Duration) -> Self {
        Self {
            owner_id,
            delay,
            grace_period,
            slot: Mutex::new(TimerSlot {
                lifecycle: Lifecycle::Created,
                pending: None,
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn lifecycle(&self) -> Lifecycle {
        self.slot.lock().await.lifecycle
    }

    pub async fn is_running(&self) -> bool {
        self.lifecycle().await == Lifecycle::Running
    }

    /// 启动计时器，重复调用无副作用；已停止的计时器不能重新启动
    pub async fn start(&self) -> ElevatorResult<()> {
        let mut slot = self.slot.lock().await;
        match slot.lifecycle {
            Lifecycle::Created => {
                slot.lifecycle = Lifecycle::Running;
                Ok(())
            }
            Lifecycle::Running => Ok(()),
            Lifecycle::Draining | Lifecycle::Stopped => Err(ElevatorError::ElevatorStopped {
                id: self.owner_id,
            }),
        }
    }

    /// 在 `delay` 之后执行 `action`，立即返回。
    ///
    /// 槽位只保留一个待执行任务：新任务会取消尚未触发的旧任务。
    pub async fn schedule<F>(&self, action: F) -> ElevatorResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.slot.lock().await;
        if slot.lifecycle != Lifecycle::Running {
            return Err(ElevatorError::ElevatorStopped { id: self.owner_id });
        }

        let deadline = Instant::now() + self.delay;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            action.await;
        });

        if slot.pending.replace(PendingAction { handle }).is_some() {
            debug!(elevator_id = self.owner_id, "替换尚未触发的延时任务");
        }
        Ok(())
    }

    /// 停止计时器：在宽限期内等待待执行任务完成，超时则强制取消。
    ///
    /// 返回后不会再有任务触发。重复调用返回 [`DrainOutcome::AlreadyStopped`]。
    pub async fn stop(&self) -> DrainOutcome {
        let pending = {
            let mut slot = self.slot.lock().await;
            match slot.lifecycle {
                Lifecycle::Draining | Lifecycle::Stopped => return DrainOutcome::AlreadyStopped,
                Lifecycle::Created | Lifecycle::Running => {}
            }
            slot.lifecycle = Lifecycle::Draining;
            slot.pending.take()
        };

        let outcome = match pending {
            None => DrainOutcome::Drained,
            Some(mut pending) => {
                match timeout(self.grace_period, &mut pending.handle).await {
                    Ok(_) => DrainOutcome::Drained,
                    Err(_) => {
                        warn!(
                            elevator_id = self.owner_id,
                            "延时任务在 {:?} 宽限期内未完成，强制取消", self.grace_period
                        );
                        pending.handle.abort();
                        let _ = (&mut pending.handle).await;
                        DrainOutcome::ForceCancelled
                    }
                }
            }
        };

        self.slot.lock().await.lifecycle = Lifecycle::Stopped;
        outcome
    }
}
