//! 固定大小的工作池
//!
//! `size` 个工作任务从容量为 `queue_capacity` 的有界队列中取任务执行；
//! 队列满时提交方等待空位（背压）。

use std::sync::Arc;
use std::time::Duration;

use elevator_domain::DrainOutcome;
use elevator_errors::{ElevatorError, ElevatorResult};
use futures::future::BoxFuture;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

pub type Job = BoxFuture<'static, ()>;

pub struct WorkerPool {
    size: usize,
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    workers: Mutex<Option<JoinSet<()>>>,
}

impl WorkerPool {
    /// 创建工作池并立即启动工作任务，必须在 Tokio 运行时内调用
    pub fn new(size: usize, queue_capacity: usize) -> Self {
        let size = size.max(1);
        let (sender, receiver) = mpsc::channel::<Job>(queue_capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = JoinSet::new();
        for worker_index in 0..size {
            let receiver = Arc::clone(&receiver);
            workers.spawn(async move {
                loop {
                    let job = receiver.lock().await.recv().await;
                    match job {
                        Some(job) => job.await,
                        None => {
                            debug!(worker_index, "任务队列已关闭，工作任务退出");
                            break;
                        }
                    }
                }
            });
        }

        Self {
            size,
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(Some(workers)),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// 提交任务；队列已满时等待，关闭后返回 [`ElevatorError::ShuttingDown`]
    pub async fn execute(&self, job: Job) -> ElevatorResult<()> {
        let sender = self
            .sender
            .lock()
            .await
            .clone()
            .ok_or(ElevatorError::ShuttingDown)?;

        sender
            .send(job)
            .await
            .map_err(|_| ElevatorError::ShuttingDown)
    }

    /// 关闭队列，在宽限期内等待已提交的任务执行完毕，超时后强制取消。
    ///
    /// 如果返回前本 future 被丢弃，工作任务同样会被取消。
    pub async fn shutdown(&self, grace_period: Duration) -> DrainOutcome {
        self.sender.lock().await.take();
        let Some(mut workers) = self.workers.lock().await.take() else {
            return DrainOutcome::AlreadyStopped;
        };

        info!("等待工作池排空（超时: {:?}）", grace_period);
        let drain = async {
            while let Some(result) = workers.join_next().await {
                if let Err(e) = result {
                    if e.is_panic() {
                        error!("工作任务异常退出: {}", e);
                    }
                }
            }
        };
        let drained = timeout(grace_period, drain).await.is_ok();

        if drained {
            info!("工作池已排空");
            DrainOutcome::Drained
        } else {
            warn!("工作池在 {:?} 内未排空，强制取消剩余任务", grace_period);
            workers.abort_all();
            while workers.join_next().await.is_some() {}
            DrainOutcome::ForceCancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use tokio::time::sleep;

    fn counting_job(counter: &Arc<AtomicUsize>) -> Job {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        .boxed()
    }

    #[tokio::test]
    async fn test_pool_executes_jobs() {
        let pool = WorkerPool::new(4, 16);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            pool.execute(counting_job(&counter)).await.expect("execute failed");
        }

        assert_eq!(pool.shutdown(Duration::from_secs(1)).await, DrainOutcome::Drained);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_applies_backpressure() {
        let pool = WorkerPool::new(1, 1);
        let gate = Arc::new(Notify::new());
        let counter = Arc::new(AtomicUsize::new(0));

        // 占住唯一的工作任务
        let blocker = {
            let gate = Arc::clone(&gate);
            async move { gate.notified().await }.boxed()
        };
        pool.execute(blocker).await.expect("execute failed");
        tokio::task::yield_now().await;

        // 填满队列
        pool.execute(counting_job(&counter)).await.expect("execute failed");

        // 队列已满，提交方被阻塞
        let blocked = timeout(Duration::from_millis(50), pool.execute(counting_job(&counter))).await;
        assert!(blocked.is_err());

        gate.notify_one();
        pool.execute(counting_job(&counter)).await.expect("execute failed");
        assert_eq!(pool.shutdown(Duration::from_secs(1)).await, DrainOutcome::Drained);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_force_cancels_after_grace() {
        let pool = WorkerPool::new(2, 4);
        let counter = Arc::new(AtomicUsize::new(0));

        let slow = {
            let counter = Arc::clone(&counter);
            async move {
                sleep(Duration::from_secs(60)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
            .boxed()
        };
        pool.execute(slow).await.expect("execute failed");

        assert_eq!(
            pool.shutdown(Duration::from_millis(100)).await,
            DrainOutcome::ForceCancelled
        );

        sleep(Duration::from_secs(120)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pool_rejects_after_shutdown() {
        let pool = WorkerPool::new(1, 1);
        assert_eq!(pool.size(), 1);
        assert_eq!(pool.shutdown(Duration::from_secs(1)).await, DrainOutcome::Drained);
        assert_eq!(pool.shutdown(Duration::from_secs(1)).await, DrainOutcome::AlreadyStopped);

        let counter = Arc::new(AtomicUsize::new(0));
        let result = pool.execute(counting_job(&counter)).await;
        assert!(matches!(result, Err(ElevatorError::ShuttingDown)));
    }
}
