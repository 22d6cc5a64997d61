//! 外部关闭信号
//!
//! 信号处理任务持有 [`ShutdownTrigger`]，模拟流程持有 [`ShutdownListener`]。
//! 信号只会触发一次，之后一直保持触发状态。

use tokio::sync::watch;
use tracing::{debug, info};

pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownListener) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownListener { rx })
}

pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    /// 触发关闭，重复调用无副作用
    pub fn trigger(&self) {
        if self.tx.send_replace(true) {
            debug!("关闭信号已经触发过");
        } else {
            info!("触发模拟关闭");
        }
    }
}

#[derive(Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// 等待关闭信号；触发端未触发就被丢弃时永远不会返回
    pub async fn triggered(&mut self) {
        if self.rx.wait_for(|triggered| *triggered).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
