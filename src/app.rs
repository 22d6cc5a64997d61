use std::sync::Arc;

use anyhow::{Context, Result};
use elevator_config::AppConfig;
use elevator_dispatcher::{Dispatcher, ShutdownReport};
use elevator_domain::{AccessPolicy, DispatchOutcome};
use tracing::{debug, info, warn};

use crate::shutdown::ShutdownListener;
use crate::simulation::RequestGenerator;

/// 一次模拟运行的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// 已生成并提交的请求数
    pub submitted: usize,
    pub assigned: usize,
    /// 没有空闲电梯而被丢弃
    pub dropped: usize,
    /// 调度器关闭后被拒绝
    pub rejected: usize,
    /// 收到外部关闭信号而提前结束
    pub interrupted: bool,
    pub report: ShutdownReport,
}

/// 电梯模拟应用
pub struct Application {
    config: AppConfig,
    dispatcher: Dispatcher,
    generator: RequestGenerator,
}

impl Application {
    /// 根据配置创建调度器并注册全部电梯，电梯初始楼层随机
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!("初始化电梯模拟应用");

        let mut generator =
            RequestGenerator::new(&config.building, config.simulation.seed);
        let mut dispatcher = Dispatcher::from_config(&config);
        let policy = Arc::new(AccessPolicy::new(
            config.building.secure_floors.iter().copied(),
        ));

        for id in 1..=config.elevator.count as u32 {
            let elevator = dispatcher
                .elevator_builder(&config)
                .id(id)
                .initial_floor(generator.random_floor())
                .access_policy(Arc::clone(&policy))
                .build()
                .with_context(|| format!("创建电梯 {id} 失败"))?;

            dispatcher
                .add_elevator(elevator)
                .await
                .with_context(|| format!("注册电梯 {id} 失败"))?;
        }

        info!("已注册 {} 部电梯", dispatcher.elevator_count());

        Ok(Self {
            config,
            dispatcher,
            generator,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// 提交随机请求，等待电梯运行一段时间后关闭调度器
    pub async fn run(mut self, mut shutdown: ShutdownListener) -> Result<RunSummary> {
        info!("开始电梯模拟");
        self.log_status("[Initial Status]").await;

        let mut submitted = 0;
        let mut assigned = 0;
        let mut dropped = 0;
        let mut rejected = 0;
        let mut interrupted = false;

        for id in 1..=self.config.simulation.request_count as u32 {
            if shutdown.is_triggered() {
                interrupted = true;
                break;
            }

            let request = self.generator.next_request(id);
            info!("[Request] {}", request);
            submitted += 1;

            match self.dispatcher.submit(request).await {
                Ok(DispatchOutcome::Assigned { elevator_id }) => {
                    debug!("请求 {} 分配给电梯 {}", id, elevator_id);
                    assigned += 1;
                }
                Ok(DispatchOutcome::NoAvailableElevator) => dropped += 1,
                Err(e) if e.is_fatal() => return Err(e).context("提交乘梯请求失败"),
                Err(e) => {
                    warn!(request_id = id, "请求被拒绝: {} ({})", e.user_message(), e);
                    rejected += 1;
                }
            }
        }

        if !interrupted {
            let settle_time = self.config.simulation.settle_time();
            debug!("等待电梯运行 {:?}", settle_time);
            tokio::select! {
                _ = tokio::time::sleep(settle_time) => {}
                _ = shutdown.triggered() => {
                    info!("收到关闭信号，提前结束模拟");
                    interrupted = true;
                }
            }
        }

        let report = self.dispatcher.shutdown().await;

        self.log_status("[Final Status]").await;

        let summary = RunSummary {
            submitted,
            assigned,
            dropped,
            rejected,
            interrupted,
            report,
        };
        info!(
            "模拟结束: 提交 {}, 分配 {}, 丢弃 {}, 拒绝 {}",
            summary.submitted, summary.assigned, summary.dropped, summary.rejected
        );

        Ok(summary)
    }

    async fn log_status(&self, title: &str) {
        info!("{}", title);
        for status in self.dispatcher.status().await {
            info!("{}", status);
        }
    }
}
