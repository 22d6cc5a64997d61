use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use elevator_config::{AppConfig, DispatcherConfig};
use elevator_domain::{
    DispatchOutcome, DrainOutcome, ElevatorStatus, EventBus, RideEvent, RideRequest,
};
use elevator_errors::{ElevatorError, ElevatorResult};
use elevator_unit::{Elevator, ElevatorBuilder};
use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::pool::WorkerPool;
use crate::strategies::{NearestIdleStrategy, SelectionStrategy};

/// 关闭结果汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    /// 之前已经关闭过，本次没有执行任何停止动作
    pub already_shut_down: bool,
    pub pool: DrainOutcome,
    pub elevators: Vec<(u32, DrainOutcome)>,
}

impl ShutdownReport {
    fn already_shut_down() -> Self {
        Self {
            already_shut_down: true,
            pool: DrainOutcome::AlreadyStopped,
            elevators: Vec::new(),
        }
    }

    /// 是否有组件在宽限期后被强制取消
    pub fn forced(&self) -> bool {
        self.pool == DrainOutcome::ForceCancelled
            || self
                .elevators
                .iter()
                .any(|(_, outcome)| *outcome == DrainOutcome::ForceCancelled)
    }
}

type Teardown = Shared<BoxFuture<'static, ShutdownReport>>;

/// 电梯调度器
///
/// 电梯集合只在启动阶段通过 [`Dispatcher::add_elevator`] 写入，运行期间只读，
/// 因此 `submit`/`status` 不需要额外同步。
pub struct Dispatcher {
    config: DispatcherConfig,
    elevators: Vec<Arc<Elevator>>,
    strategy: Arc<dyn SelectionStrategy>,
    pool: Arc<WorkerPool>,
    events: EventBus,
    shutting_down: AtomicBool,
    teardown: OnceLock<Teardown>,
}

impl Dispatcher {
    /// 创建调度器并启动工作池，必须在 Tokio 运行时内调用
    pub fn new(config: DispatcherConfig, events: EventBus) -> Self {
        let pool = Arc::new(WorkerPool::new(config.pool_size, config.queue_capacity));
        info!(
            "创建调度器: 工作池大小 {}, 队列容量 {}",
            config.pool_size, config.queue_capacity
        );

        Self {
            config,
            elevators: Vec::new(),
            strategy: Arc::new(NearestIdleStrategy::new()),
            pool,
            events,
            shutting_down: AtomicBool::new(false),
            teardown: OnceLock::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.dispatcher.clone(), EventBus::default())
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn SelectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    /// 按配置预设好参数、并接入本调度器事件总线的电梯构建器
    pub fn elevator_builder(&self, config: &AppConfig) -> ElevatorBuilder {
        ElevatorBuilder::with_config(&config.elevator, &config.building).events(self.events())
    }

    /// 注册并启动电梯，只能在开始调度之前调用
    pub async fn add_elevator(&mut self, elevator: Elevator) -> ElevatorResult<()> {
        if self.elevators.iter().any(|e| e.id() == elevator.id()) {
            return Err(ElevatorError::duplicate_elevator(elevator.id()));
        }

        elevator.start().await?;
        info!(
            elevator_id = elevator.id(),
            "注册电梯 {}，初始楼层 {}",
            elevator.id(),
            elevator.current_floor().await
        );
        self.elevators.push(Arc::new(elevator));
        Ok(())
    }

    pub fn elevator_count(&self) -> usize {
        self.elevators.len()
    }

    pub fn elevator(&self, id: u32) -> Option<&Arc<Elevator>> {
        self.elevators.iter().find(|e| e.id() == id)
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// 为请求选择电梯并交给工作池异步执行，不等待乘梯完成。
    ///
    /// 没有空闲电梯时请求被丢弃并返回 [`DispatchOutcome::NoAvailableElevator`]；
    /// 工作池队列已满时等待空位。
    pub async fn submit(&self, request: RideRequest) -> ElevatorResult<DispatchOutcome> {
        if self.is_shutting_down() {
            warn!(request_id = request.id, "调度系统正在关闭，拒绝请求 {}", request);
            return Err(ElevatorError::ShuttingDown);
        }

        let candidates = self.status().await;
        let Some(elevator_id) = self.strategy.select(&request, &candidates) else {
            warn!(
                request_id = request.id,
                "没有空闲电梯，丢弃请求 {} (策略: {})",
                request,
                self.strategy.name()
            );
            self.events.publish(RideEvent::no_available_elevator(&request));
            return Ok(self.record(DispatchOutcome::NoAvailableElevator));
        };

        let elevator = self
            .elevator(elevator_id)
            .cloned()
            .ok_or(ElevatorError::ElevatorNotFound { id: elevator_id })?;

        let job = async move {
            elevator.serve(request).await;
        }
        .boxed();
        self.pool.execute(job).await?;

        debug!(
            request_id = request.id,
            elevator_id, "请求 {} 已分配给电梯 {}", request.id, elevator_id
        );
        Ok(self.record(DispatchOutcome::Assigned { elevator_id }))
    }

    /// 所有电梯的状态快照（按注册顺序），不保证跨电梯的原子性
    pub async fn status(&self) -> Vec<ElevatorStatus> {
        let mut snapshot = Vec::with_capacity(self.elevators.len());
        for elevator in &self.elevators {
            snapshot.push(elevator.status().await);
        }
        snapshot
    }

    /// 关闭调度系统：
    /// 1. 停止接收新请求
    /// 2. 在宽限期内排空工作池，超时则强制取消
    /// 3. 停止所有电梯的延时任务
    ///
    /// 停止流程在独立任务中执行，调用方的 future 被丢弃后流程仍会走完。
    /// 只有第一次调用返回完整报告；之后的调用等待同一流程结束，不重复执行停止动作。
    pub async fn shutdown(&self) -> ShutdownReport {
        let first = !self.shutting_down.swap(true, Ordering::AcqRel);
        if first {
            info!("开始关闭调度系统");
        }

        let teardown = self.teardown.get_or_init(|| self.spawn_teardown()).clone();
        let report = teardown.await;

        if first {
            report
        } else {
            debug!("调度系统已经触发过关闭");
            ShutdownReport::already_shut_down()
        }
    }

    fn spawn_teardown(&self) -> Teardown {
        let handle = tokio::spawn(Self::run_teardown(
            Arc::clone(&self.pool),
            self.elevators.clone(),
            self.events.clone(),
            self.config.shutdown_grace_period(),
        ));

        async move {
            match handle.await {
                Ok(report) => report,
                Err(e) => {
                    error!("关闭流程异常退出: {}", e);
                    ShutdownReport {
                        already_shut_down: false,
                        pool: DrainOutcome::ForceCancelled,
                        elevators: Vec::new(),
                    }
                }
            }
        }
        .boxed()
        .shared()
    }

    async fn run_teardown(
        pool: Arc<WorkerPool>,
        elevators: Vec<Arc<Elevator>>,
        events: EventBus,
        grace_period: Duration,
    ) -> ShutdownReport {
        let pool = pool.shutdown(grace_period).await;
        if pool == DrainOutcome::ForceCancelled {
            events.publish(RideEvent::shutdown_timeout("worker-pool"));
        }

        // 并发停止，总耗时上限为一个电梯宽限期
        let elevators = join_all(
            elevators
                .iter()
                .map(|elevator| async move { (elevator.id(), elevator.stop().await) }),
        )
        .await;

        let report = ShutdownReport {
            already_shut_down: false,
            pool,
            elevators,
        };
        if report.forced() {
            warn!("部分任务在宽限期内未完成，已强制取消");
        }
        info!("[Elevator System] Shutdown complete.");
        report
    }

    fn record(&self, outcome: DispatchOutcome) -> DispatchOutcome {
        metrics::counter!("elevator_dispatch_total", "outcome" => outcome.as_str()).increment(1);
        outcome
    }
}
