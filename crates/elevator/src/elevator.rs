use std::sync::Arc;

use elevator_domain::{
    AccessPolicy, DrainOutcome, ElevatorStatus, EventBus, RideEvent, RideRequest, ServeOutcome,
};
use elevator_errors::ElevatorResult;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::builder::ElevatorBuilder;
use crate::timer::{BusyTimer, Lifecycle};

/// 电梯的可变状态，只能通过 [`Elevator::serve`] 和延时清除任务修改
#[derive(Debug)]
struct ElevatorState {
    current_floor: i32,
    busy: bool,
}

/// 单台电梯
///
/// `(current_floor, busy)` 由电梯自己的互斥锁保护，不存在跨电梯的锁。
/// 同一台电梯上的 `serve` 调用严格串行。
pub struct Elevator {
    id: u32,
    state: Arc<Mutex<ElevatorState>>,
    timer: BusyTimer,
    policy: Arc<AccessPolicy>,
    events: EventBus,
}

impl Elevator {
    pub fn builder() -> ElevatorBuilder {
        ElevatorBuilder::new()
    }

    pub(crate) fn new(
        id: u32,
        initial_floor: i32,
        timer: BusyTimer,
        policy: Arc<AccessPolicy>,
        events: EventBus,
    ) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(ElevatorState {
                current_floor: initial_floor,
                busy: false,
            })),
            timer,
            policy,
            events,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub async fn current_floor(&self) -> i32 {
        self.state.lock().await.current_floor
    }

    pub async fn is_busy(&self) -> bool {
        self.state.lock().await.busy
    }

    /// 一次加锁读取楼层和 busy，两者一致
    pub async fn status(&self) -> ElevatorStatus {
        let state = self.state.lock().await;
        ElevatorStatus {
            id: self.id,
            current_floor: state.current_floor,
            busy: state.busy,
        }
    }

    pub async fn lifecycle(&self) -> Lifecycle {
        self.timer.lifecycle().await
    }

    pub async fn start(&self) -> ElevatorResult<()> {
        self.timer.start().await?;
        debug!(elevator_id = self.id, "电梯已启动");
        Ok(())
    }

    /// 执行一次乘梯。
    ///
    /// 在电梯锁内完成门禁检查、接客和到达，并安排延时清除 busy；
    /// 锁释放后立即返回，不等待行程结束。
    pub async fn serve(&self, request: RideRequest) -> ServeOutcome {
        let mut state = self.state.lock().await;

        if !self
            .policy
            .is_permitted(request.destination_floor, request.has_credential)
        {
            warn!(
                elevator_id = self.id,
                request_id = request.id,
                "[Elevator {}] Access Denied to Floor {}",
                self.id,
                request.destination_floor
            );
            self.events.publish(RideEvent::access_denied(self.id, &request));
            return self.record(ServeOutcome::AccessDenied {
                destination_floor: request.destination_floor,
            });
        }

        let state_handle = Arc::clone(&self.state);
        let events = self.events.clone();
        let elevator_id = self.id;
        let clear_busy = async move {
            state_handle.lock().await.busy = false;
            debug!(elevator_id, "行程结束，电梯空闲");
            events.publish(RideEvent::busy_cleared(elevator_id));
        };

        // 先安排清除任务：它需要这把锁，在本次修改完成之前不会生效
        if let Err(e) = self.timer.schedule(clear_busy).await {
            warn!(elevator_id = self.id, request_id = request.id, "电梯不可用: {}", e);
            return self.record(ServeOutcome::OutOfService);
        }

        info!(
            elevator_id = self.id,
            request_id = request.id,
            "[Elevator {}] Picking up {}",
            self.id,
            request
        );
        state.current_floor = request.origin_floor;
        self.events.publish(RideEvent::picked_up(self.id, &request));

        info!(
            elevator_id = self.id,
            request_id = request.id,
            "[Elevator {}] Moving to Destination Floor {}",
            self.id,
            request.destination_floor
        );
        state.current_floor = request.destination_floor;
        state.busy = true;
        self.events.publish(RideEvent::arrived(self.id, &request));

        self.record(ServeOutcome::Delivered {
            origin_floor: request.origin_floor,
            destination_floor: request.destination_floor,
        })
    }

    /// 停止电梯的延时任务，宽限期后强制取消；可重复调用
    pub async fn stop(&self) -> DrainOutcome {
        let outcome = self.timer.stop().await;
        match outcome {
            DrainOutcome::Drained => {
                info!(elevator_id = self.id, "[Elevator {}] Shutdown completed.", self.id);
            }
            DrainOutcome::ForceCancelled => {
                warn!(
                    elevator_id = self.id,
                    "[Elevator {}] Shutdown forced after grace period.", self.id
                );
                self.events
                    .publish(RideEvent::shutdown_timeout(format!("elevator-{}", self.id)));
            }
            DrainOutcome::AlreadyStopped => {
                debug!(elevator_id = self.id, "电梯已经停止过");
            }
        }
        outcome
    }

    fn record(&self, outcome: ServeOutcome) -> ServeOutcome {
        metrics::counter!("elevator_rides_total", "outcome" => outcome.as_str()).increment(1);
        outcome
    }
}

impl std::fmt::Debug for Elevator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elevator")
            .field("id", &self.id)
            .field("travel_delay", &self.timer.delay())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn running_elevator(id: u32, floor: i32) -> Elevator {
        let elevator = Elevator::builder()
            .id(id)
            .initial_floor(floor)
            .travel_delay(Duration::from_millis(1000))
            .build()
            .expect("build failed");
        elevator.start().await.expect("start failed");
        elevator
    }

    #[tokio::test]
    async fn test_status_snapshot() {
        let elevator = running_elevator(7, 3).await;
        let status = elevator.status().await;
        assert_eq!(status.id, 7);
        assert_eq!(status.current_floor, 3);
        assert!(!status.busy);
    }

    #[tokio::test]
    async fn test_denied_request_leaves_state_unchanged() {
        let elevator = running_elevator(1, 4).await;

        let outcome = elevator.serve(RideRequest::new(1, 2, 11, false)).await;
        assert_eq!(outcome, ServeOutcome::AccessDenied { destination_floor: 11 });
        assert_eq!(elevator.current_floor().await, 4);
        assert!(!elevator.is_busy().await);
    }

    #[tokio::test]
    async fn test_serve_before_start_is_out_of_service() {
        let elevator = Elevator::builder()
            .id(1)
            .initial_floor(1)
            .build()
            .expect("build failed");

        let outcome = elevator.serve(RideRequest::new(1, 1, 5, false)).await;
        assert_eq!(outcome, ServeOutcome::OutOfService);
        assert_eq!(elevator.current_floor().await, 1);
        assert!(!elevator.is_busy().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_granted_request_moves_and_marks_busy() {
        let elevator = running_elevator(1, 1).await;

        let outcome = elevator.serve(RideRequest::new(1, 3, 10, true)).await;
        assert_eq!(
            outcome,
            ServeOutcome::Delivered {
                origin_floor: 3,
                destination_floor: 10
            }
        );
        assert_eq!(elevator.current_floor().await, 10);
        assert!(elevator.is_busy().await);
        assert_eq!(elevator.lifecycle().await, Lifecycle::Running);
    }
}
