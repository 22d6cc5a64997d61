use std::sync::Arc;
use std::time::Duration;

use elevator_config::{BuildingConfig, ElevatorConfig};
use elevator_domain::{AccessPolicy, EventBus};
use elevator_errors::{ElevatorError, ElevatorResult};

use crate::elevator::Elevator;
use crate::timer::BusyTimer;

const DEFAULT_TRAVEL_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_STOP_GRACE_PERIOD: Duration = Duration::from_secs(3);

/// 电梯构建器
///
/// ```ignore
/// let elevator = Elevator::builder()
///     .id(1)
///     .initial_floor(5)
///     .events(dispatcher.events())
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ElevatorBuilder {
    id: Option<u32>,
    initial_floor: i32,
    travel_delay: Duration,
    stop_grace_period: Duration,
    floor_range: Option<(i32, i32)>,
    policy: Option<Arc<AccessPolicy>>,
    events: Option<EventBus>,
}

impl ElevatorBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            initial_floor: 1,
            travel_delay: DEFAULT_TRAVEL_DELAY,
            stop_grace_period: DEFAULT_STOP_GRACE_PERIOD,
            floor_range: None,
            policy: None,
            events: None,
        }
    }

    /// 从配置中读取行程时间、宽限期、楼层范围和安全楼层
    pub fn with_config(elevator: &ElevatorConfig, building: &BuildingConfig) -> Self {
        Self::new()
            .travel_delay(elevator.travel_delay())
            .stop_grace_period(elevator.stop_grace_period())
            .floor_range(building.min_floor, building.max_floor)
            .access_policy(Arc::new(AccessPolicy::new(
                building.secure_floors.iter().copied(),
            )))
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn initial_floor(mut self, floor: i32) -> Self {
        self.initial_floor = floor;
        self
    }

    pub fn travel_delay(mut self, delay: Duration) -> Self {
        self.travel_delay = delay;
        self
    }

    pub fn stop_grace_period(mut self, grace_period: Duration) -> Self {
        self.stop_grace_period = grace_period;
        self
    }

    pub fn floor_range(mut self, min_floor: i32, max_floor: i32) -> Self {
        self.floor_range = Some((min_floor, max_floor));
        self
    }

    pub fn access_policy(mut self, policy: Arc<AccessPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> ElevatorResult<Elevator> {
        let id = self
            .id
            .ok_or_else(|| ElevatorError::config_error("elevator id is required"))?;

        if let Some((min, max)) = self.floor_range {
            if !(min..=max).contains(&self.initial_floor) {
                return Err(ElevatorError::invalid_floor(self.initial_floor, min, max));
            }
        }

        Ok(Elevator::new(
            id,
            self.initial_floor,
            BusyTimer::new(id, self.travel_delay, self.stop_grace_period),
            self.policy.unwrap_or_default(),
            self.events.unwrap_or_default(),
        ))
    }
}

impl Default for ElevatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
