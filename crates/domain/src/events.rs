//! 领域事件
//!
//! 电梯接客、到达、门禁拒绝等可观测事件，通过 [`EventBus`] 广播给订阅者

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::RideRequest;

/// 领域事件基础trait
pub trait DomainEvent: Send + Sync {
    fn event_type(&self) -> &str;
    fn occurred_at(&self) -> DateTime<Utc>;
    fn aggregate_id(&self) -> String;
}

/// 乘梯相关事件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RideEvent {
    PickedUp {
        elevator_id: u32,
        request_id: u32,
        floor: i32,
        occurred_at: DateTime<Utc>,
    },
    Arrived {
        elevator_id: u32,
        request_id: u32,
        floor: i32,
        occurred_at: DateTime<Utc>,
    },
    AccessDenied {
        elevator_id: u32,
        request_id: u32,
        floor: i32,
        occurred_at: DateTime<Utc>,
    },
    BusyCleared {
        elevator_id: u32,
        occurred_at: DateTime<Utc>,
    },
    NoAvailableElevator {
        request_id: u32,
        origin_floor: i32,
        occurred_at: DateTime<Utc>,
    },
    ShutdownTimeout {
        component: String,
        occurred_at: DateTime<Utc>,
    },
}

impl RideEvent {
    pub fn picked_up(elevator_id: u32, request: &RideRequest) -> Self {
        RideEvent::PickedUp {
            elevator_id,
            request_id: request.id,
            floor: request.origin_floor,
            occurred_at: Utc::now(),
        }
    }

    pub fn arrived(elevator_id: u32, request: &RideRequest) -> Self {
        RideEvent::Arrived {
            elevator_id,
            request_id: request.id,
            floor: request.destination_floor,
            occurred_at: Utc::now(),
        }
    }

    pub fn access_denied(elevator_id: u32, request: &RideRequest) -> Self {
        RideEvent::AccessDenied {
            elevator_id,
            request_id: request.id,
            floor: request.destination_floor,
            occurred_at: Utc::now(),
        }
    }

    pub fn busy_cleared(elevator_id: u32) -> Self {
        RideEvent::BusyCleared {
            elevator_id,
            occurred_at: Utc::now(),
        }
    }

    pub fn no_available_elevator(request: &RideRequest) -> Self {
        RideEvent::NoAvailableElevator {
            request_id: request.id,
            origin_floor: request.origin_floor,
            occurred_at: Utc::now(),
        }
    }

    pub fn shutdown_timeout(component: impl Into<String>) -> Self {
        RideEvent::ShutdownTimeout {
            component: component.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn elevator_id(&self) -> Option<u32> {
        match self {
            RideEvent::PickedUp { elevator_id, .. }
            | RideEvent::Arrived { elevator_id, .. }
            | RideEvent::AccessDenied { elevator_id, .. }
            | RideEvent::BusyCleared { elevator_id, .. } => Some(*elevator_id),
            RideEvent::NoAvailableElevator { .. } | RideEvent::ShutdownTimeout { .. } => None,
        }
    }
}

impl DomainEvent for RideEvent {
    fn event_type(&self) -> &str {
        match self {
            RideEvent::PickedUp { .. } => "PickedUp",
            RideEvent::Arrived { .. } => "Arrived",
            RideEvent::AccessDenied { .. } => "AccessDenied",
            RideEvent::BusyCleared { .. } => "BusyCleared",
            RideEvent::NoAvailableElevator { .. } => "NoAvailableElevator",
            RideEvent::ShutdownTimeout { .. } => "ShutdownTimeout",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            RideEvent::PickedUp { occurred_at, .. }
            | RideEvent::Arrived { occurred_at, .. }
            | RideEvent::AccessDenied { occurred_at, .. }
            | RideEvent::BusyCleared { occurred_at, .. }
            | RideEvent::NoAvailableElevator { occurred_at, .. }
            | RideEvent::ShutdownTimeout { occurred_at, .. } => *occurred_at,
        }
    }

    fn aggregate_id(&self) -> String {
        match self {
            RideEvent::NoAvailableElevator { request_id, .. } => format!("request-{request_id}"),
            RideEvent::ShutdownTimeout { component, .. } => component.clone(),
            other => match other.elevator_id() {
                Some(id) => format!("elevator-{id}"),
                None => String::new(),
            },
        }
    }
}

/// 事件总线容量
const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// 基于 broadcast 的事件总线，克隆后共享同一通道
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<RideEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RideEvent> {
        self.tx.subscribe()
    }

    /// 发布事件；没有订阅者时直接丢弃
    pub fn publish(&self, event: RideEvent) {
        trace!("发布事件: {}", event.event_type());
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
