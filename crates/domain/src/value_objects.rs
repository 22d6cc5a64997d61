use std::fmt;

use serde::{Deserialize, Serialize};

/// 乘梯请求（一位乘客的一次乘梯），创建后不可变，只会被某台电梯消费一次
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RideRequest {
    pub id: u32,
    pub origin_floor: i32,
    pub destination_floor: i32,
    pub has_credential: bool,
}

impl RideRequest {
    pub fn new(id: u32, origin_floor: i32, destination_floor: i32, has_credential: bool) -> Self {
        Self {
            id,
            origin_floor,
            destination_floor,
            has_credential,
        }
    }

    pub fn travel_distance(&self) -> u32 {
        self.origin_floor.abs_diff(self.destination_floor)
    }
}

impl fmt::Display for RideRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Person {}] Floor {} → Destination: {}",
            self.id, self.origin_floor, self.destination_floor
        )
    }
}

/// 单台电梯的状态快照，仅用于选择和展示
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElevatorStatus {
    pub id: u32,
    pub current_floor: i32,
    pub busy: bool,
}

impl ElevatorStatus {
    pub fn is_idle(&self) -> bool {
        !self.busy
    }

    pub fn distance_to(&self, floor: i32) -> u32 {
        self.current_floor.abs_diff(floor)
    }
}

impl fmt::Display for ElevatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Elevator {}] at Floor {}", self.id, self.current_floor)?;
        if self.busy {
            write!(f, " (busy)")?;
        }
        Ok(())
    }
}
