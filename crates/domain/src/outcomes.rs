use serde::{Deserialize, Serialize};

/// 单次乘梯的结果。门禁拒绝是正常结果，不是错误。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServeOutcome {
    Delivered {
        origin_floor: i32,
        destination_floor: i32,
    },
    AccessDenied {
        destination_floor: i32,
    },
    /// 电梯未启动或已停止，状态未改变
    OutOfService,
}

impl ServeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServeOutcome::Delivered { .. } => "delivered",
            ServeOutcome::AccessDenied { .. } => "access_denied",
            ServeOutcome::OutOfService => "out_of_service",
        }
    }
}

/// 调度器对一次提交的处理结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DispatchOutcome {
    Assigned { elevator_id: u32 },
    /// 没有空闲电梯：请求被丢弃，不重试、不排队
    NoAvailableElevator,
}

impl DispatchOutcome {
    pub fn elevator_id(&self) -> Option<u32> {
        match self {
            DispatchOutcome::Assigned { elevator_id } => Some(*elevator_id),
            DispatchOutcome::NoAvailableElevator => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Assigned { .. } => "assigned",
            DispatchOutcome::NoAvailableElevator => "no_available_elevator",
        }
    }
}

/// 关闭时排空后台任务的结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrainOutcome {
    /// 宽限期内全部完成
    Drained,
    /// 超过宽限期，剩余任务被强制取消
    ForceCancelled,
    /// 之前已经停止过，本次为空操作
    AlreadyStopped,
}

impl DrainOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrainOutcome::Drained => "drained",
            DrainOutcome::ForceCancelled => "force_cancelled",
            DrainOutcome::AlreadyStopped => "already_stopped",
        }
    }
}
