use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElevatorError {
    #[error("楼层超出范围: {floor} (有效范围 {min}..={max})")]
    InvalidFloor { floor: i32, min: i32, max: i32 },
    #[error("电梯编号重复: {id}")]
    DuplicateElevator { id: u32 },
    #[error("电梯未找到: {id}")]
    ElevatorNotFound { id: u32 },
    #[error("电梯已停止服务: {id}")]
    ElevatorStopped { id: u32 },
    #[error("调度系统正在关闭，拒绝新的请求")]
    ShuttingDown,
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type ElevatorResult<T> = Result<T, ElevatorError>;

impl ElevatorError {
    pub fn invalid_floor(floor: i32, min: i32, max: i32) -> Self {
        Self::InvalidFloor { floor, min, max }
    }
    pub fn duplicate_elevator(id: u32) -> Self {
        Self::DuplicateElevator { id }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    /// 致命错误应终止模拟，其余只拒绝当前请求
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ElevatorError::Internal(_) | ElevatorError::Configuration(_)
        )
    }
    pub fn user_message(&self) -> &str {
        match self {
            ElevatorError::InvalidFloor { .. } => "请求的楼层不存在",
            ElevatorError::DuplicateElevator { .. } => "电梯编号已被占用",
            ElevatorError::ElevatorNotFound { .. } => "请求的电梯不存在",
            ElevatorError::ElevatorStopped { .. } => "电梯暂停服务",
            ElevatorError::ShuttingDown => "系统正在关闭，请稍后重试",
            _ => "系统繁忙，请稍后重试",
        }
    }
}

impl From<anyhow::Error> for ElevatorError {
    fn from(err: anyhow::Error) -> Self {
        ElevatorError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests;
