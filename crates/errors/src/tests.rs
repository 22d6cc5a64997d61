#[cfg(test)]
mod error_tests {
    use crate::*;

    #[test]
    fn test_elevator_error_display() {
        let floor_error = ElevatorError::invalid_floor(15, 1, 12);
        assert_eq!(floor_error.to_string(), "楼层超出范围: 15 (有效范围 1..=12)");

        let duplicate_error = ElevatorError::duplicate_elevator(3);
        assert_eq!(duplicate_error.to_string(), "电梯编号重复: 3");

        let stopped_error = ElevatorError::ElevatorStopped { id: 2 };
        assert_eq!(stopped_error.to_string(), "电梯已停止服务: 2");

        let shutdown_error = ElevatorError::ShuttingDown;
        assert_eq!(shutdown_error.to_string(), "调度系统正在关闭，拒绝新的请求");

        let config_error = ElevatorError::config_error("pool_size must be greater than 0");
        assert_eq!(
            config_error.to_string(),
            "配置错误: pool_size must be greater than 0"
        );
    }

    #[test]
    fn test_is_fatal() {
        assert!(ElevatorError::Internal("boom".to_string()).is_fatal());
        assert!(ElevatorError::config_error("bad").is_fatal());

        // 业务层面的拒绝不应该终止进程
        assert!(!ElevatorError::ShuttingDown.is_fatal());
        assert!(!ElevatorError::invalid_floor(0, 1, 12).is_fatal());
        assert!(!ElevatorError::ElevatorNotFound { id: 4 }.is_fatal());
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            ElevatorError::ShuttingDown.user_message(),
            "系统正在关闭，请稍后重试"
        );
        assert_eq!(
            ElevatorError::invalid_floor(99, 1, 12).user_message(),
            "请求的楼层不存在"
        );
        assert_eq!(
            ElevatorError::Internal("x".to_string()).user_message(),
            "系统繁忙，请稍后重试"
        );
    }

    #[test]
    fn test_from_anyhow() {
        let err: ElevatorError = anyhow::anyhow!("config file missing").into();
        assert!(matches!(err, ElevatorError::Internal(ref msg) if msg == "config file missing"));
    }

    #[test]
    fn test_result_alias() {
        fn reject() -> ElevatorResult<()> {
            Err(ElevatorError::ShuttingDown)
        }
        assert!(reject().is_err());
    }
}
