use elevator_domain::{ElevatorStatus, RideRequest};
use tracing::debug;

/// 电梯选择策略
pub trait SelectionStrategy: Send + Sync {
    /// 从候选快照中选择一台电梯，返回电梯编号；没有合适的电梯时返回 None
    fn select(&self, request: &RideRequest, candidates: &[ElevatorStatus]) -> Option<u32>;

    /// 获取策略名称
    fn name(&self) -> &str;
}

/// 最近空闲电梯策略：在空闲电梯中选择离起始楼层最近的一台，
/// 距离相同时取注册顺序靠前的一台
pub struct NearestIdleStrategy;

impl NearestIdleStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NearestIdleStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for NearestIdleStrategy {
    fn select(&self, request: &RideRequest, candidates: &[ElevatorStatus]) -> Option<u32> {
        if candidates.is_empty() {
            debug!("没有已注册的电梯");
            return None;
        }

        // min_by_key 在距离相同时返回第一个元素
        let selected = candidates
            .iter()
            .filter(|status| status.is_idle())
            .min_by_key(|status| status.distance_to(request.origin_floor))?;

        debug!(
            "最近空闲策略选择电梯: {} (所在楼层: {}, 距离: {})",
            selected.id,
            selected.current_floor,
            selected.distance_to(request.origin_floor)
        );

        Some(selected.id)
    }

    fn name(&self) -> &str {
        "NearestIdle"
    }
}
