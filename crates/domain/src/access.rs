use std::collections::BTreeSet;

/// 默认安全楼层
const DEFAULT_SECURE_FLOORS: [i32; 4] = [9, 10, 11, 12];

/// 门禁策略：安全楼层只有持卡乘客才能到达
///
/// 纯函数，启动时构建后只读，由所有电梯共享。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    secure_floors: BTreeSet<i32>,
}

impl AccessPolicy {
    pub fn new(secure_floors: impl IntoIterator<Item = i32>) -> Self {
        Self {
            secure_floors: secure_floors.into_iter().collect(),
        }
    }

    /// 不设任何安全楼层
    pub fn open() -> Self {
        Self {
            secure_floors: BTreeSet::new(),
        }
    }

    /// 当且仅当目标楼层是安全楼层且乘客没有门禁卡时返回 false
    pub fn is_permitted(&self, destination_floor: i32, has_credential: bool) -> bool {
        has_credential || !self.is_secure(destination_floor)
    }

    pub fn is_secure(&self, floor: i32) -> bool {
        self.secure_floors.contains(&floor)
    }

    pub fn secure_floors(&self) -> impl Iterator<Item = i32> + '_ {
        self.secure_floors.iter().copied()
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SECURE_FLOORS)
    }
}
