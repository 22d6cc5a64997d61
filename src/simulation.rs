use elevator_config::BuildingConfig;
use elevator_domain::RideRequest;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 随机生成电梯初始楼层和乘梯请求
pub struct RequestGenerator {
    rng: StdRng,
    min_floor: i32,
    max_floor: i32,
}

impl RequestGenerator {
    /// 指定种子时结果可复现
    pub fn new(building: &BuildingConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            rng,
            min_floor: building.min_floor,
            max_floor: building.max_floor,
        }
    }

    pub fn random_floor(&mut self) -> i32 {
        self.rng.random_range(self.min_floor..=self.max_floor)
    }

    pub fn next_request(&mut self, id: u32) -> RideRequest {
        let origin_floor = self.random_floor();
        let destination_floor = self.random_floor();
        let has_credential = self.rng.random_bool(0.5);
        RideRequest::new(id, origin_floor, destination_floor, has_credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_stay_in_building() {
        let building = BuildingConfig {
            min_floor: -2,
            max_floor: 3,
            secure_floors: vec![3],
        };
        let mut generator = RequestGenerator::new(&building, None);

        for id in 0..200 {
            let request = generator.next_request(id);
            assert_eq!(request.id, id);
            assert!(building.contains(request.origin_floor));
            assert!(building.contains(request.destination_floor));
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let building = BuildingConfig::default();
        let mut a = RequestGenerator::new(&building, Some(42));
        let mut b = RequestGenerator::new(&building, Some(42));

        let first: Vec<_> = (0..20).map(|id| a.next_request(id)).collect();
        let second: Vec<_> = (0..20).map(|id| b.next_request(id)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_floor_building() {
        let building = BuildingConfig {
            min_floor: 5,
            max_floor: 5,
            secure_floors: vec![],
        };
        let mut generator = RequestGenerator::new(&building, Some(1));
        assert_eq!(generator.random_floor(), 5);
    }
}
