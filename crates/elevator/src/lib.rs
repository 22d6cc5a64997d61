pub mod builder;
pub mod elevator;
pub mod timer;

pub use builder::ElevatorBuilder;
pub use elevator::Elevator;
pub use timer::{BusyTimer, Lifecycle};
