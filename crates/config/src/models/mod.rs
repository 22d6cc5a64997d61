pub mod app_config;
pub mod building;
pub mod dispatcher_elevator;
pub mod observability;
pub mod simulation;

pub use app_config::*;
pub use building::*;
pub use dispatcher_elevator::*;
pub use observability::*;
pub use simulation::*;
