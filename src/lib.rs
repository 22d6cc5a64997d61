pub mod app;
pub mod shutdown;
pub mod simulation;

pub use app::{Application, RunSummary};
pub use shutdown::{shutdown_channel, ShutdownListener, ShutdownTrigger};
pub use simulation::RequestGenerator;
