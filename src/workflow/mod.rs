pub mod drugs;
pub mod export;
pub mod orchestrator;
pub mod state;

pub use orchestrator::Orchestrator;
pub use state::{ResultCycle, ViewState};
