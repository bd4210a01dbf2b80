pub mod orchestrator;
pub mod relay;
pub mod session;
pub mod transition;

pub use orchestrator::SessionOrchestrator;
pub use relay::EventRelay;
pub use session::{Session, SessionEvent, SessionPhase};
pub use transition::RoleTransitionEngine;
