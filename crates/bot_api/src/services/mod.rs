pub mod control_service;
pub mod poll_service;

pub use control_service::ControlService;
pub use poll_service::PollService;
