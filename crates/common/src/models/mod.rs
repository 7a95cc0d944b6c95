pub mod control;
pub mod signal;
pub mod view_event;

pub use control::ControlIntent;
pub use signal::SignalEvent;
pub use view_event::ViewEvent;
