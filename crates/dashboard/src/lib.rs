pub mod lookup;
pub mod reconciler;
pub mod router;
pub mod services;
pub mod signal_feed;
pub mod surface;
