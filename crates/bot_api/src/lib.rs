pub mod error;
pub mod remote;
pub mod services;
pub mod traits;

pub use error::ApiError;
pub use remote::dashboard_client::DashboardClient;
pub use traits::ControlBackend;
