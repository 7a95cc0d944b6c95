pub mod dashboard_client;

pub use dashboard_client::DashboardClient;
