//! Web dashboard for the streaming catalog.
//!
//! Loads the catalog once at startup and serves a single page of summary
//! statistics and charts, plus the same data as JSON.

pub mod config;
pub mod dashboard;
pub mod http;

pub use config::ServerConfig;
pub use dashboard::{render_dashboard, DashboardError, DashboardSummary, DEFAULT_TOP_N};
pub use http::{route, serve, AppState, Reply};
