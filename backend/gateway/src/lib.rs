//! PriceFeed Gateway HTTP Server
//!
//! Hosts channel webhooks and the health endpoint.

pub mod health_api;
pub mod server;

pub use health_api::HealthReport;
pub use server::{GatewayState, build_router, start_server};
