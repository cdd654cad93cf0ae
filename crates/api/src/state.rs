use std::sync::Arc;

use influx_notify::{Notifier, SmsGateway};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is a pool handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: influx_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound email.
    pub notifier: Arc<dyn Notifier>,
    /// Outbound SMS.
    pub sms: Arc<dyn SmsGateway>,
}
