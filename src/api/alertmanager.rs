use crate::core::transport::Transport;
use crate::utils::error::Result;
use serde_json::Value;

pub const ALERTMANAGER_BASE_PATH: &str = "/alertmanager/api/v2";

/// Client for the Alertmanager API proxied by PMM Server. Payloads are left
/// untyped.
#[derive(Debug, Clone)]
pub struct AlertmanagerClient {
    transport: Transport,
}

impl AlertmanagerClient {
    /// `transport` must already point at [`ALERTMANAGER_BASE_PATH`].
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn status(&self) -> Result<Value> {
        self.transport.get("getStatus", "status").await
    }

    pub async fn alerts(&self) -> Result<Vec<Value>> {
        self.transport.get("getAlerts", "alerts").await
    }
}
