use crate::core::transport::Transport;
use crate::utils::error::Result;
use bytes::Bytes;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    pub version: String,
    pub full_version: String,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersionResponse {
    pub version: String,
    pub server: Option<VersionInfo>,
    pub managed: Option<VersionInfo>,
    pub distribution_method: String,
}

#[derive(Debug, Clone)]
pub struct ServerClient {
    transport: Transport,
}

impl ServerClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Succeeds once pmm-managed and its dependencies are up.
    pub async fn readiness(&self) -> Result<()> {
        self.transport
            .get::<serde_json::Value>("Readiness", "v1/readyz")
            .await
            .map(|_| ())
    }

    pub async fn version(&self) -> Result<VersionResponse> {
        self.transport.get("Version", "v1/version").await
    }

    /// Server logs as a zip archive.
    pub async fn logs(&self) -> Result<Bytes> {
        self.transport.get_bytes("Logs", "logs.zip").await
    }
}
