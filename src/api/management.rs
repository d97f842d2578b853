use crate::core::transport::Transport;
use crate::utils::error::Result;
use serde::Serialize;

use super::Empty;

/// Removes a service together with its agents. Either the ID or the name
/// identifies the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveServiceBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_name: String,
}

#[derive(Debug, Clone)]
pub struct ManagementClient {
    transport: Transport,
}

impl ManagementClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn remove_service(&self, body: &RemoveServiceBody) -> Result<Empty> {
        self.transport
            .post("RemoveService", "v1/management/Service/Remove", body)
            .await
    }
}
