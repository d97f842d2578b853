use crate::api::{CustomLabels, Empty};
use crate::core::transport::Transport;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySqlService {
    pub service_id: String,
    pub service_name: String,
    pub node_id: String,
    pub address: String,
    pub port: u32,
    pub socket: String,
    pub environment: String,
    pub cluster: String,
    pub replication_set: String,
    pub custom_labels: CustomLabels,
}

/// Only MySQL services are typed; other kinds pass through as JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceRecord {
    pub mysql: Option<MySqlService>,
    pub mongodb: Option<Value>,
    pub postgresql: Option<Value>,
    pub proxysql: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListServicesOk {
    pub mysql: Vec<MySqlService>,
    pub mongodb: Vec<Value>,
    pub postgresql: Vec<Value>,
    pub proxysql: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddMySqlServiceBody {
    pub service_name: String,
    pub node_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub port: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub socket: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub environment: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub replication_set: String,
    #[serde(skip_serializing_if = "CustomLabels::is_empty")]
    pub custom_labels: CustomLabels,
}

fn is_zero(port: &u32) -> bool {
    *port == 0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddMySqlServiceOk {
    pub mysql: MySqlService,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveServiceBody {
    pub service_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListServicesBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServicesClient {
    transport: Transport,
}

impl ServicesClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn add_mysql_service(&self, body: &AddMySqlServiceBody) -> Result<AddMySqlServiceOk> {
        self.transport
            .post("AddMySQLService", "v1/inventory/Services/AddMySQL", body)
            .await
    }

    pub async fn get_service(&self, service_id: &str) -> Result<ServiceRecord> {
        self.transport
            .post(
                "GetService",
                "v1/inventory/Services/Get",
                &serde_json::json!({ "service_id": service_id }),
            )
            .await
    }

    pub async fn list_services(&self, body: &ListServicesBody) -> Result<ListServicesOk> {
        self.transport
            .post("ListServices", "v1/inventory/Services/List", body)
            .await
    }

    pub async fn remove_service(&self, body: &RemoveServiceBody) -> Result<Empty> {
        self.transport
            .post("RemoveService", "v1/inventory/Services/Remove", body)
            .await
    }
}
