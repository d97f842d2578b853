use crate::api::{CustomLabels, Empty};
use crate::core::transport::Transport;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmmAgent {
    pub agent_id: String,
    pub runs_on_node_id: String,
    pub connected: bool,
    pub custom_labels: CustomLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeExporter {
    pub agent_id: String,
    pub pmm_agent_id: String,
    pub disabled: bool,
    pub custom_labels: CustomLabels,
    pub status: String,
    pub listen_port: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MysqldExporter {
    pub agent_id: String,
    pub pmm_agent_id: String,
    pub disabled: bool,
    pub service_id: String,
    pub username: String,
    pub tls: bool,
    pub tls_skip_verify: bool,
    pub custom_labels: CustomLabels,
    pub status: String,
    pub listen_port: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentRecord {
    pub pmm_agent: Option<PmmAgent>,
    pub node_exporter: Option<NodeExporter>,
    pub mysqld_exporter: Option<MysqldExporter>,
    pub qan_mysql_perfschema_agent: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListAgentsOk {
    pub pmm_agent: Vec<PmmAgent>,
    pub node_exporter: Vec<NodeExporter>,
    pub mysqld_exporter: Vec<MysqldExporter>,
    pub mongodb_exporter: Vec<Value>,
    pub postgres_exporter: Vec<Value>,
    pub proxysql_exporter: Vec<Value>,
    pub qan_mysql_perfschema_agent: Vec<Value>,
    pub qan_mysql_slowlog_agent: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddPmmAgentBody {
    pub runs_on_node_id: String,
    #[serde(skip_serializing_if = "CustomLabels::is_empty")]
    pub custom_labels: CustomLabels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPmmAgentOk {
    pub pmm_agent: PmmAgent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddMysqldExporterBody {
    pub pmm_agent_id: String,
    pub service_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub tls: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub tls_skip_verify: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip_connection_check: bool,
    #[serde(skip_serializing_if = "CustomLabels::is_empty")]
    pub custom_labels: CustomLabels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddMysqldExporterOk {
    pub mysqld_exporter: MysqldExporter,
    #[serde(default)]
    pub table_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveAgentBody {
    pub agent_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListAgentsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmm_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AgentsClient {
    transport: Transport,
}

impl AgentsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn add_pmm_agent(&self, body: &AddPmmAgentBody) -> Result<AddPmmAgentOk> {
        self.transport
            .post("AddPMMAgent", "v1/inventory/Agents/AddPMMAgent", body)
            .await
    }

    pub async fn add_mysqld_exporter(
        &self,
        body: &AddMysqldExporterBody,
    ) -> Result<AddMysqldExporterOk> {
        self.transport
            .post("AddMySQLdExporter", "v1/inventory/Agents/AddMySQLdExporter", body)
            .await
    }

    pub async fn get_agent(&self, agent_id: &str) -> Result<AgentRecord> {
        self.transport
            .post(
                "GetAgent",
                "v1/inventory/Agents/Get",
                &serde_json::json!({ "agent_id": agent_id }),
            )
            .await
    }

    pub async fn list_agents(&self, body: &ListAgentsBody) -> Result<ListAgentsOk> {
        self.transport
            .post("ListAgents", "v1/inventory/Agents/List", body)
            .await
    }

    pub async fn remove_agent(&self, body: &RemoveAgentBody) -> Result<Empty> {
        self.transport
            .post("RemoveAgent", "v1/inventory/Agents/Remove", body)
            .await
    }
}
