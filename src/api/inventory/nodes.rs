use crate::api::{CustomLabels, Empty};
use crate::core::transport::Transport;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericNode {
    pub node_id: String,
    pub node_name: String,
    pub address: String,
    pub machine_id: String,
    pub distro: String,
    pub node_model: String,
    pub region: String,
    pub az: String,
    pub custom_labels: CustomLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerNode {
    pub node_id: String,
    pub node_name: String,
    pub address: String,
    pub machine_id: String,
    pub container_id: String,
    pub container_name: String,
    pub node_model: String,
    pub region: String,
    pub az: String,
    pub custom_labels: CustomLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteNode {
    pub node_id: String,
    pub node_name: String,
    pub address: String,
    pub node_model: String,
    pub region: String,
    pub az: String,
    pub custom_labels: CustomLabels,
}

/// Exactly one field is set, depending on the node type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeRecord {
    pub generic: Option<GenericNode>,
    pub container: Option<ContainerNode>,
    pub remote: Option<RemoteNode>,
}

impl NodeRecord {
    pub fn node_id(&self) -> Option<&str> {
        self.generic
            .as_ref()
            .map(|n| n.node_id.as_str())
            .or_else(|| self.container.as_ref().map(|n| n.node_id.as_str()))
            .or_else(|| self.remote.as_ref().map(|n| n.node_id.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListNodesOk {
    pub generic: Vec<GenericNode>,
    pub container: Vec<ContainerNode>,
    pub remote: Vec<RemoteNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddGenericNodeBody {
    pub node_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub machine_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub distro: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node_model: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub az: String,
    #[serde(skip_serializing_if = "CustomLabels::is_empty")]
    pub custom_labels: CustomLabels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddGenericNodeOk {
    pub generic: GenericNode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddRemoteNodeBody {
    pub node_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node_model: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub az: String,
    #[serde(skip_serializing_if = "CustomLabels::is_empty")]
    pub custom_labels: CustomLabels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddRemoteNodeOk {
    pub remote: RemoteNode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveNodeBody {
    pub node_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListNodesBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NodesClient {
    transport: Transport,
}

impl NodesClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn add_generic_node(&self, body: &AddGenericNodeBody) -> Result<AddGenericNodeOk> {
        self.transport
            .post("AddGenericNode", "v1/inventory/Nodes/AddGeneric", body)
            .await
    }

    pub async fn add_remote_node(&self, body: &AddRemoteNodeBody) -> Result<AddRemoteNodeOk> {
        self.transport
            .post("AddRemoteNode", "v1/inventory/Nodes/AddRemote", body)
            .await
    }

    pub async fn get_node(&self, node_id: &str) -> Result<NodeRecord> {
        self.transport
            .post(
                "GetNode",
                "v1/inventory/Nodes/Get",
                &serde_json::json!({ "node_id": node_id }),
            )
            .await
    }

    pub async fn list_nodes(&self, body: &ListNodesBody) -> Result<ListNodesOk> {
        self.transport
            .post("ListNodes", "v1/inventory/Nodes/List", body)
            .await
    }

    pub async fn remove_node(&self, body: &RemoveNodeBody) -> Result<Empty> {
        self.transport
            .post("RemoveNode", "v1/inventory/Nodes/Remove", body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_body_omits_empty_fields() {
        let body = AddGenericNodeBody {
            node_name: "node-1".to_string(),
            address: "10.0.0.1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"node_name": "node-1", "address": "10.0.0.1"})
        );

        let remove = RemoveNodeBody {
            node_id: "/node_id/1".to_string(),
            force: false,
        };
        assert_eq!(serde_json::to_value(&remove).unwrap(), json!({"node_id": "/node_id/1"}));
    }

    #[test]
    fn test_node_record_id() {
        let record: NodeRecord =
            serde_json::from_value(json!({"remote": {"node_id": "/node_id/r", "node_name": "r"}}))
                .unwrap();
        assert_eq!(record.node_id(), Some("/node_id/r"));
        assert!(record.generic.is_none());

        assert_eq!(NodeRecord::default().node_id(), None);
    }

    #[test]
    fn test_list_tolerates_missing_groups() {
        let list: ListNodesOk =
            serde_json::from_value(json!({"generic": [{"node_id": "pmm-server", "node_name": "pmm-server"}]}))
                .unwrap();
        assert_eq!(list.generic.len(), 1);
        assert!(list.remote.is_empty());
    }
}
