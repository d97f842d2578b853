//! Helpers for inventory tests: create test objects, clean them up, and
//! check list responses.
//!
//! Like test assertions, these panic on failure. Removal helpers try every ID
//! before failing so one stale object doesn't leak the rest.

use crate::api::inventory::agents::{
    AddMysqldExporterBody, AddMysqldExporterOk, AddPmmAgentBody, ListAgentsOk, PmmAgent,
    RemoveAgentBody,
};
use crate::api::inventory::nodes::{
    AddGenericNodeBody, AddRemoteNodeBody, GenericNode, RemoteNode, RemoveNodeBody,
};
use crate::api::inventory::services::{
    AddMySqlServiceBody, ListServicesOk, MySqlService, RemoveServiceBody,
};
use crate::api::InventoryClient;
use crate::utils::error::ApiTestError;
use uuid::Uuid;

/// `test-for-<hostname>-<name>-<uuid>`
pub fn with_uuid(hostname: &str, name: &str) -> String {
    format!("test-for-{}-{}-{}", hostname, name, Uuid::new_v4())
}

fn fail_all(what: &str, failures: Vec<String>) {
    if !failures.is_empty() {
        panic!("Failed to remove {}:\n{}", what, failures.join("\n"));
    }
}

pub async fn remove_nodes(client: &InventoryClient, node_ids: &[&str]) {
    let mut failures = Vec::new();
    for node_id in node_ids {
        let body = RemoveNodeBody {
            node_id: node_id.to_string(),
            force: false,
        };
        if let Err(e) = client.nodes.remove_node(&body).await {
            tracing::error!("Failed to remove node {}: {}", node_id, e);
            failures.push(format!("{}: {}", node_id, e));
        }
    }
    fail_all("nodes", failures);
}

pub async fn add_generic_node(client: &InventoryClient, node_name: &str) -> GenericNode {
    let body = AddGenericNodeBody {
        node_name: node_name.to_string(),
        ..Default::default()
    };
    match client.nodes.add_generic_node(&body).await {
        Ok(res) => res.generic,
        Err(e) => panic!("Failed to add generic node {}: {}", node_name, e),
    }
}

pub async fn add_remote_node(client: &InventoryClient, node_name: &str) -> RemoteNode {
    let body = AddRemoteNodeBody {
        node_name: node_name.to_string(),
        ..Default::default()
    };
    match client.nodes.add_remote_node(&body).await {
        Ok(res) => res.remote,
        Err(e) => panic!("Failed to add remote node {}: {}", node_name, e),
    }
}

pub async fn remove_services(client: &InventoryClient, service_ids: &[&str]) {
    let mut failures = Vec::new();
    for service_id in service_ids {
        let body = RemoveServiceBody {
            service_id: service_id.to_string(),
            force: false,
        };
        if let Err(e) = client.services.remove_service(&body).await {
            tracing::error!("Failed to remove service {}: {}", service_id, e);
            failures.push(format!("{}: {}", service_id, e));
        }
    }
    fail_all("services", failures);
}

pub async fn add_mysql_service(client: &InventoryClient, body: AddMySqlServiceBody) -> MySqlService {
    match client.services.add_mysql_service(&body).await {
        Ok(res) => res.mysql,
        Err(e) => panic!("Failed to add MySQL service {}: {}", body.service_name, e),
    }
}

pub async fn remove_agents(client: &InventoryClient, agent_ids: &[&str]) {
    let mut failures = Vec::new();
    for agent_id in agent_ids {
        let body = RemoveAgentBody {
            agent_id: agent_id.to_string(),
            force: false,
        };
        if let Err(e) = client.agents.remove_agent(&body).await {
            tracing::error!("Failed to remove agent {}: {}", agent_id, e);
            failures.push(format!("{}: {}", agent_id, e));
        }
    }
    fail_all("agents", failures);
}

pub async fn add_pmm_agent(client: &InventoryClient, node_id: &str) -> PmmAgent {
    let body = AddPmmAgentBody {
        runs_on_node_id: node_id.to_string(),
        ..Default::default()
    };
    match client.agents.add_pmm_agent(&body).await {
        Ok(res) => res.pmm_agent,
        Err(e) => panic!("Failed to add pmm-agent on node {}: {}", node_id, e),
    }
}

pub async fn add_mysqld_exporter(
    client: &InventoryClient,
    body: AddMysqldExporterBody,
) -> AddMysqldExporterOk {
    match client.agents.add_mysqld_exporter(&body).await {
        Ok(res) => res,
        Err(e) => panic!("Failed to add mysqld_exporter for {}: {}", body.service_id, e),
    }
}

/// Asserts that `result` failed with an API error carrying `expected_code`.
#[track_caller]
pub fn assert_equal_api_error<T: std::fmt::Debug>(
    result: &Result<T, ApiTestError>,
    expected_code: u16,
) {
    match result {
        Ok(value) => panic!("Expected API error {}, got success: {:?}", expected_code, value),
        Err(ApiTestError::ApiError { code, .. }) => assert_eq!(
            *code, expected_code,
            "Unexpected API error code: {}",
            result.as_ref().err().map(ToString::to_string).unwrap_or_default()
        ),
        Err(e) => panic!("Expected API error {}, got {:?}", expected_code, e),
    }
}

pub fn has_mysql_service(res: &ListServicesOk, service_id: &str) -> bool {
    res.mysql.iter().any(|s| s.service_id == service_id)
}

pub fn has_mysqld_exporter(res: &ListAgentsOk, agent_id: &str) -> bool {
    res.mysqld_exporter.iter().any(|a| a.agent_id == agent_id)
}

pub fn has_pmm_agent(res: &ListAgentsOk, agent_id: &str) -> bool {
    res.pmm_agent.iter().any(|a| a.agent_id == agent_id)
}

#[track_caller]
pub fn assert_mysql_service_exists(res: &ListServicesOk, service_id: &str) {
    assert!(
        has_mysql_service(res, service_id),
        "There should be MySQL service with id `{}`",
        service_id
    );
}

#[track_caller]
pub fn assert_mysql_service_not_exist(res: &ListServicesOk, service_id: &str) {
    assert!(
        !has_mysql_service(res, service_id),
        "There should not be MySQL service with id `{}`",
        service_id
    );
}

#[track_caller]
pub fn assert_mysql_exporter_exists(res: &ListAgentsOk, agent_id: &str) {
    assert!(
        has_mysqld_exporter(res, agent_id),
        "There should be MySQL agent with id `{}`",
        agent_id
    );
}

#[track_caller]
pub fn assert_mysql_exporter_not_exists(res: &ListAgentsOk, agent_id: &str) {
    assert!(
        !has_mysqld_exporter(res, agent_id),
        "There should not be MySQL agent with id `{}`",
        agent_id
    );
}

#[track_caller]
pub fn assert_pmm_agent_exists(res: &ListAgentsOk, agent_id: &str) {
    assert!(
        has_pmm_agent(res, agent_id),
        "There should be PMM-agent with id `{}`",
        agent_id
    );
}

#[track_caller]
pub fn assert_pmm_agent_not_exists(res: &ListAgentsOk, agent_id: &str) {
    assert!(
        !has_pmm_agent(res, agent_id),
        "There should not be PMM-agent with id `{}`",
        agent_id
    );
}
