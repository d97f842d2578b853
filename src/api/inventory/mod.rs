//! Inventory API: nodes, services and agents registered in PMM Server.

pub mod agents;
pub mod nodes;
pub mod services;

use crate::core::transport::Transport;

pub use agents::AgentsClient;
pub use nodes::NodesClient;
pub use services::ServicesClient;

#[derive(Debug, Clone)]
pub struct InventoryClient {
    pub nodes: NodesClient,
    pub services: ServicesClient,
    pub agents: AgentsClient,
}

impl InventoryClient {
    pub fn new(transport: Transport) -> Self {
        Self {
            nodes: NodesClient::new(transport.clone()),
            services: ServicesClient::new(transport.clone()),
            agents: AgentsClient::new(transport),
        }
    }
}
