//! Typed clients for the PMM Server JSON API.

pub mod alertmanager;
pub mod inventory;
pub mod management;
pub mod server;

use std::collections::HashMap;

pub use alertmanager::AlertmanagerClient;
pub use inventory::InventoryClient;
pub use management::ManagementClient;
pub use server::ServerClient;

pub type CustomLabels = HashMap<String, String>;

/// Empty JSON object returned by remove operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Empty {}
