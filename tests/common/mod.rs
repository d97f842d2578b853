#![allow(dead_code)]

use httpmock::MockServer;
use pmm_api_tests::api::InventoryClient;
use pmm_api_tests::{Harness, Settings, Transport};
use url::Url;

pub const JSON: &str = "application/json";

/// Base URL of the mock server with `admin:admin` credentials.
pub fn mock_url(server: &MockServer) -> Url {
    Url::parse(&format!("http://admin:admin@{}/", server.address())).unwrap()
}

pub fn mock_transport(server: &MockServer) -> Transport {
    Transport::new(&mock_url(server), false).unwrap()
}

pub fn mock_inventory(server: &MockServer) -> InventoryClient {
    InventoryClient::new(mock_transport(server))
}

pub fn mock_settings(server: &MockServer) -> Settings {
    Settings {
        server_url: mock_url(server).to_string(),
        ..Default::default()
    }
}

/// Live PMM Server from `PMM_SERVER_URL`; used by `#[ignore]`d tests.
pub async fn live_harness() -> Harness {
    Harness::from_env()
        .await
        .expect("PMM Server is not available, set PMM_SERVER_URL")
}
