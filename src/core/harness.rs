use crate::api::alertmanager::ALERTMANAGER_BASE_PATH;
use crate::api::{AlertmanagerClient, InventoryClient, ManagementClient, ServerClient};
use crate::config::Settings;
use crate::core::shutdown;
use crate::core::transport::Transport;
use crate::utils::error::{ApiTestError, Result};
use crate::utils::logger;
use std::future::Future;
use sysinfo::System;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Everything a test needs to talk to PMM Server.
///
/// Built once per test (each `#[tokio::test]` has its own runtime, so clients
/// are not shared across tests). Construction fails if the server is not
/// ready, so no test runs against a half-started server.
pub struct Harness {
    settings: Settings,
    base_url: Url,
    hostname: String,
    cancel: CancellationToken,
    pub server: ServerClient,
    pub inventory: InventoryClient,
    pub management: ManagementClient,
    pub alertmanager: AlertmanagerClient,
}

impl Harness {
    /// Resolves settings from `PMM_*` variables (and `PMM_CONFIG`), then [`Harness::init`].
    pub async fn from_env() -> Result<Self> {
        Self::init(Settings::from_env()?).await
    }

    pub async fn init(settings: Settings) -> Result<Self> {
        let base_url = settings.base_url()?;
        logger::init_logger(settings.log_level());

        // child of the process-wide token: signals reach every harness
        let cancel = shutdown::shutdown_token().child_token();

        tracing::debug!("PMM Server URL: {}.", redacted(&base_url));

        let hostname = System::host_name().ok_or_else(|| {
            ApiTestError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Failed to detect hostname",
            ))
        })?;

        // not tied to `cancel`: the transport outlives a cancelled test
        let transport = Transport::new(&base_url, settings.server_insecure_tls)?;
        let alertmanager_transport = transport.with_base_path(ALERTMANAGER_BASE_PATH);

        let harness = Self {
            settings,
            base_url,
            hostname,
            cancel,
            server: ServerClient::new(transport.clone()),
            inventory: InventoryClient::new(transport.clone()),
            management: ManagementClient::new(transport),
            alertmanager: AlertmanagerClient::new(alertmanager_transport),
        };

        harness
            .run_until_cancelled(harness.server.readiness())
            .await
            .map_err(|e| match e {
                ApiTestError::Cancelled => e,
                e => ApiTestError::NotReady(Box::new(e)),
            })?;
        tracing::debug!("PMM Server is ready");

        Ok(harness)
    }

    /// Server URL as configured, credentials included.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Local hostname used for generating test data.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn debug(&self) -> bool {
        self.settings.debug()
    }

    pub fn run_update_test(&self) -> bool {
        self.settings.run_update_test
    }

    pub fn run_stt_tests(&self) -> bool {
        self.settings.run_stt_tests
    }

    /// Cancelled on SIGTERM or SIGINT. Tests should clean up and exit.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn run_until_cancelled<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        shutdown::run_until_cancelled(&self.cancel, fut).await
    }

    /// Unique name for test data created from this host.
    pub fn with_uuid(&self, name: &str) -> String {
        crate::testing::inventory::with_uuid(&self.hostname, name)
    }
}

fn redacted(url: &Url) -> Url {
    let mut url = url.clone();
    if url.password().is_some() {
        let _ = url.set_password(Some("xxxxx"));
    }
    url
}
