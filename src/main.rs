use anyhow::Context;
use clap::Parser;
use pmm_api_tests::core::shutdown::SIGNAL_EXIT_CODE;
use pmm_api_tests::{ApiTestError, CliArgs, Harness, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let settings = Settings::from_args(args).context("Invalid settings")?;

    // Harness::init installs the logger; nothing is logged before this point.
    let harness = match Harness::init(settings).await {
        Err(ApiTestError::Cancelled) => std::process::exit(SIGNAL_EXIT_CODE),
        result => result.context("PMM Server is not available")?,
    };

    tracing::info!("PMM Server at {} is ready", harness.base_url().host_str().unwrap_or_default());

    let version = match harness.run_until_cancelled(harness.server.version()).await {
        Err(ApiTestError::Cancelled) => std::process::exit(SIGNAL_EXIT_CODE),
        result => result.context("Failed to get server version")?,
    };

    let full_version = version
        .server
        .as_ref()
        .map(|s| s.full_version.as_str())
        .unwrap_or_default();
    println!("✅ PMM Server {} ({})", version.version, full_version);
    if harness.debug() {
        tracing::debug!("Version response: {:?}", version);
    }
    Ok(())
}
