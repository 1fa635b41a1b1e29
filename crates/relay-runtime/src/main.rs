//! Signal relay executable.

use anyhow::Result;
use relay_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())?;

    info!("Signal relay v{}", relay_gateway::VERSION);

    let config = relay_runtime::load_config();
    relay_runtime::run(config).await
}
