use anyhow::{Context, Result};
use tesla_fleet::config::Config;
use tesla_fleet::logging::{get_logger, init_logging};
use tesla_fleet::vehicle::VehicleIntegration;
use tesla_fleet::FleetClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1);
    let config = Config::load_from(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("{}", e))?;

    let logger = get_logger("cli");
    if config.vehicles.is_empty() {
        logger.warn("No vehicles configured; nothing to do");
        return Ok(());
    }
    if config.api.access_token.trim().is_empty() {
        anyhow::bail!("No access token configured (api.access_token)");
    }

    let client = FleetClient::new(config.api.client_options()?);
    info!("Querying fleet status at {}", client.base_url());

    let mut integration =
        VehicleIntegration::new(config.api.access_token.clone(), config.vehicles.clone());
    integration.set_client(Box::new(client));

    let mut failures = 0usize;
    for report in integration.fetch_all().await {
        match report.status {
            Ok(status) => {
                let json = serde_json::json!({
                    "name": report.vehicle.name,
                    "vin": report.vehicle.vin,
                    "status": status,
                });
                println!("{}", serde_json::to_string(&json).context("encoding status")?);
            }
            Err(e) => {
                failures += 1;
                let err = anyhow::Error::new(e);
                logger.error(&format!("{}: {:#}", report.vehicle.vin, err));
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} vehicle(s) failed", failures);
    }
    Ok(())
}
