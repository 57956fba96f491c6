//! Vehicle integration for tesla-fleet
//!
//! Clients are hidden behind [`FleetStatusProvider`] so the integration can
//! be driven by a stub in tests or by an alternative deployment.

use crate::client::FleetClient;
use crate::config::VehicleConfig;
use crate::error::{FleetError, Result};
use crate::fleet_status::FleetStatus;
use crate::logging::{LogContext, get_logger, get_logger_with_context};

/// Source of fleet status information
#[async_trait::async_trait]
pub trait FleetStatusProvider: Send + Sync {
    async fn fleet_status(&self, token: &str, vin: &str) -> Result<FleetStatus>;
}

#[async_trait::async_trait]
impl FleetStatusProvider for FleetClient {
    async fn fleet_status(&self, token: &str, vin: &str) -> Result<FleetStatus> {
        self.get_fleet_status(token, vin).await
    }
}

/// Outcome of querying one configured vehicle
#[derive(Debug)]
pub struct VehicleReport {
    pub vehicle: VehicleConfig,
    pub status: Result<FleetStatus>,
}

/// Vehicle integration manager
pub struct VehicleIntegration {
    client: Option<Box<dyn FleetStatusProvider>>,
    access_token: String,
    vehicles: Vec<VehicleConfig>,
    logger: crate::logging::StructuredLogger,
}

impl Default for VehicleIntegration {
    fn default() -> Self {
        Self::new(String::new(), Vec::new())
    }
}

impl VehicleIntegration {
    pub fn new(access_token: String, vehicles: Vec<VehicleConfig>) -> Self {
        let logger = get_logger("vehicle");
        Self {
            client: None,
            access_token,
            vehicles,
            logger,
        }
    }

    pub fn set_client(&mut self, client: Box<dyn FleetStatusProvider>) {
        self.client = Some(client);
    }

    pub fn vehicles(&self) -> &[VehicleConfig] {
        &self.vehicles
    }

    pub async fn fetch_vehicle_status(&self, vin: &str) -> Result<FleetStatus> {
        if let Some(client) = &self.client {
            client.fleet_status(&self.access_token, vin).await
        } else {
            Err(FleetError::config("no fleet status client configured"))
        }
    }

    /// Query every configured vehicle in order, one request each.
    /// A failing vehicle does not stop the remaining ones.
    pub async fn fetch_all(&self) -> Vec<VehicleReport> {
        let mut reports = Vec::with_capacity(self.vehicles.len());
        for vehicle in &self.vehicles {
            let logger = get_logger_with_context(
                LogContext::new("vehicle")
                    .with_vin(vehicle.vin.clone())
                    .with_field("name", vehicle.name.clone()),
            );
            let status = self.fetch_vehicle_status(&vehicle.vin).await;
            match &status {
                Ok(st) => logger.debug(&format!(
                    "fleet status: key_paired={} firmware={}",
                    st.key_paired, st.firmware_version
                )),
                Err(e) => logger.warn(&format!("fleet status failed: {}", e)),
            }
            reports.push(VehicleReport {
                vehicle: vehicle.clone(),
                status,
            });
        }
        self.logger.info(&format!(
            "queried {} vehicle(s), {} failed",
            reports.len(),
            reports.iter().filter(|r| r.status.is_err()).count()
        ));
        reports
    }
}
