//! # tesla-fleet - Tesla Fleet API fleet_status client
//!
//! Retrieves the fleet status of a vehicle (key pairing, firmware version,
//! command protocol requirements) from the Tesla Fleet API or an
//! API-compatible `vehicle-command` proxy.
//!
//! ```no_run
//! # async fn run() -> tesla_fleet::Result<()> {
//! use tesla_fleet::FleetClient;
//!
//! let client = FleetClient::new([]);
//! let status = client.get_fleet_status("token", "5YJ3E1EA1JF000001").await?;
//! println!("paired: {}", status.key_paired);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `client`: the configurable HTTP client
//! - `fleet_status`: request/response wire types and the flattened result
//! - `error`: error taxonomy
//! - `config`: YAML configuration for the `tesla-fleet` binary
//! - `logging`: structured logging and tracing
//! - `vehicle`: querying a set of configured vehicles

pub mod client;
pub mod config;
pub mod error;
pub mod fleet_status;
pub mod logging;
pub mod vehicle;

// Re-export commonly used types
pub use client::{ClientOption, DEFAULT_BASE_URL, FleetClient, with_base_url, with_http_client};
pub use config::Config;
pub use error::{FleetError, Result};
pub use fleet_status::FleetStatus;
