//! Wire types for the `fleet_status` endpoint and the flattened result
//! handed back to callers.

use crate::error::{FleetError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// Upstream may send `null` for non-optional fields; treat it as the zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Request body: `{"vins": [vin]}`
#[derive(Debug, Clone, Serialize)]
pub struct FleetStatusRequest<'a> {
    pub vins: Vec<&'a str>,
}

impl<'a> FleetStatusRequest<'a> {
    /// The API accepts several VINs but only one is ever sent per call.
    pub fn for_vin(vin: &'a str) -> Self {
        Self { vins: vec![vin] }
    }
}

/// Fleet API envelope: every payload sits under `response`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ResponseWrapper<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: T,
}

/// Per-vehicle entry of `vehicle_info`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VehicleInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub vehicle_command_protocol_required: bool,
    pub safety_screen_streaming_toggle_enabled: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub firmware_version: String,
    pub fleet_telemetry_version: Option<String>,
    pub total_number_of_keys: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub discounted_device_data: bool,
}

/// Payload of a `fleet_status` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FleetStatusResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub key_paired_vins: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub unpaired_vins: Vec<String>,
    /// `null` entries are kept as `None` and read back as zero values
    #[serde(deserialize_with = "null_as_default")]
    pub vehicle_info: HashMap<String, Option<VehicleInfo>>,
}

/// Fleet status of a single vehicle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FleetStatus {
    /// True when the response lists exactly one key-paired VIN.
    ///
    /// This is a length check, not a membership check for the queried VIN.
    /// The upstream array only ever holds the single VIN asked about.
    pub key_paired: bool,
    pub vehicle_command_protocol_required: bool,
    pub safety_screen_streaming_toggle_enabled: Option<bool>,
    pub firmware_version: String,
    pub fleet_telemetry_version: Option<String>,
    pub total_number_of_keys: Option<i64>,
    pub discounted_device_data: bool,
}

impl FleetStatus {
    /// Flatten a response into the status for `vin`.
    ///
    /// A VIN missing from `vehicle_info` yields zero-valued fields.
    pub fn from_response(mut response: FleetStatusResponse, vin: &str) -> Self {
        let info = response
            .vehicle_info
            .remove(vin)
            .flatten()
            .unwrap_or_default();
        Self {
            key_paired: response.key_paired_vins.len() == 1,
            vehicle_command_protocol_required: info.vehicle_command_protocol_required,
            safety_screen_streaming_toggle_enabled: info.safety_screen_streaming_toggle_enabled,
            firmware_version: info.firmware_version,
            fleet_telemetry_version: info.fleet_telemetry_version,
            total_number_of_keys: info.total_number_of_keys,
            discounted_device_data: info.discounted_device_data,
        }
    }
}

/// Serialize the request body for `vin`
pub fn encode_request(vin: &str) -> Result<Vec<u8>> {
    serde_json::to_vec(&FleetStatusRequest::for_vin(vin))
        .map_err(|source| FleetError::EncodeRequest { source })
}

/// Parse a raw response body and extract the status for `vin`.
///
/// A `null` body, envelope or vehicle entry reads as zero values.
pub fn decode_response(body: &[u8], vin: &str) -> Result<FleetStatus> {
    let wrapper: Option<ResponseWrapper<FleetStatusResponse>> =
        serde_json::from_slice(body).map_err(|source| FleetError::DecodeResponse { source })?;
    let response = wrapper.unwrap_or_default().response;
    Ok(FleetStatus::from_response(response, vin))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIN: &str = "5YJ3E1EA1JF000001";

    #[test]
    fn request_body_holds_single_vin() {
        let body = encode_request(VIN).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "vins": [VIN] }));
    }

    #[test]
    fn fields_pass_through_unchanged() {
        let body = serde_json::json!({
            "response": {
                "key_paired_vins": [VIN],
                "unpaired_vins": [],
                "vehicle_info": {
                    VIN: {
                        "vehicle_command_protocol_required": true,
                        "safety_screen_streaming_toggle_enabled": true,
                        "firmware_version": "2024.26.3",
                        "fleet_telemetry_version": "1.0.2",
                        "total_number_of_keys": 5,
                        "discounted_device_data": true
                    }
                }
            }
        });
        let st = decode_response(body.to_string().as_bytes(), VIN).unwrap();
        assert!(st.key_paired);
        assert!(st.vehicle_command_protocol_required);
        assert_eq!(st.safety_screen_streaming_toggle_enabled, Some(true));
        assert_eq!(st.firmware_version, "2024.26.3");
        assert_eq!(st.fleet_telemetry_version.as_deref(), Some("1.0.2"));
        assert_eq!(st.total_number_of_keys, Some(5));
        assert!(st.discounted_device_data);
    }

    #[test]
    fn null_optionals_stay_absent() {
        let body = format!(
            r#"{{"response":{{"key_paired_vins":[],"unpaired_vins":["{VIN}"],"vehicle_info":{{"{VIN}":{{"vehicle_command_protocol_required":false,"safety_screen_streaming_toggle_enabled":null,"firmware_version":"2023.44.30","fleet_telemetry_version":null,"total_number_of_keys":null,"discounted_device_data":false}}}}}}}}"#
        );
        let st = decode_response(body.as_bytes(), VIN).unwrap();
        assert!(!st.key_paired);
        assert_eq!(st.safety_screen_streaming_toggle_enabled, None);
        assert_eq!(st.fleet_telemetry_version, None);
        assert_eq!(st.total_number_of_keys, None);
        assert_eq!(st.firmware_version, "2023.44.30");
    }

    // key_paired only counts entries; it does not check which VIN is listed.
    #[test]
    fn key_paired_is_length_one_not_membership() {
        let other = FleetStatusResponse {
            key_paired_vins: vec!["LRW3E7FA0MC000002".to_string()],
            ..Default::default()
        };
        assert!(FleetStatus::from_response(other, VIN).key_paired);

        let two = FleetStatusResponse {
            key_paired_vins: vec![VIN.to_string(), "LRW3E7FA0MC000002".to_string()],
            ..Default::default()
        };
        assert!(!FleetStatus::from_response(two, VIN).key_paired);

        assert!(!FleetStatus::from_response(FleetStatusResponse::default(), VIN).key_paired);
    }

    #[test]
    fn missing_vin_yields_zero_values() {
        let body = r#"{"response":{"key_paired_vins":[],"unpaired_vins":[],"vehicle_info":{}}}"#;
        let st = decode_response(body.as_bytes(), VIN).unwrap();
        assert_eq!(st, FleetStatus::default());
    }

    #[test]
    fn missing_fields_default_like_zero_values() {
        let body =
            format!(r#"{{"response":{{"vehicle_info":{{"{VIN}":{{"firmware_version":"x"}}}}}}}}"#);
        let st = decode_response(body.as_bytes(), VIN).unwrap();
        assert_eq!(st.firmware_version, "x");
        assert!(!st.vehicle_command_protocol_required);
        assert_eq!(st.total_number_of_keys, None);
    }

    #[test]
    fn null_collections_and_empty_envelope() {
        let body = br#"{"response":{"key_paired_vins":null,"vehicle_info":null}}"#;
        let st = decode_response(body, VIN).unwrap();
        assert!(!st.key_paired);

        let st = decode_response(b"{}", VIN).unwrap();
        assert_eq!(st, FleetStatus::default());
    }

    #[test]
    fn null_envelope_and_body_yield_zero_values() {
        let st = decode_response(br#"{"response":null}"#, VIN).unwrap();
        assert_eq!(st, FleetStatus::default());

        let st = decode_response(b"null", VIN).unwrap();
        assert_eq!(st, FleetStatus::default());

        let st = decode_response(b" null\n", VIN).unwrap();
        assert_eq!(st, FleetStatus::default());
    }

    #[test]
    fn null_vehicle_entry_yields_zero_values() {
        let body = format!(
            r#"{{"response":{{"key_paired_vins":["{VIN}"],"vehicle_info":{{"{VIN}":null}}}}}}"#
        );
        let st = decode_response(body.as_bytes(), VIN).unwrap();
        assert!(st.key_paired);
        assert!(!st.vehicle_command_protocol_required);
        assert_eq!(st.firmware_version, "");
        assert_eq!(st.total_number_of_keys, None);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_response(b"<html>bad gateway</html>", VIN).unwrap_err();
        assert!(matches!(err, FleetError::DecodeResponse { .. }));

        let body = br#"{"response":{"key_paired_vins":"nope"}}"#;
        let err = decode_response(body, VIN).unwrap_err();
        assert!(matches!(err, FleetError::DecodeResponse { .. }));

        let err = decode_response(b"", VIN).unwrap_err();
        assert!(matches!(err, FleetError::DecodeResponse { .. }));
    }
}
