use std::error::Error as _;
use tesla_fleet::error::FleetError;

#[test]
fn error_constructors() {
    assert!(matches!(
        FleetError::config("x"),
        FleetError::Config { .. }
    ));
    assert!(matches!(
        FleetError::build_request("x"),
        FleetError::BuildRequest { .. }
    ));
    assert!(matches!(FleetError::io("x"), FleetError::Io { .. }));
    assert!(matches!(
        FleetError::validation("f", "m"),
        FleetError::Validation { .. }
    ));
}

#[test]
fn display_messages() {
    assert_eq!(FleetError::Cancelled.to_string(), "request cancelled");
    assert_eq!(
        FleetError::build_request("bad url").to_string(),
        "failed to construct request: bad url"
    );
    assert_eq!(FleetError::Status { status: 500 }.to_string(), "status code 500");
}

#[test]
fn encode_error_exposes_cause_chain() {
    let source = serde_json::from_str::<u8>("300").unwrap_err();
    let err = FleetError::EncodeRequest { source };
    assert_eq!(err.to_string(), "failed to serialize request body");
    let chained = format!("{:#}", anyhow::Error::new(err));
    assert!(chained.starts_with("failed to serialize request body: "));
}

#[test]
fn io_errors_convert() {
    let err: FleetError = std::io::Error::other("disk gone").into();
    assert!(matches!(err, FleetError::Io { .. }));
    assert!(err.source().is_none());
}
