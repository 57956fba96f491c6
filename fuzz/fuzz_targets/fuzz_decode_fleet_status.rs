#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary response bodies must map to a status or a decode error, never panic
    let _ = tesla_fleet::fleet_status::decode_response(data, "5YJ3E1EA1JF000001");

    // Use a prefix of the input as the queried VIN as well
    if let Some((vin, body)) = data.split_first_chunk::<17>() {
        if let Ok(vin) = std::str::from_utf8(vin) {
            let _ = tesla_fleet::fleet_status::decode_response(body, vin);
        }
    }
});
