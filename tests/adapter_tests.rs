use em410_rdl::adapters::{chirpstack_v3, decode_uplink, encode_downlink, ttn};
use em410_rdl::{CodecError, DownlinkInput, UplinkInput};
use serde_json::json;

const UPLINK: [u8; 14] = [
    0x01, 0x75, 0x5c, 0x03, 0x67, 0x0f, 0x01, 0x04, 0x82, 0xe8, 0x03, 0x05, 0x00, 0x00,
];

#[test]
fn test_decoders_agree() {
    let v4 = decode_uplink(&UplinkInput {
        bytes: UPLINK.to_vec(),
        f_port: Some(85),
    })
    .unwrap()
    .data;
    let v3 = chirpstack_v3::decode(85, &UPLINK).unwrap();
    let tts = ttn::decoder(&UPLINK, 85).unwrap();

    assert_eq!(v4, v3);
    assert_eq!(v3, tts);
    assert_eq!(v4.distance, Some(1000));
}

#[test]
fn test_encoders_agree() {
    let request = json!({
        "report_interval": 20,
        "history_enable": 1,
        "distance_range": { "mode": 0, "min": 0, "max": 8000 },
    });

    let v4 = encode_downlink(&DownlinkInput {
        data: request.clone(),
    })
    .unwrap()
    .bytes;
    let v3 = chirpstack_v3::encode(85, &request).unwrap();
    let tts = ttn::encoder(&request, 85).unwrap();

    assert_eq!(v4, v3);
    assert_eq!(v3, tts);
    assert_eq!(v4.len(), 5 + 7 + 3);
}

#[test]
fn test_errors_surface_through_adapters() {
    let truncated = [0x03, 0x67, 0x10];
    assert!(matches!(
        chirpstack_v3::decode(85, &truncated),
        Err(CodecError::Decode(_))
    ));

    let invalid = json!({ "peak_sort": 5 });
    let err = ttn::encoder(&invalid, 85).unwrap_err();
    assert_eq!(err.to_string(), "Downlink encode error: peak_sort must be one of 0, 1");
}

#[test]
fn test_downlink_output_shape() {
    let output = encode_downlink(&DownlinkInput {
        data: json!({ "reboot": 1 }),
    })
    .unwrap();
    assert_eq!(serde_json::to_value(output).unwrap(), json!({ "bytes": [255, 16, 255] }));
}

#[test]
fn test_text_helpers() {
    let report = em410_rdl::decode_hex_payload("0x01 75 64").unwrap();
    assert_eq!(report.battery, Some(100));
    assert!(matches!(
        em410_rdl::decode_hex_payload("zz"),
        Err(CodecError::InvalidHexString)
    ));

    assert_eq!(
        em410_rdl::encode_json_request(r#"{"sync_time": 1}"#).unwrap(),
        vec![0xff, 0x4a, 0xff]
    );
    assert!(matches!(
        em410_rdl::encode_json_request("[1]"),
        Err(CodecError::NotAnObject)
    ));
    assert!(matches!(
        em410_rdl::encode_json_request("{"),
        Err(CodecError::Json(_))
    ));
}
