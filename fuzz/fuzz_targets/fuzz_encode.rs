#![no_main]

use em410_rdl::downlink::encode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(serde_json::Value::Object(request)) = serde_json::from_str(text) else {
        return;
    };

    // Arbitrary requests either encode or fail validation, never panic
    let _ = encode(&request);
});
