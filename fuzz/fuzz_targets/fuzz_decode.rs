#![no_main]

use em410_rdl::uplink::{decode, decode_partial, Frames};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any input must decode or report truncation without panicking
    let strict = decode(data);
    let (partial, err) = decode_partial(data);
    assert_eq!(strict.is_ok(), err.is_none());
    if let Ok(report) = strict {
        assert_eq!(report, partial);
    }

    let mut frames = Frames::new(data);
    while let Some(Ok(_)) = frames.next() {}
    assert!(frames.consumed() <= data.len());

    // Report must always serialize
    let _ = serde_json::to_string(&partial);
});
