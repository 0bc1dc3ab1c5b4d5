#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use zenframeio::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // If we can decode it, writing it back as binary PNM must reproduce the samples.
    // ASCII sources store 16-bit samples natively, so only binary sources compare bytewise.
    let Ok(decoded) = LoadRequest::new()
        .with_limits(&limits)
        .read_raw(&mut Cursor::new(data), Unstoppable)
    else {
        return;
    };
    if decoded.header().textual && decoded.encoding().bytes_per_sample() == 2 {
        return;
    }

    let mut encoded = Vec::new();
    SaveRequest::new()
        .write_raw(&mut encoded, &decoded, Unstoppable)
        .expect("writing decoded samples failed");
    let Ok(decoded2) = LoadRequest::new().read_raw(&mut Cursor::new(&encoded), Unstoppable)
    else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.as_bytes(), decoded2.as_bytes(), "roundtrip sample mismatch");
    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
});
