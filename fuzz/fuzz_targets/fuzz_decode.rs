#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use zenframeio::{ImageInfo, Limits, LoadRequest, Unstoppable};

fn read_all(request: &LoadRequest<'_>, data: &[u8]) {
    let _ = request.read_raw(&mut Cursor::new(data), Unstoppable);
    let _ = request.read_rgba8(&mut Cursor::new(data), Unstoppable);
    let _ = request.read_depth_i16(&mut Cursor::new(data), Unstoppable);
}

fuzz_target!(|data: &[u8]| {
    let _ = ImageInfo::from_bytes(data);

    // Default loads carry no limits; headers claiming huge sizes must still
    // fail on missing data rather than allocate up front.
    read_all(&LoadRequest::new(), data);

    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    read_all(&LoadRequest::new().with_limits(&limits), data);
});
