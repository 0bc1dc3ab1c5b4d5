#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use zenframeio::{Container, ImageInfo, Limits, LoadRequest, Unstoppable, sniff};

fuzz_target!(|data: &[u8]| {
    let Ok((header, container)) = sniff::classify(&mut Cursor::new(data)) else {
        assert!(ImageInfo::from_bytes(data).is_err());
        return;
    };

    let info = ImageInfo::from_bytes(data).expect("probe disagrees with classify");
    assert_eq!((info.width, info.height), (header.width, header.height));
    assert_eq!(info.encoding, header.encoding);
    assert_eq!(info.container, container);
    if container == Container::Png {
        assert!(!info.textual);
    }

    // A full read must report the header it was sniffed with.
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let request = LoadRequest::new().with_limits(&limits);
    if let Ok(raw) = request.read_raw(&mut Cursor::new(data), Unstoppable) {
        assert_eq!(*raw.header(), header);
        assert_eq!(raw.as_bytes().len(), header.data_len().unwrap());
    }
});
