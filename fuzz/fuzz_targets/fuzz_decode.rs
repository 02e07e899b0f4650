#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::{DecodeRequest, ImageInfo, Limits};

fuzz_target!(|data: &[u8]| {
    // Header probe must never panic
    let _ = ImageInfo::from_bytes(data);

    // Bounded decode must never panic or allocate past the limits
    let limits = Limits {
        max_pixels: Some(1 << 20),
        max_memory_bytes: Some(1 << 24),
        ..Default::default()
    };
    let _ = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
