#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce
    // identical pixels.
    let limits = Limits {
        max_pixels: Some(1 << 20),
        max_memory_bytes: Some(1 << 24),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // IndexedAlpha8 never comes out of a decode, so every decoded layout
    // re-encodes losslessly.
    let mut request = EncodeRequest::tga();
    if let Some(palette) = decoded.palette() {
        request = request.with_palette(palette);
    }
    let reencoded = request
        .encode(
            decoded.pixels(),
            decoded.width,
            decoded.height,
            decoded.layout,
            enough::Unstoppable,
        )
        .expect("decoded image must re-encode");

    let again = DecodeRequest::new(&reencoded)
        .decode(enough::Unstoppable)
        .expect("re-encoded image must decode");
    assert_eq!(again.pixels(), decoded.pixels());
    assert_eq!(again.layout, decoded.layout);
});
