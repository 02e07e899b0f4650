//! Header, classification, colormap, and malformed-input behavior, pinned
//! against hand-built byte streams.

use enough::Unstoppable;
use zentga::*;

/// Build a raw 18-byte header: `cmap` is (start index, length, entry bits).
fn header(image_type: u8, cmap_type: u8, cmap: (u16, u16, u8), w: u16, h: u16, bpp: u8, flags: u8) -> Vec<u8> {
    let mut v = vec![0u8, cmap_type, image_type];
    v.extend_from_slice(&cmap.0.to_le_bytes());
    v.extend_from_slice(&cmap.1.to_le_bytes());
    v.push(cmap.2);
    v.extend_from_slice(&[0, 0, 0, 0]); // x/y origin
    v.extend_from_slice(&w.to_le_bytes());
    v.extend_from_slice(&h.to_le_bytes());
    v.push(bpp);
    v.push(flags);
    v
}

fn decode(data: &[u8]) -> Result<DecodeOutput<'_>, TgaError> {
    DecodeRequest::new(data).decode(Unstoppable)
}

#[test]
fn header_fields_are_little_endian() {
    // Two-byte fields assembled low byte first, pinned at the byte
    // boundaries 255/256 and the maximum.
    for (w, h) in [(1u16, 255u16), (255, 256), (256, 1), (65535, 1)] {
        let data = header(3, 0, (0, 0, 0), w, h, 8, 0x20);
        let info = ImageInfo::from_bytes(&data).unwrap();
        assert_eq!(info.width, u32::from(w));
        assert_eq!(info.height, u32::from(h));
        assert_eq!(info.kind, ImageKind::Grayscale);
        assert!(!info.rle);
        assert!(!info.v2_footer);
    }

    // Raw bytes spelled out once: width 258 = [2, 1]
    let mut data = header(3, 0, (0, 0, 0), 0, 1, 8, 0x20);
    data[12] = 2;
    data[13] = 1;
    assert_eq!(ImageInfo::from_bytes(&data).unwrap().width, 258);
}

#[test]
fn zero_dimensions_rejected() {
    let data = header(3, 0, (0, 0, 0), 0, 4, 8, 0x20);
    match decode(&data).unwrap_err() {
        TgaError::InvalidHeader(msg) => assert!(msg.contains("width")),
        other => panic!("expected InvalidHeader, got {other:?}"),
    }

    let data = header(3, 0, (0, 0, 0), 4, 0, 8, 0x20);
    match decode(&data).unwrap_err() {
        TgaError::InvalidHeader(msg) => assert!(msg.contains("height")),
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn truncated_header_rejected() {
    match decode(&[0u8; 10]).unwrap_err() {
        TgaError::UnexpectedEof { section: "header" } => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn truncated_pixel_data_rejected() {
    let mut data = header(3, 0, (0, 0, 0), 4, 4, 8, 0x20);
    data.extend_from_slice(&[1, 2, 3]); // 3 of 16 pixels
    match decode(&data).unwrap_err() {
        TgaError::UnexpectedEof { section } => assert_eq!(section, "pixel data"),
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn unknown_image_type_rejected() {
    let data = header(4, 0, (0, 0, 0), 1, 1, 8, 0x20);
    match decode(&data).unwrap_err() {
        TgaError::UnsupportedVariant(msg) => assert!(msg.contains('4')),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[test]
fn decodes_2x2_bgr_scenario() {
    // Uncompressed 24-bit truecolor, top-left origin: raw BGR rows come
    // back as RGB in the same row order.
    let mut data = header(2, 0, (0, 0, 0), 2, 2, 24, 0x20);
    #[rustfmt::skip]
    data.extend_from_slice(&[
        1, 2, 3,    4, 5, 6, // top row, BGR
        7, 8, 9,   10, 11, 12,
    ]);

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    #[rustfmt::skip]
    assert_eq!(decoded.pixels(), &[
        3, 2, 1,    6, 5, 4,
        9, 8, 7,   12, 11, 10,
    ]);
}

#[test]
fn encode_bottom_left_scenario() {
    // Bottom-left origin: flags byte 0x00, zero y-origin, rows written
    // bottom-to-top.
    #[rustfmt::skip]
    let pixels = vec![
        3u8, 2, 1,    6, 5, 4, // top row, RGB
        9, 8, 7,     12, 11, 10,
    ];
    let encoded = EncodeRequest::tga()
        .with_rle(false)
        .with_origin(TgaOrigin::BottomLeft)
        .encode(&pixels, 2, 2, PixelLayout::Rgb8, Unstoppable)
        .unwrap();

    assert_eq!(encoded[2], 2); // uncompressed truecolor
    assert_eq!(encoded[17], 0x00);
    assert_eq!(&encoded[10..12], &[0, 0]); // y origin
    #[rustfmt::skip]
    assert_eq!(&encoded[18..30], &[
        7, 8, 9,    10, 11, 12, // bottom row first, BGR
        1, 2, 3,     4, 5, 6,
    ]);
}

#[test]
fn encode_top_left_scenario() {
    #[rustfmt::skip]
    let pixels = vec![
        3u8, 2, 1,    6, 5, 4,
        9, 8, 7,     12, 11, 10,
    ];
    let encoded = EncodeRequest::tga()
        .with_rle(false)
        .with_origin(TgaOrigin::TopLeft)
        .encode(&pixels, 2, 2, PixelLayout::Rgb8, Unstoppable)
        .unwrap();

    assert_eq!(encoded[17], 0x20);
    assert_eq!(&encoded[10..12], &2u16.to_le_bytes()[..]); // y origin = height
    #[rustfmt::skip]
    assert_eq!(&encoded[18..30], &[
        1, 2, 3,    4, 5, 6, // top row first, BGR
        7, 8, 9,   10, 11, 12,
    ]);
}

#[test]
fn origin_bits_pin_row_order() {
    // Same stored bytes under both values of flags bit 5.
    let rows = [10u8, 20]; // 1x2 grayscale
    let mut top = header(3, 0, (0, 0, 0), 1, 2, 8, 0x20);
    top.extend_from_slice(&rows);
    let mut bottom = header(3, 0, (0, 0, 0), 1, 2, 8, 0x00);
    bottom.extend_from_slice(&rows);

    // Bit 5 set: origin at top, stored order is already top-to-bottom.
    assert_eq!(decode(&top).unwrap().pixels(), &[10, 20]);
    // Bit 5 clear: origin at bottom, stored rows run upward.
    assert_eq!(decode(&bottom).unwrap().pixels(), &[20, 10]);
}

#[test]
fn horizontal_flip_reverses_pixels() {
    let mut flipped = header(2, 0, (0, 0, 0), 2, 1, 24, 0x30); // flip + top
    flipped.extend_from_slice(&[9, 8, 7, 3, 2, 1]); // stored right-to-left, BGR

    let decoded = decode(&flipped).unwrap();
    assert_eq!(decoded.pixels(), &[1, 2, 3, 7, 8, 9]);

    // Self-inverse: decoding the same bytes without the flip bit and
    // reversing gives the identical result.
    let mut plain = header(2, 0, (0, 0, 0), 2, 1, 24, 0x20);
    plain.extend_from_slice(&[3, 2, 1, 9, 8, 7]);
    assert_eq!(decode(&plain).unwrap().pixels(), decoded.pixels());
}

#[test]
fn alpha_bits_equal_to_depth_treated_as_zero() {
    // Broken writers put the pixel depth in the attribute-bits field; such
    // a header must decode exactly like one with zero attribute bits.
    let pixels = [1u8, 2, 3, 4];
    let mut broken = header(3, 0, (0, 0, 0), 2, 2, 8, 0x28); // alpha "8"
    broken.extend_from_slice(&pixels);
    let mut clean = header(3, 0, (0, 0, 0), 2, 2, 8, 0x20);
    clean.extend_from_slice(&pixels);

    let a = decode(&broken).unwrap();
    let b = decode(&clean).unwrap();
    assert_eq!(a.layout, PixelLayout::Gray8);
    assert_eq!(a.layout, b.layout);
    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn missing_alpha_bits_inferred_for_32bpp() {
    // Writers that never set the attribute count still mean 8-bit alpha
    // for 32-bit truecolor.
    let mut data = header(2, 0, (0, 0, 0), 1, 1, 32, 0x20);
    data.extend_from_slice(&[1, 2, 3, 128]); // BGRA

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &[3, 2, 1, 128]);
}

#[test]
fn gray8_with_partial_alpha_bits_rejected() {
    let data = header(3, 0, (0, 0, 0), 1, 1, 8, 0x24); // 4 attribute bits
    match decode(&data).unwrap_err() {
        TgaError::UnsupportedVariant(msg) => assert!(msg.contains("alpha")),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[test]
fn upsamples_16bpp_color() {
    // A=1 R=16 G=0 B=31 -> 0xC01F little-endian.
    let mut data = header(2, 0, (0, 0, 0), 1, 1, 16, 0x21); // 1 attribute bit
    data.extend_from_slice(&[0x1F, 0xC0]);

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &[132, 0, 255, 255]);
}

#[test]
fn upsamples_15bpp_color() {
    let mut data = header(2, 0, (0, 0, 0), 1, 1, 15, 0x20);
    data.extend_from_slice(&[0xFF, 0x7F]); // all channels full

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &[255, 255, 255]);
}

#[test]
fn colormap_type_mismatch_rejected() {
    // Truecolor claiming a colormap
    let data = header(2, 1, (0, 4, 24), 1, 1, 24, 0x20);
    match decode(&data).unwrap_err() {
        TgaError::InvalidColormap(_) => {}
        other => panic!("expected InvalidColormap, got {other:?}"),
    }

    // Indexed without one
    let data = header(1, 0, (0, 4, 24), 1, 1, 8, 0x20);
    match decode(&data).unwrap_err() {
        TgaError::InvalidColormap(_) => {}
        other => panic!("expected InvalidColormap, got {other:?}"),
    }
}

#[test]
fn oversized_colormap_entries_rejected() {
    // 40-bit entries would need 5 bytes each.
    let data = header(1, 1, (0, 2, 40), 1, 1, 8, 0x20);
    match decode(&data).unwrap_err() {
        TgaError::UnsupportedVariant(msg) => assert!(msg.contains("40")),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[test]
fn colormap_promotion_boundary() {
    // start + length == 256: stays indexed.
    let mut cmap = Vec::new();
    for i in 0..256u32 {
        cmap.extend_from_slice(&[i as u8, 0, 0]); // BGR
    }
    let mut native = header(1, 1, (0, 256, 24), 1, 1, 8, 0x20);
    native.extend_from_slice(&cmap);
    native.push(5);

    let info = ImageInfo::from_bytes(&native).unwrap();
    assert_eq!(info.native_layout, PixelLayout::Indexed8);
    let decoded = decode(&native).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Indexed8);
    assert_eq!(decoded.palette().map(<[u8]>::len), Some(768));
    assert_eq!(decoded.pixels(), &[5]);

    // start + length == 257: indices no longer fit an 8-bit palette, so
    // pixels expand through the lookup instead.
    let mut promoted = header(1, 1, (1, 256, 24), 1, 1, 8, 0x20);
    promoted.extend_from_slice(&cmap);
    promoted.push(5);

    let info = ImageInfo::from_bytes(&promoted).unwrap();
    assert_eq!(info.native_layout, PixelLayout::Rgb8);
    let decoded = decode(&promoted).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(decoded.palette(), None);
    // stored index 5 - start 1 = entry 4 = BGR (4, 0, 0)
    assert_eq!(decoded.pixels(), &[0, 0, 4]);
}

#[test]
fn palette_index_out_of_range_rejected() {
    let mut data = header(1, 1, (0, 2, 24), 1, 1, 8, 0x20);
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]); // 2 entries
    data.push(7); // index beyond the palette

    match decode(&data).unwrap_err() {
        TgaError::InvalidData(msg) => assert!(msg.contains("7")),
        other => panic!("expected InvalidData, got {other:?}"),
    }

    // Same stream with a bottom-left origin takes the copying path and
    // must fail the same way.
    let mut data = header(1, 1, (0, 2, 24), 1, 1, 8, 0x00);
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
    data.push(7);
    match decode(&data).unwrap_err() {
        TgaError::InvalidData(_) => {}
        other => panic!("expected InvalidData, got {other:?}"),
    }
}

#[test]
fn truncated_colormap_rejected() {
    let mut data = header(1, 1, (0, 4, 24), 1, 1, 8, 0x20);
    data.extend_from_slice(&[1, 2, 3]); // 1 of 4 entries
    match decode(&data).unwrap_err() {
        TgaError::UnexpectedEof { section } => assert_eq!(section, "colormap"),
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn image_id_is_skipped() {
    let mut data = header(3, 0, (0, 0, 0), 2, 1, 8, 0x20);
    data[0] = 4; // id length
    data.extend_from_slice(b"name");
    data.extend_from_slice(&[11, 22]);

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.pixels(), &[11, 22]);
}

#[test]
fn rle_packets_span_rows() {
    // One repeat packet covering all four pixels of a 2x2 image: the
    // decoder's packet state must survive the row boundary.
    let mut data = header(11, 0, (0, 0, 0), 2, 2, 8, 0x20);
    data.extend_from_slice(&[131, 7]); // repeat of 4

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.pixels(), &[7, 7, 7, 7]);
}

#[test]
fn rle_truncated_stream_rejected() {
    let mut data = header(11, 0, (0, 0, 0), 4, 1, 8, 0x20);
    data.extend_from_slice(&[129, 7]); // repeat of 2, then nothing
    match decode(&data).unwrap_err() {
        TgaError::UnexpectedEof { section } => assert_eq!(section, "pixel data"),
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn footer_is_written_and_detected() {
    let encoded = EncodeRequest::tga()
        .encode(&[1u8, 2, 3, 4], 2, 2, PixelLayout::Gray8, Unstoppable)
        .unwrap();

    let tail = &encoded[encoded.len() - 26..];
    assert_eq!(&tail[..8], &[0u8; 8]);
    assert_eq!(&tail[8..], b"TRUEVISION-XFILE.\0");

    let info = ImageInfo::from_bytes(&encoded).unwrap();
    assert!(info.v2_footer);
}

#[test]
fn extension_area_past_eof_rejected() {
    let mut encoded = EncodeRequest::tga()
        .encode(&[1u8, 2, 3, 4], 2, 2, PixelLayout::Gray8, Unstoppable)
        .unwrap();

    // Point the footer's extension offset somewhere a 495-byte block
    // cannot possibly fit.
    let at = encoded.len() - 26;
    encoded[at..at + 4].copy_from_slice(&1u32.to_le_bytes());
    match decode(&encoded).unwrap_err() {
        TgaError::UnexpectedEof { section } => assert_eq!(section, "extension area"),
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn footer_is_optional() {
    let mut data = header(3, 0, (0, 0, 0), 1, 1, 8, 0x20);
    data.push(42);
    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.pixels(), &[42]);
    assert!(!ImageInfo::from_bytes(&data).unwrap().v2_footer);
}

#[test]
fn encode_rejects_bad_inputs() {
    let request = EncodeRequest::tga();

    // Indexed without a palette
    match request
        .encode(&[0u8; 4], 2, 2, PixelLayout::Indexed8, Unstoppable)
        .unwrap_err()
    {
        TgaError::InvalidColormap(_) => {}
        other => panic!("expected InvalidColormap, got {other:?}"),
    }

    // Palette too large for an 8-bit index
    let big = vec![0u8; 257 * 3];
    match request
        .with_palette(&big)
        .encode(&[0u8; 4], 2, 2, PixelLayout::Indexed8, Unstoppable)
        .unwrap_err()
    {
        TgaError::UnsupportedVariant(_) => {}
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }

    // Short pixel buffer
    match request
        .encode(&[0u8; 4], 2, 2, PixelLayout::Rgb8, Unstoppable)
        .unwrap_err()
    {
        TgaError::BufferTooSmall {
            needed: 12,
            actual: 4,
        } => {}
        other => panic!("expected BufferTooSmall, got {other:?}"),
    }

    // Header dimension fields are 16-bit
    match request
        .encode(&[0u8; 4], 70_000, 1, PixelLayout::Gray8, Unstoppable)
        .unwrap_err()
    {
        TgaError::DimensionsTooLarge { .. } => {}
        other => panic!("expected DimensionsTooLarge, got {other:?}"),
    }

    match request
        .encode(&[], 0, 1, PixelLayout::Gray8, Unstoppable)
        .unwrap_err()
    {
        TgaError::InvalidHeader(_) => {}
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn probe_reports_compression_and_kind() {
    let rgb = EncodeRequest::tga()
        .with_rle(true)
        .encode(&[0u8; 12], 2, 2, PixelLayout::Rgb8, Unstoppable)
        .unwrap();
    let info = ImageInfo::from_bytes(&rgb).unwrap();
    assert_eq!(info.kind, ImageKind::TrueColor);
    assert_eq!(info.bits_per_pixel, 24);
    assert!(info.rle);
    assert_eq!(info.native_layout, PixelLayout::Rgb8);
}
