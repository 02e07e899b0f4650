#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fn header(image_type: u8, cmap: (u8, u16, u8), w: u16, h: u16, bpp: u8, flags: u8) -> Vec<u8> {
        let mut v = vec![0u8, cmap.0, image_type, 0, 0];
        v.extend_from_slice(&cmap.1.to_le_bytes());
        v.push(cmap.2);
        v.extend_from_slice(&[0, 0, 0, 0]);
        v.extend_from_slice(&w.to_le_bytes());
        v.extend_from_slice(&h.to_le_bytes());
        v.push(bpp);
        v.push(flags);
        v
    }

    // Uncompressed 24-bit truecolor 2x2, top-left
    let mut rgb = header(2, (0, 0, 0), 2, 2, 24, 0x20);
    rgb.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    fs::write(format!("{dir}/rgb24_2x2.tga"), &rgb).unwrap();

    // RLE 32-bit truecolor 2x1, bottom-left
    let mut rgba = header(10, (0, 0, 0), 2, 1, 32, 0x08);
    rgba.extend_from_slice(&[129, 1, 2, 3, 4]); // one repeat packet
    fs::write(format!("{dir}/rgba32_rle.tga"), &rgba).unwrap();

    // Grayscale 3x1
    let mut gray = header(3, (0, 0, 0), 3, 1, 8, 0x20);
    gray.extend_from_slice(&[0, 128, 255]);
    fs::write(format!("{dir}/gray8_3x1.tga"), &gray).unwrap();

    // Indexed 2x2 with a 4-entry 24-bit colormap
    let mut indexed = header(1, (1, 4, 24), 2, 2, 8, 0x20);
    indexed.extend_from_slice(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120]);
    indexed.extend_from_slice(&[0, 1, 2, 3]);
    fs::write(format!("{dir}/indexed8_2x2.tga"), &indexed).unwrap();

    // 16-bit truecolor 1x1 with a footer
    let mut hi = header(2, (0, 0, 0), 1, 1, 16, 0x21);
    hi.extend_from_slice(&[0x1F, 0xC0]);
    hi.extend_from_slice(&[0u8; 8]);
    hi.extend_from_slice(b"TRUEVISION-XFILE.\0");
    fs::write(format!("{dir}/hicolor16_footer.tga"), &hi).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), &rgb[..10]).unwrap();
    fs::write(format!("{dir}/bad_type.bin"), header(4, (0, 0, 0), 1, 1, 8, 0)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
