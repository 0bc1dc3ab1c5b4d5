#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // PPM 2x2
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_2x2.ppm"), ppm).unwrap();

    // PGM 3x2
    let pgm = b"P5\n3 2\n256\n\x00\x40\x80\xc0\xff\x64";
    fs::write(format!("{dir}/pgm_3x2.pgm"), pgm).unwrap();

    // Signed 16-bit depth 2x1
    let depth = b"P5\n2 1\n32767\n\x01\x02\x03\x04";
    fs::write(format!("{dir}/depth_2x1.pgm"), depth).unwrap();

    // Unsigned 16-bit 1x1
    let gray16 = b"P5\n1 1\n65535\n\xff\xfe";
    fs::write(format!("{dir}/gray16_1x1.pgm"), gray16).unwrap();

    // ASCII PPM 1x1
    fs::write(format!("{dir}/ascii_1x1.ppm"), b"P3\n1 1\n255\n10 20 30\n").unwrap();

    // ASCII PGM 16-bit
    fs::write(format!("{dir}/ascii_2x1.pgm"), b"P2 2 1 1000 999 -4\n").unwrap();

    // Truncated binary data
    fs::write(format!("{dir}/truncated.ppm"), b"P6\n4 4\n255\n\x00\x01").unwrap();

    // Header claiming far more data than follows
    fs::write(format!("{dir}/oversized.ppm"), b"P6\n100000 100000\n255\n\x00").unwrap();

    // PNG signature only
    fs::write(
        format!("{dir}/png_signature.png"),
        b"\x89PNG\r\n\x1a\n",
    )
    .unwrap();

    println!("Generated seeds in {dir}");
}
