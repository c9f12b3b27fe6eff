//! Fuzz target for SVG layer parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the SVG loader,
//! checking for panics, crashes, or hangs.

#![no_main]

use layerscene::svg::from_svg_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_svg_slice(data);
});
