//! Fuzz target for canvas dimension parsing.

#![no_main]

use layerscene::svg::parse_dimension;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = parse_dimension(raw);
    }
});
