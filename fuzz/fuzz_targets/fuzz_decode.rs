#![no_main]

use libfuzzer_sys::fuzz_target;
use ringwidth::{ReadOptions, RwlReader};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce records or an error, never a panic
    let _ = RwlReader::default().decode(data, "fuzz");
    let strict = ReadOptions::new()
        .with_legacy_markers(true)
        .with_required_terminator(true);
    let _ = RwlReader::new(strict).decode(data, "fuzz");
});
