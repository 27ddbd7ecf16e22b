#![no_main]

use libfuzzer_sys::fuzz_target;

use fractal::domain::services::{extract_styles, referenced_packages, strip_directive, tokenize};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Every analysis runs on the token stream and must accept any input
        let _ = tokenize(source);
        let _ = strip_directive(source);
        let _ = referenced_packages(source);
        let _ = extract_styles(source, "fuzz::component::0.0.0");
    }
});
