#![no_main]

use libfuzzer_sys::fuzz_target;

use fractal::domain::entities::BuildMetadata;

fuzz_target!(|data: &[u8]| {
    // publish reads these back from disk; corrupt files must be an error
    let _ = serde_json::from_slice::<BuildMetadata>(data);
});
