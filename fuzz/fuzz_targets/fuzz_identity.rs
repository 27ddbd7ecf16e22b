#![no_main]

use libfuzzer_sys::fuzz_target;

use fractal::domain::value_objects::{percent_decode, safe_file_name, ArtifactIdentity, FractalId};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = input.parse::<ArtifactIdentity>();
        let _ = safe_file_name(input);

        // Segments decoded from URLs must round-trip through the encoder
        if let Ok(id) = FractalId::from_segment(input) {
            assert_eq!(percent_decode(&id.encoded()).as_deref(), Some(id.as_str()));
        }

        let mut parts = input.splitn(3, '\n');
        if let (Some(pkg), Some(file), Some(version)) = (parts.next(), parts.next(), parts.next()) {
            let _ = ArtifactIdentity::new(pkg, file, version).safe_file_name();
        }
    }
});
