#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = suministro::core::validate_nif(s);
        let _ = suministro::core::is_valid_nif(s);
        let _ = suministro::core::sii_nif(s);
    }
});
