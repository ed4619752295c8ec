#![no_main]

use libfuzzer_sys::fuzz_target;
use tokio_mimetypes::Registry;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // First line is a pattern, the rest is the filename to resolve
    let (pattern, name) = s.split_once('\n').unwrap_or((s, s));

    let mut registry = Registry::new();
    registry.add("application/x-fuzz", [pattern]);
    let _ = registry.type_by_filename(name);
    let _ = registry.type_by_extension(name);
});
