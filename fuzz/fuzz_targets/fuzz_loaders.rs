#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use tokio_mimetypes::loader::read_lines_sync;
use tokio_mimetypes::{ApacheLoader, XdgGlobsLoader};

fuzz_target!(|data: &[u8]| {
    // Both formats must either load or fail cleanly
    let _ = read_lines_sync(&ApacheLoader, Cursor::new(data));
    let _ = read_lines_sync(&XdgGlobsLoader, Cursor::new(data));
});
