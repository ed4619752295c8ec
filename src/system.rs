//! Process-wide registry built from the local system's media type database.
//!
//! On Unix the registry is read once, on first use, from the first of these
//! that exists:
//! - /usr/local/share/mime/globs
//! - /usr/share/mime/globs
//!
//! falling back to merging /etc/mime.types, /etc/apache2/mime.types,
//! /etc/apache/mime.types and /etc/httpd/conf/mime.types. Missing or
//! unreadable files are skipped, so the registry may be empty.
//!
//! The registry is never modified after it is built.

use crate::registry::Registry;
use once_cell::sync::Lazy;

static SYSTEM: Lazy<Registry> = Lazy::new(crate::platform::load_registry);

/// Returns the system registry, loading it on first call.
pub fn registry() -> &'static Registry {
    &SYSTEM
}

/// Returns the media type the system database gives the extension.
///
/// The extension should begin with a leading dot, as in ".html".
pub fn type_by_extension(ext: &str) -> Option<&'static str> {
    registry().type_by_extension(ext)
}

/// Returns the media type the system database gives the filename.
pub fn type_by_filename(name: &str) -> Option<&'static str> {
    registry().type_by_filename(name)
}

/// Returns the extensions the system database lists for a media type.
pub fn extensions_by_type(name: &str) -> &'static [String] {
    registry().extensions_by_type(name)
}
