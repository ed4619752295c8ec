//! Unix-specific media type loading.
//!
//! Implements loading from:
//! - FreeDesktop Shared MIME-info Database (globs format)
//! - Traditional mime.types files

use crate::error::Result;
use crate::loader::{merge_lenient_sync, ApacheLoader, LineFormat, Loaders, XDG_FORMAT};
use crate::pattern::derived_extension;
use crate::registry::Registry;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Paths to FreeDesktop Shared MIME-info Database globs files.
const MIME_GLOBS: &[&str] = &["/usr/local/share/mime/globs", "/usr/share/mime/globs"];

/// Common locations for mime.types files on Unix.
const TYPE_FILES: &[&str] = &[
    "/etc/mime.types",
    "/etc/apache2/mime.types",
    "/etc/apache/mime.types",
    "/etc/httpd/conf/mime.types",
];

/// Loads the system database.
///
/// The first readable globs file wins. Without one, every readable
/// mime.types file is merged, earlier paths taking precedence.
pub(super) fn load_registry_unix() -> Registry {
    let loaders = Loaders::with_defaults();

    for path in MIME_GLOBS {
        match loaders.load_sync(path, XDG_FORMAT) {
            Ok(registry) => return registry,
            Err(err) => tracing::debug!(path, error = %err, "skipping media type database"),
        }
    }

    let mut registry = Registry::new();
    for path in TYPE_FILES {
        if let Err(err) = merge_mime_file(&mut registry, &ApacheLoader, path) {
            tracing::debug!(path, error = %err, "skipping media type database");
        }
    }
    registry
}

/// Adds entries from a mime.types file to `registry`.
///
/// Real-world mime.types files list many types with no extensions, so lines
/// the format rejects are skipped here instead of failing the whole file.
/// Extensions already claimed by an earlier file are left alone.
fn merge_mime_file(
    registry: &mut Registry,
    format: &dyn LineFormat,
    path: impl AsRef<Path>,
) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);

    merge_lenient_sync(format, reader, |mut media_type| {
        media_type.globs.retain(|glob| {
            derived_extension(glob).map_or(true, |ext| registry.type_by_extension(ext).is_none())
        });
        registry.add_media_type(media_type);
    })
}
