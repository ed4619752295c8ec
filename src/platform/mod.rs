//! Platform-specific media type databases.

#[cfg(unix)]
mod unix;

use crate::registry::Registry;

/// Builds a registry from the platform's media type database.
///
/// On Unix systems, reads from:
/// - /usr/local/share/mime/globs, /usr/share/mime/globs (FreeDesktop Shared MIME-info Database)
/// - /etc/mime.types, /etc/apache2/mime.types, etc.
///
/// Other platforms get an empty registry.
pub fn load_registry() -> Registry {
    #[cfg(unix)]
    {
        unix::load_registry_unix()
    }

    #[cfg(not(unix))]
    {
        Registry::new()
    }
}
