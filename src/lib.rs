//! Filename and extension based media type lookup with async-first loaders.
//!
//! This crate provides:
//! - An in-memory [`Registry`] resolving filenames by exact name, extension
//!   and shell-style glob, plus the reverse extension listing
//! - Loaders for Apache `mime.types` tables and XDG shared-mime-info `globs` files
//! - Dispatch by format name through an explicit [`Loaders`] map
//! - A lazily loaded registry built from the local system's database
//!
//! File reading is async-first using tokio, with blocking variants.
//!
//! ```
//! use tokio_mimetypes::Registry;
//!
//! let mut registry = Registry::new();
//! registry.add("application/x-complex-glob-foo", ["com*ple*x", "c*omp*lex"]);
//! registry.add("text/plain", ["*.txt"]);
//!
//! assert_eq!(registry.type_by_filename("notes.txt"), Some("text/plain"));
//! assert_eq!(registry.type_by_filename("commpleex"), Some("application/x-complex-glob-foo"));
//! assert_eq!(registry.extensions_by_type("text/plain"), [".txt"]);
//! ```

pub mod error;
pub mod loader;
pub mod pattern;
pub mod registry;
pub mod system;

mod platform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use loader::{ApacheLoader, LineFormat, Loader, Loaders, XdgGlobsLoader};
pub use registry::{MediaType, MediaTypeEntry, Registry};
