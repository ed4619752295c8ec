//! Apache `mime.types` loader.
//!
//! Format: `mimetype ext1 ext2 ext3 ...`
//! Example: `text/plain	txt text`
//!
//! Extensions may be written bare (`txt`) or dot-prefixed (`.txt`). Each one
//! is added as the glob `*.txt`. A token starting with `#` ends the line.

use crate::registry::MediaType;

use super::{read_lines, LineFormat, LoadFuture, Loader, LoaderReader};

/// Loader for the whitespace separated `mime.types` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApacheLoader;

impl LineFormat for ApacheLoader {
    fn parse_line(&self, line: &str) -> Option<MediaType> {
        let mut fields = line.split_whitespace();
        let name = fields.next()?;
        let mut fields = fields.peekable();

        // Need at least type and one extension
        fields.peek()?;

        let globs = fields
            .take_while(|ext| !ext.starts_with('#'))
            .map(|ext| format!("*.{}", ext.strip_prefix('.').unwrap_or(ext)));

        Some(MediaType::new(name, globs))
    }
}

impl Loader for ApacheLoader {
    fn load<'a>(&'a self, reader: LoaderReader<'a>) -> LoadFuture<'a> {
        Box::pin(read_lines(self, reader))
    }
}
