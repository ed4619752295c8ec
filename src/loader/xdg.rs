//! XDG shared-mime-info `globs` loader.
//!
//! Format: `mimetype:glob`
//! Example: `text/x-makefile:[Mm]akefile`
//!
//! See https://specifications.freedesktop.org/shared-mime-info-spec/

use crate::registry::MediaType;

use super::{read_lines, LineFormat, LoadFuture, Loader, LoaderReader};

/// Loader for the colon separated `globs` list, one pattern per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct XdgGlobsLoader;

impl LineFormat for XdgGlobsLoader {
    fn parse_line(&self, line: &str) -> Option<MediaType> {
        let mut fields = line.split(':');
        let name = fields.next()?;
        let glob = fields.next()?;

        // Exactly two fields, neither empty
        if fields.next().is_some() || name.is_empty() || glob.is_empty() {
            return None;
        }

        Some(MediaType::new(name, [glob]))
    }
}

impl Loader for XdgGlobsLoader {
    fn load<'a>(&'a self, reader: LoaderReader<'a>) -> LoadFuture<'a> {
        Box::pin(read_lines(self, reader))
    }
}
