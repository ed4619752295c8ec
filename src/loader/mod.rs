//! Loaders that populate a [`Registry`] from a byte stream.
//!
//! A [`Loader`] reads a whole stream and returns a fresh registry, or an error
//! with nothing partially built handed back.
//!
//! Most media type files are line-oriented, so a [`LineFormat`] only has to
//! turn one line into a [`MediaType`]. The line driver in this module does the
//! rest: it trims lines, skips blanks and `#` comments and counts lines for
//! error reporting. Wrap a line format in [`LineLoader`] to register it.
//!
//! Two formats are provided:
//! - [`ApacheLoader`], the `mime.types` tab-table format
//! - [`XdgGlobsLoader`], the XDG shared-mime-info `globs` format
//!
//! [`Loaders`] maps format names to loaders so callers can dispatch by name.

mod apache;
mod xdg;

pub use apache::ApacheLoader;
pub use xdg::XdgGlobsLoader;

use crate::error::{Error, Result};
use crate::registry::{MediaType, Registry};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Format name of [`ApacheLoader`] in [`Loaders::with_defaults`].
pub const APACHE_FORMAT: &str = "apache";

/// Format name of [`XdgGlobsLoader`] in [`Loaders::with_defaults`].
pub const XDG_FORMAT: &str = "xdg";

/// Stream handed to a [`Loader`].
pub type LoaderReader<'a> = Box<dyn AsyncRead + Unpin + Send + 'a>;

/// Future returned by [`Loader::load`].
pub type LoadFuture<'a> = BoxFuture<'a, Result<Registry>>;

/// Builds a registry from a stream.
pub trait Loader: Send + Sync {
    /// Reads `reader` to the end and returns the registry it describes.
    fn load<'a>(&'a self, reader: LoaderReader<'a>) -> LoadFuture<'a>;
}

/// Parses a single line of a line-oriented media type file.
///
/// Lines handed to `parse_line` are already trimmed, non-empty and not
/// comments. Returning `None` rejects the line.
///
/// Any `Fn(&str) -> Option<MediaType>` closure is a line format.
pub trait LineFormat: Send + Sync {
    /// Parses one line into a media type and its patterns.
    fn parse_line(&self, line: &str) -> Option<MediaType>;
}

impl<F> LineFormat for F
where
    F: Fn(&str) -> Option<MediaType> + Send + Sync,
{
    fn parse_line(&self, line: &str) -> Option<MediaType> {
        self(line)
    }
}

/// Adapts a [`LineFormat`] into a [`Loader`] using the strict line driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineLoader<F>(pub F);

impl<F: LineFormat> Loader for LineLoader<F> {
    fn load<'a>(&'a self, reader: LoaderReader<'a>) -> LoadFuture<'a> {
        Box::pin(read_lines(&self.0, reader))
    }
}

/// What the line driver does with a line the format rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejects {
    /// Abort with [`Error::Format`].
    Fail,
    /// Skip the line.
    Skip,
}

/// Turns raw lines into media types, counting lines as it goes.
struct LineFeeder<'a> {
    format: &'a dyn LineFormat,
    rejects: Rejects,
    line: usize,
}

impl<'a> LineFeeder<'a> {
    fn new(format: &'a dyn LineFormat, rejects: Rejects) -> Self {
        Self {
            format,
            rejects,
            line: 0,
        }
    }

    /// Returns the parsed entry, or `None` for lines that carry nothing.
    fn feed(&mut self, raw: &str) -> Result<Option<MediaType>> {
        self.line += 1;

        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        match (self.format.parse_line(line), self.rejects) {
            (Some(media_type), _) => Ok(Some(media_type)),
            (None, Rejects::Skip) => {
                tracing::trace!(line = self.line, "skipping malformed entry");
                Ok(None)
            }
            (None, Rejects::Fail) => {
                tracing::debug!(line = self.line, "rejecting malformed entry");
                Err(Error::Format { line: self.line })
            }
        }
    }
}

/// Reads a registry from an async reader in a line format.
///
/// # Examples
///
/// ```
/// use tokio_mimetypes::loader::{read_lines, XdgGlobsLoader};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> tokio_mimetypes::Result<()> {
/// let input = b"# comment\ntext/plain:*.txt\n";
/// let registry = read_lines(&XdgGlobsLoader, &input[..]).await?;
/// assert_eq!(registry.type_by_extension(".txt"), Some("text/plain"));
/// # Ok(())
/// # }
/// ```
pub async fn read_lines<R>(format: &dyn LineFormat, reader: R) -> Result<Registry>
where
    R: AsyncRead + Unpin,
{
    let mut registry = Registry::new();
    let mut feeder = LineFeeder::new(format, Rejects::Fail);
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(media_type) = feeder.feed(&line)? {
            registry.add_media_type(media_type);
        }
    }
    tracing::debug!(lines = feeder.line, types = registry.len(), "media types loaded");
    Ok(registry)
}

/// Reads a registry from a blocking reader in a line format.
pub fn read_lines_sync<R: BufRead>(format: &dyn LineFormat, reader: R) -> Result<Registry> {
    let mut registry = Registry::new();
    merge_lines_sync(format, reader, Rejects::Fail, |media_type| {
        registry.add_media_type(media_type)
    })?;
    Ok(registry)
}

/// Hands every entry of a line format file to `add`, skipping lines the
/// format rejects. I/O errors still abort.
pub(crate) fn merge_lenient_sync<R, F>(format: &dyn LineFormat, reader: R, add: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(MediaType),
{
    merge_lines_sync(format, reader, Rejects::Skip, add)
}

fn merge_lines_sync<R, F>(
    format: &dyn LineFormat,
    reader: R,
    rejects: Rejects,
    mut add: F,
) -> Result<()>
where
    R: BufRead,
    F: FnMut(MediaType),
{
    let mut feeder = LineFeeder::new(format, rejects);
    for line in reader.lines() {
        if let Some(media_type) = feeder.feed(&line?)? {
            add(media_type);
        }
    }
    tracing::debug!(lines = feeder.line, "media type lines read");
    Ok(())
}

/// Named loaders for dispatching by format.
///
/// Build one at startup and pass it to whatever needs to load files by
/// format name.
///
/// # Examples
///
/// ```no_run
/// use tokio_mimetypes::loader::Loaders;
///
/// # async fn example() -> tokio_mimetypes::Result<()> {
/// let loaders = Loaders::with_defaults();
/// let registry = loaders.load("/usr/share/mime/globs", "xdg").await?;
/// println!("{:?}", registry.type_by_filename("Makefile"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Loaders {
    by_format: HashMap<String, Arc<dyn Loader>>,
}

impl Loaders {
    /// Creates an empty set of loaders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set with the `apache` and `xdg` formats registered.
    pub fn with_defaults() -> Self {
        let mut loaders = Self::new();
        loaders.add_loader(APACHE_FORMAT, ApacheLoader);
        loaders.add_loader(XDG_FORMAT, XdgGlobsLoader);
        loaders
    }

    /// Registers a loader under a format name, replacing any previous one.
    pub fn add_loader(&mut self, format: impl Into<String>, loader: impl Loader + 'static) {
        self.by_format.insert(format.into(), Arc::new(loader));
    }

    /// Registers a line format under a format name.
    pub fn add_line_format(&mut self, format: impl Into<String>, line_format: impl LineFormat + 'static) {
        self.add_loader(format, LineLoader(line_format));
    }

    /// Returns the loader for a format name.
    pub fn get(&self, format: &str) -> Option<&dyn Loader> {
        self.by_format.get(format).map(|loader| loader.as_ref())
    }

    /// Iterates over the registered format names.
    pub fn formats(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_format.keys().map(String::as_str)
    }

    fn require(&self, format: &str) -> Result<&dyn Loader> {
        self.get(format)
            .ok_or_else(|| Error::UnknownLoader(format.to_string()))
    }

    /// Opens the file at `path` and loads it with the loader for `format`.
    ///
    /// Fails with [`Error::UnknownLoader`] before touching the file when no
    /// loader is registered for `format`.
    pub async fn load(&self, path: impl AsRef<Path>, format: &str) -> Result<Registry> {
        let loader = self.require(format)?;
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), format, "loading media types");
        let file = tokio::fs::File::open(path).await?;
        loader.load(Box::new(file)).await
    }

    /// Loads from an async reader with the loader for `format`.
    pub async fn load_reader<R>(&self, reader: R, format: &str) -> Result<Registry>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.require(format)?.load(Box::new(reader)).await
    }

    /// Blocking variant of [`Loaders::load`].
    ///
    /// The file is read into memory first, so the loader never waits on I/O
    /// and no runtime is needed.
    pub fn load_sync(&self, path: impl AsRef<Path>, format: &str) -> Result<Registry> {
        let loader = self.require(format)?;
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), format, "loading media types");
        let data = std::fs::read(path)?;
        futures::executor::block_on(loader.load(Box::new(&data[..])))
    }
}

impl std::fmt::Debug for Loaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formats: Vec<_> = self.formats().collect();
        formats.sort_unstable();
        f.debug_struct("Loaders").field("formats", &formats).finish()
    }
}
