//! In-memory media type registry.
//!
//! A [`Registry`] maps filenames and extensions to media type names and back.
//! It keeps three lookup tiers:
//!
//! - an extension index, fed by `*.ext` patterns, for O(1) suffix lookups
//! - an exact index, fed by patterns without glob metacharacters
//! - an ordered list of every glob pattern, scanned only as a fallback
//!
//! Resolution by filename tries them in that order. Among globs the pattern
//! added first wins, so the order in which types are added matters.
//!
//! The registry has no internal locking. Populate it first, then share it
//! read-only.

use crate::pattern;
use globset::GlobMatcher;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A media type together with the patterns that select it.
///
/// This is what a loader produces for one line of input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaType {
    /// Media type name, e.g. `application/x-foo`.
    pub name: String,
    /// Extension globs, exact filenames or general glob expressions.
    pub globs: Vec<String>,
}

impl MediaType {
    /// Creates a media type with the given patterns.
    pub fn new<I, S>(name: impl Into<String>, globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            globs: globs.into_iter().map(Into::into).collect(),
        }
    }
}

/// A registered media type as stored in the registry.
#[derive(Debug, Clone, Default)]
pub struct MediaTypeEntry {
    name: String,
    globs: Vec<String>,
    extensions: Vec<String>,
}

impl MediaTypeEntry {
    /// The media type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every pattern added for this type, in insertion order.
    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    /// Dot-prefixed extensions derived from this type's `*.ext` patterns.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// A glob pattern waiting in the fallback scan.
#[derive(Debug)]
struct GlobEntry {
    owner: usize,
    pattern: String,
    matcher: Option<GlobMatcher>,
}

/// Registry of media types with extension, exact-name and glob lookups.
///
/// # Examples
///
/// ```
/// use tokio_mimetypes::Registry;
///
/// let mut registry = Registry::new();
/// registry.add("text/plain", ["*.txt", "README"]);
/// registry.add("text/x-makefile", ["[Mm]akefile", "*.mk"]);
///
/// assert_eq!(registry.type_by_extension(".txt"), Some("text/plain"));
/// assert_eq!(registry.type_by_filename("README"), Some("text/plain"));
/// assert_eq!(registry.type_by_filename("makefile"), Some("text/x-makefile"));
/// assert_eq!(registry.type_by_filename("unknown"), None);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    /// Name index. Entry ids are positions in this map.
    types: IndexMap<String, MediaTypeEntry>,
    by_extension: HashMap<String, usize>,
    by_exact: HashMap<String, usize>,
    globs: Vec<GlobEntry>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds patterns for the named media type.
    ///
    /// Patterns for a name that is already registered are merged into the
    /// existing entry. A pattern claimed by another type in the exact or
    /// extension index is taken over by this one.
    ///
    /// Adding never fails. A malformed glob is kept but never matches.
    pub fn add<I, S>(&mut self, name: &str, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = self.upsert(name);

        for glob in patterns {
            let glob: String = glob.into();

            if pattern::has_meta(&glob) {
                if let Some(ext) = pattern::derived_extension(&glob) {
                    let ext = ext.to_string();
                    self.types[id].extensions.push(ext.clone());
                    claim(&self.types, &mut self.by_extension, ext, id);
                }
                self.globs.push(GlobEntry {
                    owner: id,
                    matcher: pattern::compile(&glob),
                    pattern: glob.clone(),
                });
            } else {
                claim(&self.types, &mut self.by_exact, glob.clone(), id);
            }

            self.types[id].globs.push(glob);
        }
    }

    /// Adds a [`MediaType`] produced by a loader.
    pub fn add_media_type(&mut self, media_type: MediaType) {
        self.add(&media_type.name, media_type.globs);
    }

    /// Returns the id of the entry for `name`, creating it on first use.
    fn upsert(&mut self, name: &str) -> usize {
        if let Some(id) = self.types.get_index_of(name) {
            return id;
        }
        let (id, _) = self.types.insert_full(
            name.to_string(),
            MediaTypeEntry {
                name: name.to_string(),
                ..MediaTypeEntry::default()
            },
        );
        id
    }

    /// Returns the extensions derived for the media type.
    ///
    /// The returned extensions each begin with a leading dot, as in ".html",
    /// and keep insertion order including duplicates. An unknown type yields
    /// an empty slice.
    pub fn extensions_by_type(&self, name: &str) -> &[String] {
        self.types
            .get(name)
            .map_or(&[][..], |entry| entry.extensions())
    }

    /// Returns every pattern recorded for the media type.
    pub fn globs_by_type(&self, name: &str) -> &[String] {
        self.types.get(name).map_or(&[][..], |entry| entry.globs())
    }

    /// Returns the media type registered for the extension.
    ///
    /// The extension should begin with a leading dot, as in ".html". Only the
    /// extension index is consulted, and matching is case-sensitive.
    pub fn type_by_extension(&self, ext: &str) -> Option<&str> {
        self.by_extension.get(ext).map(|&id| self.name_of(id))
    }

    /// Returns the media type for a filename.
    ///
    /// An exact filename match wins over the extension, which wins over a
    /// general glob. Among globs the earliest added pattern wins.
    pub fn type_by_filename(&self, name: &str) -> Option<&str> {
        if let Some(&id) = self.by_exact.get(name) {
            return Some(self.name_of(id));
        }

        if let Some(found) = pattern::filename_extension(name)
            .and_then(|ext| self.type_by_extension(ext))
        {
            return Some(found);
        }

        self.globs
            .iter()
            .find(|glob| glob.matcher.as_ref().is_some_and(|m| m.is_match(name)))
            .map(|glob| {
                tracing::trace!(filename = name, pattern = %glob.pattern, "matched by glob");
                self.name_of(glob.owner)
            })
    }

    /// Returns the entry for a media type.
    pub fn get(&self, name: &str) -> Option<&MediaTypeEntry> {
        self.types.get(name)
    }

    /// Reports whether the media type has been added.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Iterates over entries in the order their names were first added.
    pub fn iter(&self) -> impl Iterator<Item = &MediaTypeEntry> + '_ {
        self.types.values()
    }

    /// Number of media types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Reports whether no media type has been added.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn name_of(&self, id: usize) -> &str {
        &self.types[id].name
    }
}

/// Points `key` at entry `id`, replacing any previous owner.
fn claim(
    types: &IndexMap<String, MediaTypeEntry>,
    index: &mut HashMap<String, usize>,
    key: String,
    id: usize,
) {
    if let Some(previous) = index.insert(key, id) {
        if previous != id {
            tracing::debug!(
                previous = %types[previous].name,
                current = %types[id].name,
                "pattern reassigned to another media type"
            );
        }
    }
}

impl Extend<MediaType> for Registry {
    fn extend<T: IntoIterator<Item = MediaType>>(&mut self, iter: T) {
        for media_type in iter {
            self.add_media_type(media_type);
        }
    }
}

impl FromIterator<MediaType> for Registry {
    fn from_iter<T: IntoIterator<Item = MediaType>>(iter: T) -> Self {
        let mut registry = Registry::new();
        registry.extend(iter);
        registry
    }
}
