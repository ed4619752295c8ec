//! Pattern classification and glob compilation.
//!
//! A pattern is one of three things:
//! - a plain extension glob, `*.` followed by a suffix with no metacharacters
//! - an exact filename, a string with no metacharacters at all
//! - a general glob expression
//!
//! Glob syntax is the shell style used by path matching: `*` matches any run of
//! characters except `/`, `?` matches a single character other than `/`,
//! `[...]` matches a character class and `\` escapes the next character.

use globset::{GlobBuilder, GlobMatcher};

/// Characters that make a pattern a glob.
pub const METACHARACTERS: &[char] = &['*', '?', '[', '\\'];

/// Reports whether the character is a glob metacharacter.
pub fn is_meta(c: char) -> bool {
    METACHARACTERS.contains(&c)
}

/// Reports whether the pattern contains any glob metacharacter.
pub fn has_meta(pattern: &str) -> bool {
    pattern.contains(METACHARACTERS)
}

/// Returns the dot-prefixed extension a `*.ext` pattern stands for.
///
/// Only the restricted form qualifies: the pattern must start with `*.`,
/// carry at least one more character, and that suffix must be free of
/// metacharacters.
///
/// ```
/// use tokio_mimetypes::pattern::derived_extension;
///
/// assert_eq!(derived_extension("*.txt"), Some(".txt"));
/// assert_eq!(derived_extension("*.tar.gz"), Some(".tar.gz"));
/// assert_eq!(derived_extension("*.[ch]"), None);
/// assert_eq!(derived_extension("*."), None);
/// ```
pub fn derived_extension(pattern: &str) -> Option<&str> {
    let suffix = pattern.strip_prefix("*.")?;
    if suffix.is_empty() || has_meta(suffix) {
        return None;
    }
    Some(&pattern[1..])
}

/// Returns the extension of the final path element, including the dot.
///
/// The extension is everything from the last `.` of the last `/`-separated
/// element. Returns `None` when that element has no dot or the dot is the
/// last character.
///
/// ```
/// use tokio_mimetypes::pattern::filename_extension;
///
/// assert_eq!(filename_extension("archive.tar.gz"), Some(".gz"));
/// assert_eq!(filename_extension("dir.d/Makefile"), None);
/// assert_eq!(filename_extension("trailing."), None);
/// ```
pub fn filename_extension(name: &str) -> Option<&str> {
    let element_start = name.rfind('/').map_or(0, |i| i + 1);
    let dot = name[element_start..].rfind('.')? + element_start;
    let ext = &name[dot..];
    if ext.len() > 1 {
        Some(ext)
    } else {
        None
    }
}

/// Rewrites a pattern so only `*`, `?`, `[...]` and `\` are special.
///
/// Braces and commas are escaped so they match literally, and runs of `*`
/// collapse to one so no `**` can match across `/`. Escaped characters and
/// character class bodies are copied unchanged.
fn restrict_syntax(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push('*');
            }
            '[' => {
                out.push(c);
                // A leading negation and a `]` right after it belong to the class
                if let Some(&neg @ ('!' | '^')) = chars.peek() {
                    out.push(neg);
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
                for member in chars.by_ref() {
                    out.push(member);
                    if member == ']' {
                        break;
                    }
                }
            }
            '{' | '}' | ',' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Compiles a glob pattern for whole-name matching.
///
/// Returns `None` for patterns that are not valid globs, such as an unclosed
/// character class. Callers treat those as never matching.
pub fn compile(pattern: &str) -> Option<GlobMatcher> {
    match GlobBuilder::new(&restrict_syntax(pattern))
        .literal_separator(true)
        .backslash_escape(true)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(err) => {
            tracing::trace!(pattern, error = %err, "glob pattern does not compile");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_meta() {
        assert!(is_meta('*'));
        assert!(is_meta('?'));
        assert!(is_meta('['));
        assert!(is_meta('\\'));

        assert!(!is_meta(']'));
        assert!(!is_meta('.'));
        assert!(!is_meta('{'));
    }

    #[test]
    fn test_has_meta() {
        assert!(has_meta("*.txt"));
        assert!(has_meta("README?"));
        assert!(has_meta("[Mm]akefile"));
        assert!(has_meta("a\\b"));

        assert!(!has_meta("Makefile"));
        assert!(!has_meta(".txt"));
        assert!(!has_meta(""));
    }

    #[test]
    fn test_derived_extension() {
        assert_eq!(derived_extension("*.ext1"), Some(".ext1"));
        assert_eq!(derived_extension("*.a"), Some(".a"));

        assert_eq!(derived_extension("*.*"), None);
        assert_eq!(derived_extension("*.t?t"), None);
        assert_eq!(derived_extension("**.txt"), None);
        assert_eq!(derived_extension(".txt"), None);
        assert_eq!(derived_extension("*txt"), None);
        assert_eq!(derived_extension("*"), None);
    }

    #[test]
    fn test_filename_extension() {
        assert_eq!(filename_extension("a.ext1"), Some(".ext1"));
        assert_eq!(filename_extension(".bashrc"), Some(".bashrc"));
        assert_eq!(filename_extension("a/b.c/d.txt"), Some(".txt"));

        assert_eq!(filename_extension("exact1"), None);
        assert_eq!(filename_extension(""), None);
        assert_eq!(filename_extension("."), None);
        assert_eq!(filename_extension("a.b/c"), None);
    }

    #[test]
    fn test_compile_matches_whole_name() {
        let m = compile("com*ple*x").unwrap();
        assert!(m.is_match("complex"));
        assert!(m.is_match("commpleex"));
        assert!(!m.is_match("complexity"));
        assert!(!m.is_match("xcomplex"));
    }

    #[test]
    fn test_compile_star_does_not_cross_separator() {
        let m = compile("*.txt").unwrap();
        assert!(m.is_match("notes.txt"));
        assert!(!m.is_match("dir/notes.txt"));

        let m = compile("a?c").unwrap();
        assert!(m.is_match("abc"));
        assert!(!m.is_match("a/c"));
    }

    #[test]
    fn test_compile_classes_and_escapes() {
        let m = compile("[Mm]akefile").unwrap();
        assert!(m.is_match("Makefile"));
        assert!(m.is_match("makefile"));
        assert!(!m.is_match("Rakefile"));

        let m = compile("file[!0-9]").unwrap();
        assert!(m.is_match("filex"));
        assert!(!m.is_match("file7"));

        let m = compile("what\\?").unwrap();
        assert!(m.is_match("what?"));
        assert!(!m.is_match("whats"));
    }

    #[test]
    fn test_restrict_syntax() {
        assert_eq!(restrict_syntax("*{a,b}"), "*\\{a\\,b\\}");
        assert_eq!(restrict_syntax("a**b***"), "a*b*");
        assert_eq!(restrict_syntax("\\**"), "\\**");
        assert_eq!(restrict_syntax("[{,}]x{"), "[{,}]x\\{");
        assert_eq!(restrict_syntax("[!]*]"), "[!]*]");
        assert_eq!(restrict_syntax("com*ple*x"), "com*ple*x");
    }

    #[test]
    fn test_compile_braces_are_literal() {
        let m = compile("*{a,b}").unwrap();
        assert!(m.is_match("x{a,b}"));
        assert!(!m.is_match("xa"));
        assert!(!m.is_match("xb"));

        let m = compile("*{").unwrap();
        assert!(m.is_match("x{"));
    }

    #[test]
    fn test_compile_double_star_stays_in_element() {
        let m = compile("**").unwrap();
        assert!(m.is_match("ab"));
        assert!(!m.is_match("a/b"));

        let m = compile("a**z").unwrap();
        assert!(m.is_match("abcz"));
        assert!(!m.is_match("a/z"));
    }

    #[test]
    fn test_compile_rejects_malformed() {
        assert!(compile("[abc").is_none());
    }
}
