//! Context types for rule execution.

use crate::syntax::{SourceCode, TextRange};
use crate::types::Location;
use std::path::{Path, PathBuf};

/// Context provided to per-file rules.
///
/// Carries the file identity so rules can build [`Location`]s without
/// knowing where the analyzer found the file.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
        }
    }

    /// Builds a location for a byte range of `source`.
    #[must_use]
    pub fn location(&self, source: &SourceCode, range: TextRange) -> Location {
        Location::from_range(self.relative_path.clone(), source, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let ctx = FileContext::new(Path::new("/repo/src/app.js"), Path::new("/repo"));
        assert_eq!(ctx.relative_path, PathBuf::from("src/app.js"));

        let outside = FileContext::new(Path::new("/elsewhere/app.js"), Path::new("/repo"));
        assert_eq!(outside.relative_path, PathBuf::from("/elsewhere/app.js"));
    }

    #[test]
    fn test_location_is_one_indexed() {
        let source = crate::parse("let a = 1;\nfoo && bar;").expect("parses");
        let ctx = FileContext::new(Path::new("app.js"), Path::new("."));
        let offset = source.text().find("&&").unwrap_or_default();

        let location = ctx.location(&source, TextRange::new(offset, offset + 2));
        assert_eq!(location.line, 2);
        assert_eq!(location.column, 5);
        assert_eq!(location.end_line, 2);
        assert_eq!(location.end_column, 7);
        assert_eq!(location.offset, offset);
        assert_eq!(location.length, 2);
    }
}
