//! Directory listings and extension classification.
//!
//! Listings hold `/`-separated paths relative to the directory that was
//! scanned. A recursive listing is an ordinary [`DirectoryListing`] whose
//! entries reach every nested level.

use std::collections::BTreeMap;

/// Immediate (or, after merging, nested) entries of a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Subdirectory paths
    pub directories: Vec<String>,
    /// File paths
    pub files: Vec<String>,
}

impl DirectoryListing {
    /// Create an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the listing has no subdirectories.
    pub fn is_leaf(&self) -> bool {
        self.directories.is_empty()
    }

    /// Merge the recursive listing of subdirectory `dir` into this one.
    ///
    /// Every nested entry is rewritten as `dir/<entry>` and appended after
    /// the entries already present, so parents always precede children.
    pub fn merge_child(&mut self, dir: &str, child: DirectoryListing) {
        self.directories.extend(
            child
                .directories
                .into_iter()
                .map(|d| format!("{}/{}", dir, d)),
        );
        self.files
            .extend(child.files.into_iter().map(|f| format!("{}/{}", dir, f)));
    }
}

/// Extension of the final path segment, taken after the last `.`.
///
/// Returns `None` when the basename has no `.` at all. The extension is
/// returned verbatim, so `A.C` and `a.c` classify differently.
pub fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Files grouped by extension, in discovery order within each group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesByExtension {
    groups: BTreeMap<String, Vec<String>>,
}

impl FilesByExtension {
    /// Classify the files of a listing. Files without an extension are dropped.
    pub fn from_listing(listing: &DirectoryListing) -> Self {
        Self::from_files(listing.files.iter().map(String::as_str))
    }

    /// Classify an arbitrary sequence of relative file paths.
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a str>) -> Self {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for file in files {
            if let Some(ext) = extension_of(file) {
                groups
                    .entry(ext.to_string())
                    .or_default()
                    .push(file.to_string());
            }
        }
        FilesByExtension { groups }
    }

    /// Files classified under `ext`, or an empty slice.
    pub fn get(&self, ext: &str) -> &[String] {
        self.groups.get(ext).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of classified files.
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("main.c"), Some("c"));
        assert_eq!(extension_of("a.b.c"), Some("c"));
        assert_eq!(extension_of("lib/util.cpp"), Some("cpp"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("dir.d/README"), None);
        assert_eq!(extension_of(".gitignore"), Some("gitignore"));
    }

    #[test]
    fn test_classification_drops_extensionless_files() {
        let files = FilesByExtension::from_files(["main.c", "LICENSE", "net/socket.c", "x.cpp"]);

        assert_eq!(files.get("c"), ["main.c", "net/socket.c"]);
        assert_eq!(files.get("cpp"), ["x.cpp"]);
        assert_eq!(files.file_count(), 3);
        assert!(files.get("").is_empty());
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        let files = FilesByExtension::from_files(["a.c", "b.C"]);
        assert_eq!(files.get("c"), ["a.c"]);
        assert_eq!(files.get("C"), ["b.C"]);
    }

    #[test]
    fn test_get_missing_extension() {
        let files = FilesByExtension::from_files(["a.c"]);
        assert!(files.get("o").is_empty());
    }

    #[test]
    fn test_merge_child_prefixes_entries() {
        let mut parent = DirectoryListing {
            directories: vec!["net".to_string()],
            files: vec!["main.c".to_string()],
        };
        let child = DirectoryListing {
            directories: vec!["tcp".to_string()],
            files: vec!["socket.c".to_string(), "tcp/conn.c".to_string()],
        };

        parent.merge_child("net", child);

        assert_eq!(parent.directories, ["net", "net/tcp"]);
        assert_eq!(parent.files, ["main.c", "net/socket.c", "net/tcp/conn.c"]);
    }
}
