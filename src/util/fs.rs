//! Filesystem scanning and directory staging.
//!
//! Scans fan out with rayon: every entry of a directory is stat'ed in
//! parallel and every subdirectory is descended in parallel. The first
//! failure fails the whole scan and sibling results are discarded.
//! Staging (`mkdirs`) is strictly sequential so parents exist before children.

use std::fs;
use std::io;
use std::path::Path;

use rayon::prelude::*;

use crate::builder::errors::{BuildError, BuildResult};
use crate::core::listing::{DirectoryListing, FilesByExtension};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

/// Stat a single entry. Entries that are neither a file nor a directory,
/// including dangling symlinks, yield `None`.
fn stat_entry(path: &Path) -> BuildResult<Option<EntryKind>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
        Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound && fs::symlink_metadata(path).is_ok() => {
            Ok(None)
        }
        Err(e) => Err(BuildError::io("failed to stat", path, e)),
    }
}

/// List the immediate subdirectories and files of `path`.
///
/// Entry names are sorted before classification so listings are stable
/// across runs on the same tree.
pub fn read_dir(path: &Path) -> BuildResult<DirectoryListing> {
    if !path.exists() {
        return Err(BuildError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut names = fs::read_dir(path)
        .map_err(|e| BuildError::io("failed to read directory", path, e))?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| BuildError::io("failed to read directory", path, e))?;
    names.sort();

    let kinds = names
        .par_iter()
        .map(|name| stat_entry(&path.join(name)))
        .collect::<BuildResult<Vec<_>>>()?;

    let mut listing = DirectoryListing::new();
    for (name, kind) in names.into_iter().zip(kinds) {
        match kind {
            Some(EntryKind::Directory) => listing.directories.push(name),
            Some(EntryKind::File) => listing.files.push(name),
            None => tracing::debug!("skipping {}/{}", path.display(), name),
        }
    }

    Ok(listing)
}

/// List every directory and file below `path`, relative to `path`.
///
/// There is no depth limit and no cycle detection: a symlink pointing at
/// one of its own ancestors recurses until the OS refuses.
pub fn read_dir_recursive(path: &Path) -> BuildResult<DirectoryListing> {
    let mut listing = read_dir(path)?;
    if listing.is_leaf() {
        return Ok(listing);
    }

    let children = listing
        .directories
        .par_iter()
        .map(|dir| read_dir_recursive(&path.join(dir)).map(|child| (dir.clone(), child)))
        .collect::<BuildResult<Vec<_>>>()?;

    for (dir, child) in children {
        listing.merge_child(&dir, child);
    }

    Ok(listing)
}

/// Recursively scan `path` and group its files by extension.
pub fn files_by_extension(path: &Path) -> BuildResult<FilesByExtension> {
    let listing = read_dir_recursive(path)?;
    Ok(FilesByExtension::from_listing(&listing))
}

/// Create a single directory. An existing entry counts as success.
pub fn mkdir(path: &Path) -> BuildResult<()> {
    match fs::create_dir(path) {
        Ok(()) => {
            tracing::debug!("created {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(BuildError::io("failed to create directory", path, e)),
    }
}

/// Create directories one at a time, in order, stopping at the first failure.
pub fn mkdirs<I, P>(paths: I) -> BuildResult<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        mkdir(path.as_ref())?;
    }
    Ok(())
}
