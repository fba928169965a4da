//! Core data types: source languages and directory listings.

pub mod language;
pub mod listing;

pub use language::{Language, CXX_RUNTIME_LIBRARY};
pub use listing::{extension_of, DirectoryListing, FilesByExtension};
