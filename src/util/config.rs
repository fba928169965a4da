//! Build configuration.
//!
//! A project is configured by an optional `luo.toml` next to the source
//! tree. The file is read as a [`PartialConfig`]: every key is optional,
//! unknown keys are rejected, and whatever is present is merged over the
//! defaults with [`BuildConfig::merge`].
//!
//! ```toml
//! libraries = ["m"]
//!
//! [compiler]
//! c = "clang"
//! cpp = "clang++"
//!
//! [path]
//! source = "src"
//! build = "build"
//! includes = ["include"]
//!
//! [extension.source]
//! cpp = "cc"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "luo.toml";

/// Complete build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Compiler executables
    pub compiler: CompilerConfig,
    /// Libraries passed as `-l<name>` when linking, in order
    pub libraries: Vec<String>,
    /// Source, build, and include paths
    pub path: PathConfig,
    /// Extension routing
    pub extension: ExtensionConfig,
}

/// Compiler executables for each language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// C compiler, also used as the link driver
    pub c: String,
    /// C++ compiler
    pub cpp: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            c: "gcc".to_string(),
            cpp: "g++".to_string(),
        }
    }
}

/// Project paths, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Build output root
    pub build: String,
    /// Source root
    pub source: String,
    /// Include search paths, passed as `-I<path>`
    pub includes: Vec<String>,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            build: "build".to_string(),
            source: "src".to_string(),
            includes: Vec::new(),
        }
    }
}

/// Extension settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Source extensions routed to each compiler
    pub source: SourceExtensions,
}

/// Source file extensions (without the dot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceExtensions {
    pub c: String,
    pub cpp: String,
}

impl Default for SourceExtensions {
    fn default() -> Self {
        SourceExtensions {
            c: "c".to_string(),
            cpp: "cpp".to_string(),
        }
    }
}

/// Configuration overlay: every leaf is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub compiler: Option<PartialCompilerConfig>,
    pub libraries: Option<Vec<String>>,
    pub path: Option<PartialPathConfig>,
    pub extension: Option<PartialExtensionConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialCompilerConfig {
    pub c: Option<String>,
    pub cpp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialPathConfig {
    pub build: Option<String>,
    pub source: Option<String>,
    pub includes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialExtensionConfig {
    pub source: Option<PartialSourceExtensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSourceExtensions {
    pub c: Option<String>,
    pub cpp: Option<String>,
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl BuildConfig {
    /// Merge an overlay into this configuration (overlay takes precedence).
    ///
    /// Nested sections merge key by key; sequences are replaced, not appended.
    pub fn merge(&mut self, other: PartialConfig) {
        if let Some(compiler) = other.compiler {
            overwrite(&mut self.compiler.c, compiler.c);
            overwrite(&mut self.compiler.cpp, compiler.cpp);
        }
        overwrite(&mut self.libraries, other.libraries);
        if let Some(path) = other.path {
            overwrite(&mut self.path.build, path.build);
            overwrite(&mut self.path.source, path.source);
            overwrite(&mut self.path.includes, path.includes);
        }
        if let Some(source) = other.extension.and_then(|e| e.source) {
            overwrite(&mut self.extension.source.c, source.c);
            overwrite(&mut self.extension.source.cpp, source.cpp);
        }
    }

    /// Defaults with `overlay` merged on top.
    pub fn with_overlay(overlay: PartialConfig) -> Self {
        let mut config = BuildConfig::default();
        config.merge(overlay);
        config
    }

    /// Append a library to link against.
    pub fn add_library(&mut self, lib: impl Into<String>) {
        self.libraries.push(lib.into());
    }

    /// Append several libraries to link against.
    pub fn add_libraries<I, S>(&mut self, libs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libraries.extend(libs.into_iter().map(Into::into));
    }

    /// Check whether `lib` is already linked.
    pub fn has_library(&self, lib: &str) -> bool {
        self.libraries.iter().any(|l| l == lib)
    }
}

impl PartialConfig {
    /// Parse an overlay from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse build configuration")
    }
}

/// Load a configuration file, falling back to defaults if it doesn't exist.
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(BuildConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let overlay = PartialConfig::from_toml(&contents)
        .with_context(|| format!("invalid config: {}", path.display()))?;

    Ok(BuildConfig::with_overlay(overlay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.compiler.c, "gcc");
        assert_eq!(config.compiler.cpp, "g++");
        assert!(config.libraries.is_empty());
        assert_eq!(config.path.source, "src");
        assert_eq!(config.path.build, "build");
        assert!(config.path.includes.is_empty());
        assert_eq!(config.extension.source.c, "c");
        assert_eq!(config.extension.source.cpp, "cpp");
    }

    #[test]
    fn test_merge_only_present_leaves() {
        let overlay = PartialConfig::from_toml(
            r#"
            [compiler]
            cpp = "clang++"

            [path]
            includes = ["include", "vendor"]
            "#,
        )
        .unwrap();

        let config = BuildConfig::with_overlay(overlay);
        assert_eq!(config.compiler.c, "gcc");
        assert_eq!(config.compiler.cpp, "clang++");
        assert_eq!(config.path.source, "src");
        assert_eq!(config.path.includes, ["include", "vendor"]);
    }

    #[test]
    fn test_merge_replaces_sequences() {
        let mut config = BuildConfig::default();
        config.add_libraries(["m", "pthread"]);

        config.merge(PartialConfig {
            libraries: Some(vec!["z".to_string()]),
            ..Default::default()
        });
        assert_eq!(config.libraries, ["z"]);
    }

    #[test]
    fn test_nested_extension_merge() {
        let overlay = PartialConfig::from_toml("[extension.source]\ncpp = \"cc\"\n").unwrap();
        let config = BuildConfig::with_overlay(overlay);
        assert_eq!(config.extension.source.c, "c");
        assert_eq!(config.extension.source.cpp, "cc");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(PartialConfig::from_toml("optimize = true\n").is_err());
        assert!(PartialConfig::from_toml("[compiler]\nfortran = \"gfortran\"\n").is_err());
    }

    #[test]
    fn test_add_library_preserves_order() {
        let mut config = BuildConfig::default();
        config.add_library("m");
        config.add_libraries(vec!["pthread", "dl"]);
        assert_eq!(config.libraries, ["m", "pthread", "dl"]);
        assert!(config.has_library("pthread"));
        assert!(!config.has_library("stdc++"));
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "libraries = [\"m\"]\n[path]\nbuild = \"out\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.libraries, ["m"]);
        assert_eq!(config.path.build, "out");
    }

    #[test]
    fn test_load_config_invalid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "libraries = \"m\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid config"));
    }
}
