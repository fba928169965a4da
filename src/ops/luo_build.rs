//! Implementation of `luo compile`, `luo link`, and `luo build`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::builder::compile;
use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::invoker::{Invoker, ProcessInvoker};
use crate::builder::link;
use crate::util::config::{BuildConfig, PartialConfig};

/// A project rooted at a directory, with its build configuration.
///
/// Configuration may be changed between builds; within a single build it is
/// only touched to add the C++ runtime library, before compilers start.
#[derive(Debug)]
pub struct Luo<I: Invoker = ProcessInvoker> {
    root: PathBuf,
    config: BuildConfig,
    invoker: I,
}

impl Luo<ProcessInvoker> {
    /// Open the project in the current working directory.
    pub fn new(config: BuildConfig) -> Result<Self> {
        let root = std::env::current_dir().context("failed to determine current directory")?;
        Ok(Self::with_root(root, config))
    }

    /// Open the project at `root`. Compilers run with `root` as working directory.
    pub fn with_root(root: impl AsRef<Path>, config: BuildConfig) -> Self {
        let invoker = ProcessInvoker::new(root.as_ref());
        Self::with_invoker(root, config, invoker)
    }
}

impl<I: Invoker> Luo<I> {
    /// Open the project at `root` with a custom compiler invoker.
    pub fn with_invoker(root: impl AsRef<Path>, config: BuildConfig, invoker: I) -> Self {
        Luo {
            root: root.as_ref().to_path_buf(),
            config,
            invoker,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Merge a configuration overlay into the current configuration.
    pub fn configure(&mut self, overlay: PartialConfig) {
        self.config.merge(overlay);
    }

    /// Link against one more library.
    pub fn add_library(&mut self, lib: impl Into<String>) {
        self.config.add_library(lib);
    }

    /// Link against several more libraries.
    pub fn add_libraries<T, S>(&mut self, libs: T)
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.add_libraries(libs);
    }

    /// Compile every source file into `<build>/.luo`.
    pub fn compile(&mut self) -> BuildResult<Vec<String>> {
        compile::compile(&self.root, &mut self.config, &self.invoker)
    }

    /// Link every staged object into `<build>/<project dir name>`.
    pub fn link(&self) -> BuildResult<PathBuf> {
        link::link(&self.root, &self.config, &self.invoker)
    }

    /// Compile, then link if every unit compiled.
    pub fn build(&mut self) -> BuildResult<PathBuf> {
        let start = Instant::now();

        let objects = self.compile()?;
        let exe = self.link()?;

        tracing::info!(
            "Finished {} ({} objects) in {:.2}s",
            exe.display(),
            objects.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(exe)
    }

    /// Build, handing any failure to `on_failure` instead of returning it.
    pub fn build_with<F>(&mut self, on_failure: F) -> Option<PathBuf>
    where
        F: FnOnce(BuildError),
    {
        match self.build() {
            Ok(exe) => Some(exe),
            Err(e) => {
                on_failure(e);
                None
            }
        }
    }

    /// Build, dumping any failure to the log.
    pub fn build_or_trace(&mut self) -> Option<PathBuf> {
        self.build_with(|e| tracing::error!("build failed: {:#?}", e))
    }
}
