//! Compile stage.
//!
//! Every translation unit under the source root becomes one object under
//! `<build>/.luo/<relative source path>.o`. The object tree mirrors the
//! source tree, so the directory skeleton is staged before anything runs.
//!
//! The stage works from an immutable [`BuildConfig`]. Any change the build
//! needs to make to it (linking the C++ runtime) is computed by
//! [`CompilePlan::augment_libraries`] before the fan-out starts.

use std::path::Path;

use rayon::prelude::*;

use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::invoker::{CompileResult, Invoker};
use crate::core::language::Language;
use crate::core::listing::{DirectoryListing, FilesByExtension};
use crate::util::config::BuildConfig;
use crate::util::fs::{mkdirs, read_dir_recursive};

/// Hidden directory under the build root that holds object files.
pub const OBJECT_DIR: &str = ".luo";

/// `<build>/.luo`, relative to the project root.
pub fn object_root(config: &BuildConfig) -> String {
    format!("{}/{}", config.path.build, OBJECT_DIR)
}

/// Directories to stage, in creation order: the build root, the object
/// root, then one directory per source subdirectory.
pub fn staging_dirs(config: &BuildConfig, sources: &DirectoryListing) -> Vec<String> {
    let object_root = object_root(config);
    let mut dirs = vec![config.path.build.clone(), object_root.clone()];
    dirs.extend(
        sources
            .directories
            .iter()
            .map(|dir| format!("{}/{}", object_root, dir)),
    );
    dirs
}

/// A single translation unit to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileJob {
    pub language: Language,
    /// Compiler executable
    pub program: String,
    /// Source path as passed to the compiler (`<src>/<rel>`)
    pub source: String,
    /// Object path as passed to the compiler (`<build>/.luo/<rel>.o`)
    pub object: String,
    pub args: Vec<String>,
}

impl CompileJob {
    fn new(config: &BuildConfig, language: Language, rel: &str) -> Self {
        let source = format!("{}/{}", config.path.source, rel);
        let object = format!("{}/{}.o", object_root(config), rel);

        let mut args = vec![
            "-c".to_string(),
            source.clone(),
            "-o".to_string(),
            object.clone(),
        ];
        args.extend(config.path.includes.iter().map(|inc| format!("-I{}", inc)));

        CompileJob {
            language,
            program: language.compiler(config).to_string(),
            source,
            object,
            args,
        }
    }

    fn run(&self, invoker: &dyn Invoker) -> BuildResult<()> {
        tracing::debug!(
            "Compiling {} -> {} ({})",
            self.source,
            self.object,
            self.language
        );

        match invoker.exec(&self.program, &self.args)? {
            CompileResult::Success { stdout } => {
                if !stdout.trim().is_empty() {
                    tracing::debug!("{}: {}", self.source, stdout.trim_end());
                }
                Ok(())
            }
            CompileResult::Failure { stderr, code } => Err(BuildError::CompileFailed {
                source_file: self.source.clone(),
                stderr,
                code,
            }),
        }
    }
}

/// All compile jobs for one build, C units first, then C++.
#[derive(Debug, Clone, Default)]
pub struct CompilePlan {
    pub jobs: Vec<CompileJob>,
}

impl CompilePlan {
    /// Route every classified source file to its language's compiler.
    pub fn new(config: &BuildConfig, files: &FilesByExtension) -> Self {
        let jobs = Language::ALL
            .iter()
            .flat_map(|&lang| {
                files
                    .get(lang.extension(config))
                    .iter()
                    .map(move |rel| CompileJob::new(config, lang, rel))
            })
            .collect();

        CompilePlan { jobs }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Object paths, in job order.
    pub fn objects(&self) -> Vec<String> {
        self.jobs.iter().map(|job| job.object.clone()).collect()
    }

    /// Add runtime libraries the planned units need and the configuration
    /// doesn't link yet. Each library is added at most once.
    pub fn augment_libraries(&self, config: &mut BuildConfig) {
        for job in &self.jobs {
            if let Some(lib) = job.language.runtime_library() {
                if !config.has_library(lib) {
                    tracing::debug!("linking {} runtime `{}`", job.language, lib);
                    config.add_library(lib);
                }
            }
        }
    }

    /// Run the jobs on the rayon pool.
    ///
    /// At most one compiler per pool thread runs at a time. The first
    /// failure wins: jobs not yet started are never run, jobs already
    /// running finish and their results are dropped, and objects that were
    /// produced are left in place.
    pub fn execute(&self, invoker: &dyn Invoker) -> BuildResult<()> {
        if self.jobs.is_empty() {
            return Ok(());
        }

        tracing::info!("Compiling {} files", self.jobs.len());

        self.jobs
            .par_iter()
            .map(|job| job.run(invoker))
            .collect::<BuildResult<Vec<()>>>()?;

        Ok(())
    }
}

/// Scan, stage, and compile every source under `root`.
///
/// Takes the configuration mutably only to add the C++ runtime library;
/// that happens once, before any compiler is started. Returns the object
/// paths that were produced, relative to `root`.
pub fn compile(
    root: &Path,
    config: &mut BuildConfig,
    invoker: &dyn Invoker,
) -> BuildResult<Vec<String>> {
    let sources = read_dir_recursive(&root.join(&config.path.source))?;

    mkdirs(staging_dirs(config, &sources).iter().map(|dir| root.join(dir)))?;

    let files = FilesByExtension::from_listing(&sources);
    let plan = CompilePlan::new(config, &files);
    plan.augment_libraries(config);

    let config: &BuildConfig = config;
    tracing::debug!(
        "compile plan: {} jobs from {} classified files, libraries [{}]",
        plan.jobs.len(),
        files.file_count(),
        config.libraries.join(", ")
    );

    plan.execute(invoker)?;
    Ok(plan.objects())
}
