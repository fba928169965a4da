//! Link stage.
//!
//! Collects every object staged under `<build>/.luo` and links them with
//! the C compiler into `<build>/<executable>`, where the executable is named
//! after the project directory.

use std::path::{Path, PathBuf};

use crate::builder::compile::object_root;
use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::invoker::{CompileResult, Invoker};
use crate::core::listing::FilesByExtension;
use crate::util::config::BuildConfig;
use crate::util::fs::files_by_extension;

/// Executable name used when the project directory has no final segment.
pub const FALLBACK_EXECUTABLE: &str = "a.out";

/// Name of the final executable: the last segment of the project directory.
pub fn executable_name(root: &Path) -> String {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_EXECUTABLE.to_string())
}

/// A fully resolved link command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPlan {
    /// Link driver (the C compiler)
    pub program: String,
    /// Output path as passed to the linker (`<build>/<executable>`)
    pub output: String,
    /// `-l` flags, then objects, then `-o <output>`
    pub args: Vec<String>,
}

impl LinkPlan {
    /// Build the link command from the objects found under the object root.
    pub fn new(
        config: &BuildConfig,
        objects: &FilesByExtension,
        executable: &str,
    ) -> BuildResult<Self> {
        let object_root = object_root(config);
        let found = objects.get("o");
        if found.is_empty() {
            return Err(BuildError::NoObjects {
                dir: PathBuf::from(&object_root),
            });
        }

        let output = format!("{}/{}", config.path.build, executable);

        let mut args: Vec<String> = config
            .libraries
            .iter()
            .map(|lib| format!("-l{}", lib))
            .collect();
        args.extend(found.iter().map(|obj| format!("{}/{}", object_root, obj)));
        args.push("-o".to_string());
        args.push(output.clone());

        Ok(LinkPlan {
            program: config.compiler.c.clone(),
            output,
            args,
        })
    }

    /// Run the link command.
    pub fn execute(&self, invoker: &dyn Invoker) -> BuildResult<()> {
        tracing::info!("Linking {}", self.output);

        match invoker.exec(&self.program, &self.args)? {
            CompileResult::Success { .. } => Ok(()),
            CompileResult::Failure { stderr, code } => Err(BuildError::LinkFailed {
                output: PathBuf::from(&self.output),
                stderr,
                code,
            }),
        }
    }
}

/// Link every staged object under `root` into the project executable.
///
/// Returns the path of the executable.
pub fn link(root: &Path, config: &BuildConfig, invoker: &dyn Invoker) -> BuildResult<PathBuf> {
    let objects = files_by_extension(&root.join(object_root(config)))?;
    let plan = LinkPlan::new(config, &objects, &executable_name(root))?;
    plan.execute(invoker)?;
    Ok(root.join(&plan.output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockInvoker;
    use tempfile::TempDir;

    #[test]
    fn test_link_arguments_order() {
        let mut config = BuildConfig::default();
        config.add_libraries(["m", "stdc++"]);
        let objects = FilesByExtension::from_files(["main.c.o", "net/socket.c.o", "net/socket.d"]);

        let plan = LinkPlan::new(&config, &objects, "app").unwrap();

        assert_eq!(plan.program, "gcc");
        assert_eq!(plan.output, "build/app");
        assert_eq!(
            plan.args,
            [
                "-lm",
                "-lstdc++",
                "build/.luo/main.c.o",
                "build/.luo/net/socket.c.o",
                "-o",
                "build/app"
            ]
        );
    }

    #[test]
    fn test_link_without_objects() {
        let config = BuildConfig::default();
        let objects = FilesByExtension::from_files(["stray.txt"]);

        let err = LinkPlan::new(&config, &objects, "app").unwrap_err();
        assert!(matches!(err, BuildError::NoObjects { .. }));
    }

    #[test]
    fn test_executable_name_from_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("hello-world");
        std::fs::create_dir(&root).unwrap();

        assert_eq!(executable_name(&root), "hello-world");
        assert_eq!(executable_name(Path::new("/")), FALLBACK_EXECUTABLE);
    }

    #[test]
    fn test_link_invokes_c_compiler() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("demo");
        std::fs::create_dir_all(root.join("build/.luo/lib")).unwrap();
        std::fs::write(root.join("build/.luo/main.c.o"), "obj").unwrap();
        std::fs::write(root.join("build/.luo/lib/util.cpp.o"), "obj").unwrap();

        let mut config = BuildConfig::default();
        config.add_library("stdc++");
        let invoker = MockInvoker::new(&root);

        let exe = link(&root, &config, &invoker).unwrap();

        assert_eq!(exe, root.join("build/demo"));
        assert!(exe.is_file());
        let calls = invoker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "gcc");
        assert_eq!(
            calls[0].args,
            [
                "-lstdc++",
                "build/.luo/main.c.o",
                "build/.luo/lib/util.cpp.o",
                "-o",
                "build/demo"
            ]
        );
    }

    #[test]
    fn test_link_failure() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("build/.luo")).unwrap();
        std::fs::write(tmp.path().join("build/.luo/main.c.o"), "obj").unwrap();

        let config = BuildConfig::default();
        let invoker = MockInvoker::new(tmp.path()).fail_on(
            "-o",
            "undefined reference to `main'\ncollect2: error: ld returned 1 exit status\n",
            1,
        );

        let err = link(tmp.path(), &config, &invoker).unwrap_err();
        assert!(matches!(err, BuildError::LinkFailed { code: Some(1), .. }));
        assert!(err.compiler_output().unwrap().contains("ld returned 1"));
    }

    #[test]
    fn test_link_missing_object_root() {
        let tmp = TempDir::new().unwrap();
        let config = BuildConfig::default();
        let invoker = MockInvoker::new(tmp.path());

        let err = link(tmp.path(), &config, &invoker).unwrap_err();
        assert!(matches!(err, BuildError::PathNotFound { .. }));
        assert!(invoker.calls().is_empty());
    }
}
