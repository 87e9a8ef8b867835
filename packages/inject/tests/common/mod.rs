//! Minimal host pipeline for integration tests
//!
//! Mirrors what a build tool does around the injector: walk the source tree,
//! parse each file, run the per-file hook, run the hoist pass and write the
//! serialized result into the output tree.

#![allow(dead_code)]

use anyhow::{Context, Result};
use sourcemap_register::{EntryInjector, RunContext};
use sourcemap_register_ast::{hoist, parse, serialize};
use sourcemap_register_common::{join_under, FileSystem};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new(files: &[(&str, &str)]) -> Result<Self> {
        let dir = TempDir::new()?;
        for (relative, contents) in files {
            let path = dir.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
        }
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.root().join(relative);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    /// Compile `<root>/<src>` into `<root>/<dest>`, returning the written files
    ///
    /// File names are handed to the injector relative to the project root,
    /// which is also the injector's working directory.
    pub fn compile<F: FileSystem>(
        &self,
        src: &str,
        dest: &str,
        injector: Option<&EntryInjector>,
        ctx: &mut RunContext<F>,
    ) -> Result<Vec<PathBuf>> {
        let src_root = self.root().join(src);
        let dest_root = self.root().join(dest);
        let mut outputs = Vec::new();

        for path in source_files(&src_root)? {
            let relative = path.strip_prefix(&src_root)?;
            let source = fs::read_to_string(&path)?;
            let mut program =
                parse(&source).with_context(|| format!("parsing {}", path.display()))?;

            if let Some(injector) = injector {
                injector.transform(ctx, &mut program, &Path::new(src).join(relative))?;
            }
            hoist(&mut program);

            let output = dest_root.join(relative);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, serialize(&program))?;
            outputs.push(output);
        }

        Ok(outputs)
    }
}

/// JavaScript files below `root`, sorted by path
pub fn source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "js") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Specifier of the first statement in a compiled file
pub fn leading_specifier(compiled: &str) -> Option<String> {
    let program = parse(compiled).ok()?;
    program.body.first()?.specifier().map(str::to_string)
}

/// Where a relative specifier points when loaded from `file`
pub fn resolve_from(file: &Path, specifier: &str) -> PathBuf {
    join_under(file.parent().unwrap_or(file), specifier)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
