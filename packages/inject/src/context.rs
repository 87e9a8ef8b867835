use crate::error::{InjectError, InjectResult};
use crate::injector::SupportPlacement;
use crate::payload::SUPPORT_PAYLOAD;
use sourcemap_register_common::{FileSystem, RealFileSystem};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// State shared by every file processed in one compilation run
///
/// Owns the output file system and the set of output roots that already
/// received the support module. Create one per run; nothing carries over
/// between runs.
pub struct RunContext<F = RealFileSystem> {
    fs: F,
    payload: Cow<'static, str>,
    materialized: HashSet<PathBuf>,
}

impl RunContext<RealFileSystem> {
    pub fn new() -> Self {
        Self::with_filesystem(RealFileSystem)
    }
}

impl Default for RunContext<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> RunContext<F> {
    pub fn with_filesystem(fs: F) -> Self {
        Self {
            fs,
            payload: Cow::Borrowed(SUPPORT_PAYLOAD),
            materialized: HashSet::new(),
        }
    }

    /// Replace the bundled support module contents
    pub fn with_payload(mut self, payload: impl Into<Cow<'static, str>>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    pub fn into_filesystem(self) -> F {
        self.fs
    }

    pub fn is_materialized(&self, dest_root: &Path) -> bool {
        self.materialized.contains(dest_root)
    }

    pub fn materialized_roots(&self) -> impl Iterator<Item = &Path> {
        self.materialized.iter().map(PathBuf::as_path)
    }

    /// Write the support module for `placement` unless this run already did
    ///
    /// Returns whether the file was written. With `cache` off the module is
    /// written on every call and no root is recorded.
    pub fn materialize(&mut self, placement: &SupportPlacement, cache: bool) -> InjectResult<bool> {
        if cache && self.materialized.contains(&placement.dest_root) {
            debug!(
                dest_root = %placement.dest_root.display(),
                "Support module already copied in this run"
            );
            return Ok(false);
        }

        self.fs
            .write_with_parents(&placement.dest_path, self.payload.as_bytes())
            .map_err(|err| InjectError::io(&placement.dest_path, err))?;

        info!(
            path = %placement.dest_path.display(),
            bytes = self.payload.len(),
            "Copied source-map support module"
        );

        if cache {
            self.materialized.insert(placement.dest_root.clone());
        }
        Ok(true)
    }
}
