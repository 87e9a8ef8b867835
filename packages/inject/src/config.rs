use crate::options::{ImportStyle, InjectorOptions};
use sourcemap_register_common::{absolutize, join_under};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Options resolved to absolute paths for one compilation run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub cwd: PathBuf,
    pub src_root: PathBuf,
    pub dest_root: PathBuf,
    /// Absolute entry paths in configured order
    pub entries: Vec<PathBuf>,
    /// Where the payload is written
    pub support_dest_path: PathBuf,
    /// Mirror of `support_dest_path` below the source root, only used to
    /// compute specifiers
    pub support_source_path: PathBuf,
    pub cache: bool,
    pub import_style: ImportStyle,
    entry_set: HashSet<PathBuf>,
}

impl ResolvedConfig {
    pub fn resolve(options: &InjectorOptions, cwd: impl AsRef<Path>) -> Self {
        let cwd = cwd.as_ref();
        let src_root = absolutize(&options.src, cwd);
        let dest_root = absolutize(&options.dest, cwd);
        let entries: Vec<PathBuf> = options
            .entries
            .iter()
            .map(|entry| join_under(&src_root, entry))
            .collect();

        Self {
            cwd: cwd.to_path_buf(),
            support_dest_path: join_under(&dest_root, &options.support_module_path),
            support_source_path: join_under(&src_root, &options.support_module_path),
            entry_set: entries.iter().cloned().collect(),
            entries,
            src_root,
            dest_root,
            cache: options.cache,
            import_style: options.import_style,
        }
    }

    /// Absolute, cleaned form of a file path handed over by the host
    pub fn absolutize(&self, path: &Path) -> PathBuf {
        absolutize(path, &self.cwd)
    }

    /// Whether an absolute, cleaned path is one of the configured entries
    pub fn is_entry(&self, absolute: &Path) -> bool {
        self.entry_set.contains(absolute)
    }
}
