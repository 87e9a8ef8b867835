use crate::error::InjectResult;
use serde::{Deserialize, Serialize};
use sourcemap_register_ast::quote;
use std::path::PathBuf;

pub const DEFAULT_SRC: &str = "./src";
pub const DEFAULT_DEST: &str = "./build";
pub const DEFAULT_ENTRY: &str = "index.js";
pub const DEFAULT_SUPPORT_MODULE_PATH: &str = "_build_modules/source-map-support-register.js";

/// Options accepted from the host pipeline's plugin configuration
///
/// Every key is optional. Keys that are present replace the default
/// wholesale; `entries` in particular is never merged with the default list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InjectorOptions {
    /// Source root that entries are relative to
    pub src: PathBuf,
    /// Build output root that receives the support module
    pub dest: PathBuf,
    /// Entry files, relative to `src`
    pub entries: Vec<PathBuf>,
    /// Location of the support module below both roots
    pub support_module_path: PathBuf,
    /// Copy the support module once per output root instead of once per entry
    pub cache: bool,
    /// Statement form used to load the support module
    pub import_style: ImportStyle,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            src: PathBuf::from(DEFAULT_SRC),
            dest: PathBuf::from(DEFAULT_DEST),
            entries: vec![PathBuf::from(DEFAULT_ENTRY)],
            support_module_path: PathBuf::from(DEFAULT_SUPPORT_MODULE_PATH),
            cache: true,
            import_style: ImportStyle::default(),
        }
    }
}

impl InjectorOptions {
    /// Decode options from a JSON object, filling unset keys with defaults
    pub fn from_json_str(json: &str) -> InjectResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options.normalized())
    }

    pub fn from_value(value: serde_json::Value) -> InjectResult<Self> {
        let options: Self = serde_json::from_value(value)?;
        Ok(options.normalized())
    }

    /// An empty support module path falls back to the default location
    pub fn normalized(mut self) -> Self {
        if self.support_module_path.as_os_str().is_empty() {
            self.support_module_path = PathBuf::from(DEFAULT_SUPPORT_MODULE_PATH);
        }
        self
    }

    pub fn with_src(mut self, src: impl Into<PathBuf>) -> Self {
        self.src = src.into();
        self
    }

    pub fn with_dest(mut self, dest: impl Into<PathBuf>) -> Self {
        self.dest = dest.into();
        self
    }

    pub fn with_entries<I, P>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.entries = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_support_module_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.support_module_path = path.into();
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_import_style(mut self, import_style: ImportStyle) -> Self {
        self.import_style = import_style;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStyle {
    /// `require('<specifier>');`
    #[default]
    Require,
    /// `import '<specifier>';`
    Import,
}

impl ImportStyle {
    /// Source text of the statement that loads `specifier`
    pub fn render(&self, specifier: &str) -> String {
        match self {
            ImportStyle::Require => format!("require({})", quote(specifier)),
            ImportStyle::Import => format!("import {}", quote(specifier)),
        }
    }
}
