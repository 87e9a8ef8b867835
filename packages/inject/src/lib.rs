//! Injects source-map-support registration into build entry files
//!
//! During a compilation run the host pipeline calls
//! [`EntryInjector::transform`] once per file. Files that match a configured
//! entry get a leading, hoisted `require` of the support module, and the
//! support module itself is copied into the build output the first time an
//! entry needs it.
//!
//! # Runtime requirement
//!
//! The bundled [`SUPPORT_PAYLOAD`] is a small loader, not a bundle: it
//! installs the `source-map-support` npm package when the built program runs.
//! That package must be resolvable from the output tree (usually a runtime
//! dependency in the consumer's `package.json`). When it cannot be found the
//! loader does nothing and stack traces keep pointing at the built files.
//! Pass a self-contained bundle to [`RunContext::with_payload`] to drop the
//! dependency.
//!
//! ```no_run
//! use sourcemap_register::{EntryInjector, InjectorOptions, RunContext};
//! use sourcemap_register_ast::{parse, serialize};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let injector = EntryInjector::from_current_dir(InjectorOptions::default())?;
//! let mut ctx = RunContext::new();
//!
//! let mut program = parse("main();")?;
//! injector.transform(&mut ctx, &mut program, Path::new("src/index.js"))?;
//! assert!(serialize(&program).starts_with("require('./_build_modules/"));
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod error;
mod injector;
mod options;
mod payload;

#[cfg(feature = "swc")]
pub mod swc;

pub use config::ResolvedConfig;
pub use context::RunContext;
pub use error::{InjectError, InjectResult};
pub use injector::{EntryInjector, SupportPlacement};
pub use options::{
    ImportStyle, InjectorOptions, DEFAULT_DEST, DEFAULT_ENTRY, DEFAULT_SRC,
    DEFAULT_SUPPORT_MODULE_PATH,
};
pub use payload::SUPPORT_PAYLOAD;
