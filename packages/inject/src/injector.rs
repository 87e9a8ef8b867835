use crate::config::ResolvedConfig;
use crate::context::RunContext;
use crate::error::{InjectError, InjectResult};
use crate::options::InjectorOptions;
use sourcemap_register_ast::{parse_statement, BlockHoist, Program, Span, Statement};
use sourcemap_register_common::{module_specifier, FileSystem};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Where the support module goes for one entry file, and how that entry
/// refers to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportPlacement {
    /// Absolute path of the entry file
    pub entry: PathBuf,
    /// Output root the payload is recorded under
    pub dest_root: PathBuf,
    /// File the payload is written to
    pub dest_path: PathBuf,
    /// Module specifier placed in the entry file
    pub specifier: String,
}

/// Prepends a support module reference to configured entry files
#[derive(Debug, Clone)]
pub struct EntryInjector {
    options: InjectorOptions,
    config: ResolvedConfig,
}

impl EntryInjector {
    /// Resolve `options` against the working directory of this run
    pub fn new(options: InjectorOptions, cwd: impl AsRef<Path>) -> Self {
        let config = ResolvedConfig::resolve(&options, cwd);
        Self { options, config }
    }

    /// Resolve `options` against the process working directory
    pub fn from_current_dir(options: InjectorOptions) -> InjectResult<Self> {
        let cwd = std::env::current_dir().map_err(InjectError::CurrentDir)?;
        Ok(Self::new(options, cwd))
    }

    pub fn options(&self) -> &InjectorOptions {
        &self.options
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn is_entry(&self, filename: &Path) -> bool {
        self.config.is_entry(&self.config.absolutize(filename))
    }

    /// Compute the support module placement for `filename`
    ///
    /// Returns `None` for files that are not entries. Touches no files.
    pub fn placement(&self, filename: &Path) -> InjectResult<Option<SupportPlacement>> {
        let entry = self.config.absolutize(filename);
        if !self.config.is_entry(&entry) {
            return Ok(None);
        }

        let from_dir = entry.parent().unwrap_or(self.config.src_root.as_path());
        let target = &self.config.support_source_path;
        let specifier =
            module_specifier(from_dir, target).ok_or_else(|| InjectError::Unrelatable {
                from: from_dir.to_path_buf(),
                to: target.clone(),
            })?;

        Ok(Some(SupportPlacement {
            dest_root: self.config.dest_root.clone(),
            dest_path: self.config.support_dest_path.clone(),
            entry,
            specifier,
        }))
    }

    /// Compute the placement and make sure the payload is on disk
    pub fn prepare<F: FileSystem>(
        &self,
        ctx: &mut RunContext<F>,
        filename: &Path,
    ) -> InjectResult<Option<SupportPlacement>> {
        let Some(placement) = self.placement(filename)? else {
            return Ok(None);
        };
        ctx.materialize(&placement, self.config.cache)?;
        Ok(Some(placement))
    }

    /// Build the hoisted statement that loads `specifier`
    pub fn support_statement(&self, specifier: &str) -> InjectResult<Statement> {
        let code = self.config.import_style.render(specifier);
        let statement =
            parse_statement(&code).map_err(|err| InjectError::template(code.as_str(), err))?;
        if statement.specifier() != Some(specifier) {
            return Err(InjectError::template(
                code,
                "template did not produce a module reference",
            ));
        }

        Ok(Statement {
            span: Span::DUMMY,
            raw: None,
            ..statement.with_block_hoist(BlockHoist::Hoisted)
        })
    }

    /// Per-file hook: inject the support module reference into entry files
    ///
    /// Returns whether `program` was changed.
    pub fn transform<F: FileSystem>(
        &self,
        ctx: &mut RunContext<F>,
        program: &mut Program,
        filename: &Path,
    ) -> InjectResult<bool> {
        let Some(placement) = self.prepare(ctx, filename)? else {
            return Ok(false);
        };
        self.inject(program, &placement)
    }

    #[instrument(skip_all, fields(entry = %placement.entry.display()))]
    fn inject(&self, program: &mut Program, placement: &SupportPlacement) -> InjectResult<bool> {
        let already_injected = program.body.first().is_some_and(|first| {
            first.is_hoisted() && first.specifier() == Some(placement.specifier.as_str())
        });
        if already_injected {
            debug!(specifier = %placement.specifier, "Support module reference already present");
            return Ok(false);
        }

        let statement = self.support_statement(&placement.specifier)?;
        program.prepend(statement);
        debug!(specifier = %placement.specifier, "Injected support module reference");
        Ok(true)
    }
}
