//! Adapter for swc programs
//!
//! Applies the same entry decision as [`EntryInjector::transform`] to an
//! `swc_core` [`Program`]. swc keeps top-level statement order, so inserting
//! at index 0 is enough to run the support module first. The shebang lives in
//! `Module::shebang`/`Script::shebang` and is unaffected.

use crate::context::RunContext;
use crate::error::{InjectError, InjectResult};
use crate::injector::EntryInjector;
use crate::options::ImportStyle;
use sourcemap_register_common::FileSystem;
use std::path::Path;
use swc_core::common::BytePos;
use swc_core::ecma::ast::{
    Callee, EsVersion, Expr, ExprStmt, Lit, ModuleDecl, ModuleItem, Program, Stmt,
};
use swc_core::ecma::parser::{lexer::Lexer, Parser, StringInput, Syntax};
use tracing::debug;

/// Inject the support module reference into an swc program
///
/// Returns whether `program` was changed.
pub fn transform_program<F: FileSystem>(
    injector: &EntryInjector,
    ctx: &mut RunContext<F>,
    program: &mut Program,
    filename: &Path,
) -> InjectResult<bool> {
    let Some(placement) = injector.prepare(ctx, filename)? else {
        return Ok(false);
    };

    let specifier = placement.specifier.as_str();
    let already_injected = match &*program {
        Program::Module(module) => module
            .body
            .first()
            .is_some_and(|item| references(item, specifier)),
        Program::Script(script) => script
            .body
            .first()
            .is_some_and(|stmt| requires(stmt, specifier)),
    };
    if already_injected {
        debug!(%specifier, "Support module reference already present");
        return Ok(false);
    }

    let style = injector.config().import_style;
    let item = support_item(style, specifier)?;
    match program {
        Program::Module(module) => module.body.insert(0, item),
        Program::Script(script) => match item {
            ModuleItem::Stmt(stmt) => script.body.insert(0, stmt),
            ModuleItem::ModuleDecl(_) => {
                return Err(InjectError::template(
                    style.render(specifier),
                    "import declarations are not allowed in scripts",
                ))
            }
        },
    }
    Ok(true)
}

/// Whether `item` is a side-effect require or import of `specifier`
fn references(item: &ModuleItem, specifier: &str) -> bool {
    match item {
        ModuleItem::Stmt(stmt) => requires(stmt, specifier),
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
            import.specifiers.is_empty() && &*import.src.value == specifier
        }
        ModuleItem::ModuleDecl(_) => false,
    }
}

fn requires(stmt: &Stmt, specifier: &str) -> bool {
    let Stmt::Expr(ExprStmt { expr, .. }) = stmt else {
        return false;
    };
    let Expr::Call(call) = &**expr else {
        return false;
    };
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    let (Expr::Ident(ident), [arg]) = (&**callee, call.args.as_slice()) else {
        return false;
    };
    &*ident.sym == "require"
        && arg.spread.is_none()
        && matches!(&*arg.expr, Expr::Lit(Lit::Str(value)) if &*value.value == specifier)
}

fn support_item(style: ImportStyle, specifier: &str) -> InjectResult<ModuleItem> {
    let code = style.render(specifier);
    let end = BytePos(1 + code.len() as u32);
    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        EsVersion::EsNext,
        StringInput::new(&code, BytePos(1), end),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    let module = parser
        .parse_module()
        .map_err(|err| InjectError::template(code.as_str(), format!("{:?}", err.kind())))?;

    module
        .body
        .into_iter()
        .next()
        .ok_or_else(|| InjectError::template(code.as_str(), "no statement produced"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InjectorOptions;
    use sourcemap_register_common::MockFileSystem;
    use swc_core::common::DUMMY_SP;
    use swc_core::ecma::ast::{Module, Script};

    fn empty_module() -> Program {
        Program::Module(Module {
            span: DUMMY_SP,
            body: vec![],
            shebang: None,
        })
    }

    #[test]
    fn test_module_gets_require_first() {
        let injector = EntryInjector::new(InjectorOptions::default(), "/project");
        let fs = MockFileSystem::new();
        let mut ctx = RunContext::with_filesystem(&fs);
        let mut program = empty_module();

        let changed =
            transform_program(&injector, &mut ctx, &mut program, Path::new("src/index.js"))
                .unwrap();

        assert!(changed);
        let Program::Module(module) = &program else {
            panic!("expected module");
        };
        assert_eq!(module.body.len(), 1);
        assert!(matches!(module.body[0], ModuleItem::Stmt(_)));
        assert!(references(
            &module.body[0],
            "./_build_modules/source-map-support-register.js"
        ));
        assert_eq!(
            fs.write_count(Path::new(
                "/project/build/_build_modules/source-map-support-register.js"
            )),
            1
        );
    }

    #[test]
    fn test_transform_twice_inserts_once() {
        let injector = EntryInjector::new(
            InjectorOptions::default().with_import_style(ImportStyle::Import),
            "/project",
        );
        let fs = MockFileSystem::new();
        let mut ctx = RunContext::with_filesystem(&fs);
        let mut program = empty_module();
        let filename = Path::new("src/index.js");

        let first = transform_program(&injector, &mut ctx, &mut program, filename).unwrap();
        let second = transform_program(&injector, &mut ctx, &mut program, filename).unwrap();

        assert!(first);
        assert!(!second);
        let Program::Module(module) = &program else {
            panic!("expected module");
        };
        assert_eq!(module.body.len(), 1);
        assert!(matches!(
            module.body[0],
            ModuleItem::ModuleDecl(ModuleDecl::Import(_))
        ));
        assert!(references(
            &module.body[0],
            "./_build_modules/source-map-support-register.js"
        ));
    }

    #[test]
    fn test_other_require_is_not_a_duplicate() {
        let item = support_item(ImportStyle::Require, "./polyfill.js").unwrap();

        assert!(references(&item, "./polyfill.js"));
        assert!(!references(&item, "./support.js"));
    }

    #[test]
    fn test_script_rejects_import_style() {
        let injector = EntryInjector::new(
            InjectorOptions::default().with_import_style(ImportStyle::Import),
            "/project",
        );
        let fs = MockFileSystem::new();
        let mut ctx = RunContext::with_filesystem(&fs);
        let mut program = Program::Script(Script {
            span: DUMMY_SP,
            body: vec![],
            shebang: None,
        });

        let result =
            transform_program(&injector, &mut ctx, &mut program, Path::new("src/index.js"));

        assert!(matches!(result, Err(InjectError::Template { .. })));
    }

    #[test]
    fn test_non_entry_untouched() {
        let injector = EntryInjector::new(InjectorOptions::default(), "/project");
        let fs = MockFileSystem::new();
        let mut ctx = RunContext::with_filesystem(&fs);
        let mut program = empty_module();

        let changed =
            transform_program(&injector, &mut ctx, &mut program, Path::new("src/other.js"))
                .unwrap();

        assert!(!changed);
        assert_eq!(fs.total_writes(), 0);
    }
}
