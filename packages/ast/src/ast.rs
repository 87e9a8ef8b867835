use serde::{Deserialize, Serialize};

/// Byte range of a node in its source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Span used for synthesized nodes that have no source location
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_dummy(&self) -> bool {
        *self == Self::DUMMY
    }
}

/// Root node of a parsed module
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Interpreter line without its leading `#!`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shebang: Option<String>,
    /// Leading string-literal statements such as `'use strict'`
    pub directives: Vec<Directive>,
    /// Top-level statements in source order
    pub body: Vec<Statement>,
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self {
        Self {
            shebang: None,
            directives: Vec::new(),
            body,
        }
    }

    /// Insert a statement ahead of every existing statement
    pub fn prepend(&mut self, statement: Statement) {
        self.body.insert(0, statement);
    }

    /// Module specifiers referenced by top-level require/import statements
    pub fn specifiers(&self) -> impl Iterator<Item = &str> {
        self.body.iter().filter_map(Statement::specifier)
    }
}

/// Directive prologue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    /// Directive text including its quotes
    pub value: String,
    pub span: Span,
    /// Source text as parsed, terminator and trailing comments included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Comment lines between the previous directive (or the start of the
    /// file) and this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading_comments: Vec<String>,
}

/// Top-level statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
    pub block_hoist: BlockHoist,
    /// Source text of a parsed require/import, trailing comments included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self {
            kind,
            span,
            block_hoist: BlockHoist::Default,
            raw: None,
        }
    }

    /// `require('<specifier>');` with no source location
    pub fn require(specifier: impl Into<String>) -> Self {
        Self::new(
            StatementKind::Require {
                specifier: specifier.into(),
            },
            Span::DUMMY,
        )
    }

    /// `import '<specifier>';` with no source location
    pub fn import(specifier: impl Into<String>) -> Self {
        Self::new(
            StatementKind::Import {
                specifier: specifier.into(),
            },
            Span::DUMMY,
        )
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    pub fn with_block_hoist(mut self, block_hoist: BlockHoist) -> Self {
        self.block_hoist = block_hoist;
        self
    }

    pub fn is_hoisted(&self) -> bool {
        self.block_hoist == BlockHoist::Hoisted
    }

    /// Module specifier for side-effect require/import statements
    pub fn specifier(&self) -> Option<&str> {
        match &self.kind {
            StatementKind::Require { specifier } | StatementKind::Import { specifier } => {
                Some(specifier.as_str())
            }
            StatementKind::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Bare `require('x')` expression statement
    Require { specifier: String },
    /// Side-effect `import 'x'` declaration
    Import { specifier: String },
    /// Any other statement, kept as source text
    Other(String),
}

/// Ordering hint consumed by [`crate::hoist`]
///
/// Statements with a higher priority are moved ahead of those with a lower
/// one. `Hoisted` outranks every numeric priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockHoist {
    #[default]
    Default,
    Priority(u32),
    Hoisted,
}

impl BlockHoist {
    pub fn priority(&self) -> u32 {
        match self {
            BlockHoist::Default => 1,
            BlockHoist::Priority(priority) => *priority,
            BlockHoist::Hoisted => u32::MAX,
        }
    }
}
