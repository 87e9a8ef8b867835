use crate::ast::*;

/// Serializer converts a [`Program`] back to source code
///
/// The shebang and directives come first, followed by one statement per line.
/// Parsed statements are written back exactly as they were parsed; synthesized
/// require and import statements are generated from their specifier.
pub struct Serializer {
    newline: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            newline: "\n".to_string(),
        }
    }

    pub fn with_newline(newline: &str) -> Self {
        Self {
            newline: newline.to_string(),
        }
    }

    pub fn serialize(&self, program: &Program) -> String {
        let mut output = String::new();

        if let Some(interpreter) = &program.shebang {
            output.push_str("#!");
            output.push_str(interpreter);
            output.push_str(&self.newline);
        }

        for directive in &program.directives {
            for comment in &directive.leading_comments {
                output.push_str(comment);
                output.push_str(&self.newline);
            }
            match &directive.raw {
                Some(raw) => output.push_str(raw),
                None => {
                    output.push_str(&directive.value);
                    output.push(';');
                }
            }
            output.push_str(&self.newline);
        }

        for statement in &program.body {
            self.serialize_statement(statement, &mut output);
            output.push_str(&self.newline);
        }

        output
    }

    pub fn serialize_statement(&self, statement: &Statement, output: &mut String) {
        if let Some(raw) = &statement.raw {
            output.push_str(raw);
            return;
        }
        match &statement.kind {
            StatementKind::Require { specifier } => {
                output.push_str("require(");
                output.push_str(&quote(specifier));
                output.push_str(");");
            }
            StatementKind::Import { specifier } => {
                output.push_str("import ");
                output.push_str(&quote(specifier));
                output.push(';');
            }
            StatementKind::Other(text) => output.push_str(text),
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a program with default settings
pub fn serialize(program: &Program) -> String {
    Serializer::new().serialize(program)
}

/// Single-quote a module specifier, escaping backslashes and quotes
///
/// Line breaks are left as-is; a specifier containing one does not lex back
/// into a string literal.
pub fn quote(specifier: &str) -> String {
    let mut out = String::with_capacity(specifier.len() + 2);
    out.push('\'');
    for c in specifier.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
