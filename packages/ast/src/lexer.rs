//! Lexer for top-level JavaScript statements using logos
//!
//! Only the structure needed to split a module into top-level statements is
//! recognised: string, template and regular expression literals, comments,
//! brackets, statement terminators and the `require`/`import` keywords.
//! Everything else is lexed as identifiers, numbers or opaque punctuation.

use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token<'src> {
    #[token("require")]
    Require,
    #[token("import")]
    Import,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice())]
    Ident(&'src str),

    #[regex(r"[0-9][0-9A-Za-z_.]*", |lex| lex.slice())]
    Number(&'src str),

    /// Single- or double-quoted string, quotes included
    #[regex(r#"'([^'\\\n]|\\.)*'"#, |lex| lex.slice())]
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice())]
    Str(&'src str),

    #[regex(r"`([^`\\]|\\(.|\n))*`", |lex| lex.slice())]
    Template(&'src str),

    #[regex(r"//[^\n]*", |lex| lex.slice())]
    LineComment(&'src str),

    #[token("/*", block_comment)]
    BlockComment(&'src str),

    /// Regular expression literal, flags included
    ///
    /// Never produced by the generated lexer: [`lex`] turns a [`Token::Slash`]
    /// into a regex when the previous token cannot end an expression.
    Regex(&'src str),

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token("\n")]
    Newline,
    #[token("/")]
    Slash,

    #[regex(r#"[^ \t\r\f\nA-Za-z0-9_$'"`(){}\[\];/]+"#, |lex| lex.slice())]
    Punct(&'src str),
}

fn block_comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> Option<&'src str> {
    let end = lex.remainder().find("*/")?;
    lex.bump(end + 2);
    Some(lex.slice())
}

/// Keywords after which a `/` starts a regular expression
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "await", "case", "delete", "do", "else", "in", "instanceof", "new", "of", "return",
    "throw", "typeof", "void", "yield",
];

impl<'src> Token<'src> {
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::LineComment(_) | Token::BlockComment(_))
    }

    pub fn is_trivia(&self) -> bool {
        self.is_comment() || *self == Token::Newline
    }

    /// Whether a `/` following this token starts a regular expression
    fn allows_regex(&self) -> bool {
        match self {
            Token::Ident(word) => REGEX_PREFIX_KEYWORDS.contains(word),
            Token::Require
            | Token::Import
            | Token::Number(_)
            | Token::Str(_)
            | Token::Template(_)
            | Token::Regex(_)
            | Token::RParen
            | Token::RBracket => false,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

/// A token with its span
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub span: TokenSpan,
}

#[derive(Debug, Clone)]
pub struct LexError {
    pub span: TokenSpan,
}

/// Lex source code into tokens with spans
pub fn lex(source: &str) -> Tokens<'_> {
    Tokens {
        lexer: Token::lexer(source),
        regex_allowed: true,
    }
}

/// Token stream returned by [`lex`]
pub struct Tokens<'src> {
    lexer: Lexer<'src, Token<'src>>,
    regex_allowed: bool,
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Result<SpannedToken<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match self.lexer.next()? {
            Ok(Token::Slash) if self.regex_allowed => {
                match regex_body_len(self.lexer.remainder()) {
                    Some(len) => {
                        self.lexer.bump(len);
                        Ok(Token::Regex(self.lexer.slice()))
                    }
                    None => Err(()),
                }
            }
            other => other,
        };

        let range = self.lexer.span();
        let span = TokenSpan {
            start: range.start,
            end: range.end,
        };
        Some(match result {
            Ok(token) => {
                if !token.is_trivia() {
                    self.regex_allowed = token.allows_regex();
                }
                Ok(SpannedToken { token, span })
            }
            Err(()) => Err(LexError { span }),
        })
    }
}

/// Length of a regex literal after its opening `/`, closing `/` and flags
/// included. `None` if the literal is not closed on the same line.
fn regex_body_len(rest: &str) -> Option<usize> {
    let mut in_class = false;
    let mut chars = rest.char_indices();
    let close = loop {
        let (index, c) = chars.next()?;
        match c {
            '\\' => {
                if chars.next()?.1 == '\n' {
                    return None;
                }
            }
            '\n' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => break index + 1,
            _ => {}
        }
    };
    let flags = rest[close..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(rest.len() - close);
    Some(close + flags)
}

/// Decode the contents of a quoted string token
///
/// Only the escapes that can appear in a module specifier are interpreted;
/// any other escaped character is kept as-is.
pub fn unquote(literal: &str) -> String {
    let inner = literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        lex(source).filter_map(|r| r.ok()).map(|t| t.token).collect()
    }

    #[test]
    fn test_lex_require_call() {
        assert_eq!(
            tokens("require('./a.js');"),
            vec![
                Token::Require,
                Token::LParen,
                Token::Str("'./a.js'"),
                Token::RParen,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(tokens("requireAll"), vec![Token::Ident("requireAll")]);
        assert_eq!(tokens("imports"), vec![Token::Ident("imports")]);
    }

    #[test]
    fn test_comments_and_slash() {
        assert_eq!(
            tokens("a / b // tail\n/* block */"),
            vec![
                Token::Ident("a"),
                Token::Slash,
                Token::Ident("b"),
                Token::LineComment("// tail"),
                Token::Newline,
                Token::BlockComment("/* block */"),
            ]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(
            tokens("/**\n * Doc\n */ f"),
            vec![Token::BlockComment("/**\n * Doc\n */"), Token::Ident("f")]
        );
        assert_eq!(tokens("/* a ** b */"), vec![Token::BlockComment("/* a ** b */")]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert!(lex("/* open").any(|r| r.is_err()));
    }

    #[test]
    fn test_regex_after_operator() {
        assert_eq!(
            tokens("x = /[(/]'\\//gi;"),
            vec![
                Token::Ident("x"),
                Token::Punct("="),
                Token::Regex("/[(/]'\\//gi"),
                Token::Semicolon,
            ]
        );
        assert_eq!(
            tokens("return /a/"),
            vec![Token::Ident("return"), Token::Regex("/a/")]
        );
    }

    #[test]
    fn test_division_after_operand() {
        assert_eq!(
            tokens("f(a) / 2 / b"),
            vec![
                Token::Ident("f"),
                Token::LParen,
                Token::Ident("a"),
                Token::RParen,
                Token::Slash,
                Token::Number("2"),
                Token::Slash,
                Token::Ident("b"),
            ]
        );
    }

    #[test]
    fn test_unterminated_regex() {
        assert!(lex("x = /abc\n").any(|r| r.is_err()));
    }

    #[test]
    fn test_string_cannot_span_lines() {
        assert!(lex("'abc\ndef'").any(|r| r.is_err()));
    }

    #[test]
    fn test_template_spans_lines() {
        assert_eq!(tokens("`a\nb`"), vec![Token::Template("`a\nb`")]);
    }

    #[test]
    fn test_unquote_escapes() {
        assert_eq!(unquote(r"'it\'s'"), "it's");
        assert_eq!(unquote(r#""a\\b""#), r"a\b");
        assert_eq!(unquote("''"), "");
    }
}
