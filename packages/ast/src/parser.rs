//! Top-level statement parser
//!
//! Splits a module into top-level statements at `;` or at line breaks outside
//! of any brackets, then recognises side-effect `require('x')` and
//! `import 'x'` statements. Everything else is kept verbatim as
//! [`StatementKind::Other`]. A leading `#!` line becomes
//! [`Program::shebang`], and comments inside the directive prologue stay
//! attached to the directive that follows them.

use crate::ast::{Directive, Program, Span, Statement, StatementKind};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{lex, unquote, SpannedToken, Token};
use std::ops::Range;

/// Parse a module into a [`Program`]
pub fn parse(source: &str) -> ParseResult<Program> {
    parse_with(source, true)
}

/// Parse source that must contain exactly one top-level statement
pub fn parse_statement(source: &str) -> ParseResult<Statement> {
    let program = parse_with(source, false)?;
    let found = program.body.len();
    match <[Statement; 1]>::try_from(program.body) {
        Ok([statement]) => Ok(statement),
        Err(_) => Err(ParseError::StatementCount { found }),
    }
}

fn parse_with(source: &str, allow_directives: bool) -> ParseResult<Program> {
    let mut program = Program::default();
    let mut offset = 0;
    if allow_directives {
        if let Some((interpreter, end)) = shebang(source) {
            program.shebang = Some(interpreter.to_string());
            offset = end;
        }
    }

    let tokens = lex(&source[offset..])
        .map(|result| match result {
            Ok(mut spanned) => {
                spanned.span.start += offset;
                spanned.span.end += offset;
                Ok(spanned)
            }
            Err(err) => Err(ParseError::unexpected_char(offset + err.span.start)),
        })
        .collect::<ParseResult<Vec<_>>>()?;

    let mut in_prologue = allow_directives;
    let mut prologue_comments: Vec<(Span, &str)> = Vec::new();

    for group in split_statements(&tokens)? {
        let span = Span::new(group[0].span.start, group[group.len() - 1].span.end);
        let text = &source[span.start..span.end];
        let significant: Vec<&Token> = group
            .iter()
            .map(|t| &t.token)
            .filter(|t| !t.is_comment())
            .collect();

        if in_prologue {
            if significant.is_empty() {
                prologue_comments.push((span, text));
                continue;
            }
            if let [Token::Str(value)] | [Token::Str(value), Token::Semicolon] = significant[..] {
                program.directives.push(Directive {
                    value: (*value).to_string(),
                    raw: Some(text.to_string()),
                    span,
                    leading_comments: prologue_comments
                        .drain(..)
                        .map(|(_, comment)| comment.to_string())
                        .collect(),
                });
                continue;
            }
            in_prologue = false;
            program.body.extend(prologue_comments.drain(..).map(comment_statement));
        }

        program.body.push(statement(&significant, text, span));
    }
    program.body.extend(prologue_comments.into_iter().map(comment_statement));

    Ok(program)
}

/// Interpreter text and the byte offset just past it
fn shebang(source: &str) -> Option<(&str, usize)> {
    let rest = source.strip_prefix("#!")?;
    let end = rest.find('\n').unwrap_or(rest.len());
    Some((rest[..end].trim_end_matches('\r'), 2 + end))
}

fn comment_statement((span, text): (Span, &str)) -> Statement {
    Statement::new(StatementKind::Other(text.to_string()), span)
}

fn statement(tokens: &[&Token], text: &str, span: Span) -> Statement {
    match classify(tokens, text) {
        kind @ StatementKind::Other(_) => Statement::new(kind, span),
        kind => Statement::new(kind, span).with_raw(text),
    }
}

fn classify(tokens: &[&Token], text: &str) -> StatementKind {
    let tokens = match tokens {
        [rest @ .., Token::Semicolon] => rest,
        all => all,
    };
    match tokens {
        [Token::Require, Token::LParen, Token::Str(literal), Token::RParen] => {
            StatementKind::Require {
                specifier: unquote(literal),
            }
        }
        [Token::Import, Token::Str(literal)] => StatementKind::Import {
            specifier: unquote(literal),
        },
        _ => StatementKind::Other(text.to_string()),
    }
}

fn split_statements<'a, 'src>(
    tokens: &'a [SpannedToken<'src>],
) -> ParseResult<Vec<&'a [SpannedToken<'src>]>> {
    let mut groups: Vec<Range<usize>> = Vec::new();
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut start: Option<usize> = None;

    for (index, spanned) in tokens.iter().enumerate() {
        let pos = spanned.span.start;
        match &spanned.token {
            Token::LParen => open.push(('(', pos)),
            Token::LBrace => open.push(('{', pos)),
            Token::LBracket => open.push(('[', pos)),
            Token::RParen => close(&mut open, '(', ')', pos)?,
            Token::RBrace => close(&mut open, '{', '}', pos)?,
            Token::RBracket => close(&mut open, '[', ']', pos)?,
            _ => {}
        }

        if !open.is_empty() {
            start.get_or_insert(index);
            continue;
        }

        match &spanned.token {
            Token::Newline => {
                if let Some(begin) = start {
                    if !continues_on_next_line(&tokens[begin..index]) {
                        groups.push(begin..index);
                        start = None;
                    }
                }
            }
            Token::Semicolon => {
                let begin = start.take().unwrap_or(index);
                groups.push(begin..index + 1);
            }
            // A comment right after `;` on the same line belongs to that statement
            token if token.is_comment() && start.is_none() => match groups.last_mut() {
                Some(last) if last.end == index => last.end = index + 1,
                _ => start = Some(index),
            },
            _ => {
                start.get_or_insert(index);
            }
        }
    }

    if let Some(&(delimiter, pos)) = open.last() {
        return Err(ParseError::unbalanced(pos, delimiter));
    }
    if let Some(begin) = start {
        let end = tokens
            .iter()
            .rposition(|t| t.token != Token::Newline)
            .map_or(begin, |last| last + 1);
        if end > begin {
            groups.push(begin..end);
        }
    }

    Ok(groups.into_iter().map(|range| &tokens[range]).collect())
}

fn close(open: &mut Vec<(char, usize)>, expected: char, found: char, pos: usize) -> ParseResult<()> {
    match open.pop() {
        Some((delimiter, _)) if delimiter == expected => Ok(()),
        Some((delimiter, at)) => Err(ParseError::unbalanced(at, delimiter)),
        None => Err(ParseError::unbalanced(pos, found)),
    }
}

/// A trailing operator means the statement carries on after the line break
fn continues_on_next_line(tokens: &[SpannedToken]) -> bool {
    matches!(
        tokens.iter().rev().find(|t| !t.token.is_trivia()).map(|t| &t.token),
        Some(Token::Punct(_) | Token::Slash)
    )
}
