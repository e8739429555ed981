//! Environment variable substitution for `repo` and `extra` strings
//!
//! Supported references:
//!
//! - `$NAME` and `${NAME}`
//! - `${NAME:start}` and `${NAME:start:len}`, a character slice of the value
//! - `${NAME:-default}`, `default` when `NAME` is unset or empty; the
//!   default is itself a template, so `${A:-${B}}` falls back to `B`
//!
//! A `$` that does not start a reference is kept literally. Templates are
//! parsed once when the configuration is loaded so malformed references are
//! reported before any environment lookup happens.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::env::Environment;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Modifier {
    None,
    Slice { start: usize, len: Option<usize> },
    Default(Template),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VarRef {
    name: String,
    modifier: Modifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(VarRef),
}

/// A parsed substitution template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source` into literal and variable segments.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            if c != '$' {
                literal.push(c);
                continue;
            }

            let var = match chars.peek() {
                Some(&(_, '{')) => {
                    chars.next();
                    let body = take_braced(&mut chars)
                        .ok_or_else(|| malformed(source, pos, "unterminated `${`"))?;
                    parse_braced(source, pos, &body)?
                }
                Some(&(_, next)) if is_name_start(next) => VarRef {
                    name: take_name(&mut chars),
                    modifier: Modifier::None,
                },
                _ => {
                    literal.push('$');
                    continue;
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Var(var));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Names of all referenced variables, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Var(var) => Some(var.name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every reference from `env`.
    ///
    /// Fails with [`Error::UnboundVariable`] on the first unset variable that
    /// has no default.
    pub fn render<E: Environment + ?Sized>(&self, env: &E) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Var(var) => out.push_str(&render_var(var, env)?),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse and render `source` in one step.
pub fn expand<E: Environment + ?Sized>(source: &str, env: &E) -> Result<String> {
    Template::parse(source)?.render(env)
}

fn render_var<E: Environment + ?Sized>(var: &VarRef, env: &E) -> Result<String> {
    let value = env.var(&var.name);
    match (&var.modifier, value) {
        (Modifier::Default(default), None) => default.render(env),
        (Modifier::Default(default), Some(v)) if v.is_empty() => default.render(env),
        (_, None) => Err(Error::UnboundVariable {
            name: var.name.clone(),
        }),
        (Modifier::Slice { start, len }, Some(v)) => Ok(v
            .chars()
            .skip(*start)
            .take(len.unwrap_or(usize::MAX))
            .collect()),
        (Modifier::None | Modifier::Default(_), Some(v)) => Ok(v),
    }
}

/// Collect the body of a `${...}` up to its matching `}`.
fn take_braced(chars: &mut Peekable<CharIndices<'_>>) -> Option<String> {
    let mut body = String::new();
    let mut depth = 0usize;
    while let Some((_, c)) = chars.next() {
        match c {
            '}' if depth == 0 => return Some(body),
            '}' => depth -= 1,
            '$' if matches!(chars.peek(), Some(&(_, '{'))) => {
                depth += 1;
                body.push(c);
                if let Some((_, brace)) = chars.next() {
                    body.push(brace);
                }
                continue;
            }
            _ => {}
        }
        body.push(c);
    }
    None
}

fn take_name(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut name = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_name_char(c) {
            break;
        }
        name.push(c);
        chars.next();
    }
    name
}

fn parse_braced(source: &str, pos: usize, body: &str) -> Result<VarRef> {
    let name_end = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
    let (name, rest) = body.split_at(name_end);
    if !name.starts_with(is_name_start) {
        return Err(malformed(source, pos, "invalid variable name"));
    }

    let modifier = if rest.is_empty() {
        Modifier::None
    } else if let Some(default) = rest.strip_prefix(":-") {
        Modifier::Default(Template::parse(default)?)
    } else if let Some(slice) = rest.strip_prefix(':') {
        let offsets = match slice.split_once(':') {
            Some((start, len)) => parse_offset(start)
                .and_then(|start| parse_offset(len).map(|len| (start, Some(len)))),
            None => parse_offset(slice).map(|s| (s, None)),
        };
        let (start, len) = offsets.map_err(|reason| malformed(source, pos, reason))?;
        Modifier::Slice { start, len }
    } else {
        return Err(malformed(source, pos, "unsupported expansion"));
    };

    Ok(VarRef {
        name: name.to_string(),
        modifier,
    })
}

fn parse_offset(text: &str) -> std::result::Result<usize, &'static str> {
    text.trim()
        .parse()
        .map_err(|_| "slice offsets must be non-negative integers")
}

fn malformed(source: &str, position: usize, reason: &str) -> Error {
    Error::config(format!(
        "malformed variable reference at byte {position} in {source:?}: {reason}"
    ))
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
