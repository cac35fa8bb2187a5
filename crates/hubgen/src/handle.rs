// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type handle grammar.
//!
//! ```text
//! handle := name [ '<' handle { ',' handle } '>' ] { '[]' } [ '&' ]
//! ```
//!
//! Whitespace is ignored. The normalized form separates generic arguments
//! with `", "` and has no other whitespace.

use crate::error::HandleError;
use std::fmt;

/// Parsed type handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    ByRef(Box<TypeExpr>),
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::ByRef(inner) => write!(f, "{inner}&"),
        }
    }
}

/// Parse a handle.
pub fn parse(handle: &str) -> Result<TypeExpr, HandleError> {
    let mut parser = Parser {
        src: handle,
        chars: handle.char_indices().peekable(),
    };
    let expr = parser.handle()?;
    parser.skip_ws();
    if let Some(&(pos, _)) = parser.chars.peek() {
        return Err(parser.error(pos, "trailing input"));
    }
    Ok(expr)
}

/// Parse and re-print `handle` in normalized form.
pub fn normalize(handle: &str) -> Result<String, HandleError> {
    parse(handle).map(|e| e.to_string())
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '`' | '+')
}

struct Parser<'a> {
    src: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl Parser<'_> {
    fn error(&self, position: usize, reason: &'static str) -> HandleError {
        HandleError {
            handle: self.src.to_string(),
            position,
            reason,
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.chars.peek().is_some_and(|&(_, c)| c == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn position(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn handle(&mut self) -> Result<TypeExpr, HandleError> {
        self.skip_ws();
        let start = self.position();
        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        if name.is_empty() {
            let pos = self.position();
            return Err(self.error(pos, "expected a type name"));
        }
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error(start, "empty namespace segment"));
        }

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.handle()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                let pos = self.position();
                return Err(self.error(pos, "expected ',' or '>'"));
            }
        }

        let mut expr = TypeExpr::Named { name, args };
        while self.eat('[') {
            if !self.eat(']') {
                let pos = self.position();
                return Err(self.error(pos, "expected ']'"));
            }
            expr = TypeExpr::Array(Box::new(expr));
        }
        if self.eat('&') {
            expr = TypeExpr::ByRef(Box::new(expr));
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_name() {
        let expr = parse("Orders.Order").expect("parse");
        assert_eq!(
            expr,
            TypeExpr::Named {
                name: "Orders.Order".into(),
                args: Vec::new()
            }
        );
    }

    #[test]
    fn test_normalize_generic_whitespace() {
        assert_eq!(
            normalize("System.Collections.Generic.Dictionary< System.String ,Orders.Item >")
                .expect("normalize"),
            "System.Collections.Generic.Dictionary<System.String, Orders.Item>"
        );
    }

    #[test]
    fn test_parse_wrappers() {
        let expr = parse("Orders.Order[][]&").expect("parse");
        let TypeExpr::ByRef(inner) = expr else {
            panic!("expected by-ref");
        };
        let TypeExpr::Array(inner) = *inner else {
            panic!("expected array");
        };
        assert!(matches!(*inner, TypeExpr::Array(_)));
    }

    #[test]
    fn test_parse_nested_generics() {
        let expr = parse("Orders.Page<System.Collections.Generic.List<Orders.Item[]>>")
            .expect("parse");
        assert_eq!(
            expr.to_string(),
            "Orders.Page<System.Collections.Generic.List<Orders.Item[]>>"
        );
    }

    #[test]
    fn test_malformed_handles() {
        assert!(parse("").is_err());
        assert!(parse("Orders.").is_err());
        assert!(parse("List<A").is_err());
        assert!(parse("A[").is_err());
        assert!(parse("A B").is_err());

        let err = parse("List<,>").unwrap_err();
        assert_eq!(err.position, 5);
    }
}
