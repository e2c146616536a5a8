//! Pattern parser: turns `/v1/{name=shelves/*}:verb` into a [`Template`].
//!
//! Grammar:
//!
//! ```text
//! Template  = "/" [ Segments ] [ Verb ] ;
//! Segments  = Segment { "/" Segment } ;
//! Segment   = "*" | "**" | LITERAL | Variable ;
//! Variable  = "{" FieldPath [ "=" Segments ] "}" ;
//! FieldPath = IDENT { "." IDENT } ;
//! Verb      = ":" LITERAL ;
//! ```
//!
//! The parser is where structural rules are enforced. The compiler trusts its
//! output: variables never nest, and `**` is always the last consumer of input.

use std::fmt;
use std::str::FromStr;

use super::types::{Segment, Template};

/// Error returned when a pattern does not follow the template grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Pattern does not start with `/`
    MissingLeadingSlash {
        /// The offending pattern
        pattern: String,
    },
    /// Two consecutive slashes, a trailing slash, or an empty `{name=}` body
    EmptySegment {
        /// The offending pattern
        pattern: String,
        /// Byte offset where a segment was expected
        position: usize,
    },
    /// A character that cannot appear at this position
    InvalidCharacter {
        /// The offending pattern
        pattern: String,
        /// Byte offset of the character
        position: usize,
        /// The character found
        found: char,
    },
    /// Input ended while more was required
    UnexpectedEnd {
        /// The offending pattern
        pattern: String,
        /// What the parser was looking for
        expected: &'static str,
    },
    /// A variable opened inside another variable
    NestedVariable {
        /// The offending pattern
        pattern: String,
        /// Byte offset of the inner `{`
        position: usize,
    },
    /// Variable name is not a dot-separated list of identifiers
    InvalidFieldPath {
        /// The offending pattern
        pattern: String,
        /// The rejected field path
        field: String,
    },
    /// `**` followed by further segments
    DeepWildcardNotLast {
        /// The offending pattern
        pattern: String,
    },
    /// `:` with nothing after it
    EmptyVerb {
        /// The offending pattern
        pattern: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingLeadingSlash { pattern } => {
                write!(f, "invalid template '{pattern}': must start with '/'")
            }
            ParseError::EmptySegment { pattern, position } => {
                write!(f, "invalid template '{pattern}': empty segment at offset {position}")
            }
            ParseError::InvalidCharacter {
                pattern,
                position,
                found,
            } => write!(
                f,
                "invalid template '{pattern}': unexpected character '{found}' at offset {position}"
            ),
            ParseError::UnexpectedEnd { pattern, expected } => {
                write!(f, "invalid template '{pattern}': expected {expected} before end of input")
            }
            ParseError::NestedVariable { pattern, position } => write!(
                f,
                "invalid template '{pattern}': nested variable at offset {position}"
            ),
            ParseError::InvalidFieldPath { pattern, field } => {
                write!(f, "invalid template '{pattern}': bad field path '{field}'")
            }
            ParseError::DeepWildcardNotLast { pattern } => write!(
                f,
                "invalid template '{pattern}': '**' must be the last segment"
            ),
            ParseError::EmptyVerb { pattern } => {
                write!(f, "invalid template '{pattern}': empty verb after ':'")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a pattern string into a [`Template`].
///
/// ```rust
/// use httprule::template::{parse, Segment};
///
/// let t = parse("/v1/{name=a/*/b}/c:LOCK").unwrap();
/// assert_eq!(t.verb, "LOCK");
/// assert_eq!(t.segments[0], Segment::literal("v1"));
/// ```
pub fn parse(pattern: &str) -> Result<Template, ParseError> {
    if !pattern.starts_with('/') {
        return Err(ParseError::MissingLeadingSlash {
            pattern: pattern.to_string(),
        });
    }

    let (end, verb) = split_verb(pattern)?;
    let mut parser = Parser {
        pattern,
        pos: 1,
        end,
    };

    let segments = if parser.pos == parser.end {
        Vec::new()
    } else {
        let segments = parser.segments(false)?;
        if let Some(c) = parser.peek() {
            return Err(parser.invalid(c));
        }
        segments
    };

    check_deep_wildcard(pattern, &segments)?;

    Ok(Template {
        segments,
        verb: verb.to_string(),
    })
}

impl FromStr for Template {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Literal characters: RFC 3986 unreserved, sub-delims (minus `*`), `%`, `:` and `@`
#[inline]
fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~%!$&'()+,;=@:".contains(c)
}

fn is_valid_field_path(field: &str) -> bool {
    !field.is_empty()
        && field.split('.').all(|ident| {
            let mut chars = ident.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Locate the verb: text after the last `:` outside braces that follows the
/// last top-level `/`. Returns the end offset of the segment part and the verb.
fn split_verb(pattern: &str) -> Result<(usize, &str), ParseError> {
    let mut depth = 0usize;
    let mut colon = None;
    for (i, c) in pattern.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => colon = None,
            ':' if depth == 0 => colon = Some(i),
            _ => {}
        }
    }

    let Some(idx) = colon else {
        return Ok((pattern.len(), ""));
    };
    // `/:verb` leaves no component for the verb to hang off
    if pattern[..idx].ends_with('/') {
        return Err(ParseError::EmptySegment {
            pattern: pattern.to_string(),
            position: idx,
        });
    }
    let verb = &pattern[idx + 1..];
    if verb.is_empty() {
        return Err(ParseError::EmptyVerb {
            pattern: pattern.to_string(),
        });
    }
    if let Some((offset, found)) = verb.char_indices().find(|(_, c)| !is_literal_char(*c)) {
        return Err(ParseError::InvalidCharacter {
            pattern: pattern.to_string(),
            position: idx + 1 + offset,
            found,
        });
    }
    Ok((idx, verb))
}

fn check_deep_wildcard(pattern: &str, segments: &[Segment]) -> Result<(), ParseError> {
    let flat: Vec<&Segment> = segments
        .iter()
        .flat_map(|s| match s {
            Segment::Variable { segments, .. } => segments.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .collect();

    let last = flat.len().saturating_sub(1);
    let misplaced = flat
        .iter()
        .enumerate()
        .any(|(i, s)| matches!(s, Segment::DeepWildcard) && i != last);
    if misplaced {
        return Err(ParseError::DeepWildcardNotLast {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

struct Parser<'a> {
    pattern: &'a str,
    pos: usize,
    end: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        if self.pos >= self.end {
            return None;
        }
        self.pattern[self.pos..self.end].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn invalid(&self, found: char) -> ParseError {
        ParseError::InvalidCharacter {
            pattern: self.pattern.to_string(),
            position: self.pos,
            found,
        }
    }

    fn segments(&mut self, in_variable: bool) -> Result<Vec<Segment>, ParseError> {
        let mut segments = Vec::new();
        loop {
            segments.push(self.segment(in_variable)?);
            match self.peek() {
                Some('/') => self.bump('/'),
                _ => return Ok(segments),
            }
        }
    }

    fn segment(&mut self, in_variable: bool) -> Result<Segment, ParseError> {
        match self.peek() {
            None | Some('/') | Some('}') => Err(ParseError::EmptySegment {
                pattern: self.pattern.to_string(),
                position: self.pos,
            }),
            Some('*') => {
                self.bump('*');
                let segment = if self.peek() == Some('*') {
                    self.bump('*');
                    Segment::DeepWildcard
                } else {
                    Segment::Wildcard
                };
                match self.peek() {
                    None | Some('/') | Some('}') => Ok(segment),
                    Some(c) => Err(self.invalid(c)),
                }
            }
            Some('{') if in_variable => Err(ParseError::NestedVariable {
                pattern: self.pattern.to_string(),
                position: self.pos,
            }),
            Some('{') => self.variable(),
            Some(c) if is_literal_char(c) => Ok(Segment::Literal(self.literal())),
            Some(c) => Err(self.invalid(c)),
        }
    }

    fn literal(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_literal_char(c) {
                break;
            }
            self.bump(c);
        }
        self.pattern[start..self.pos].to_string()
    }

    fn variable(&mut self) -> Result<Segment, ParseError> {
        self.bump('{');

        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_' || c == '.') {
                break;
            }
            self.bump(c);
        }
        let path = &self.pattern[start..self.pos];
        if !is_valid_field_path(path) {
            return Err(ParseError::InvalidFieldPath {
                pattern: self.pattern.to_string(),
                field: path.to_string(),
            });
        }

        let segments = if self.peek() == Some('=') {
            self.bump('=');
            self.segments(true)?
        } else {
            vec![Segment::Wildcard]
        };

        match self.peek() {
            Some('}') => {
                self.bump('}');
                Ok(Segment::Variable {
                    path: path.to_string(),
                    segments,
                })
            }
            Some('{') => Err(ParseError::NestedVariable {
                pattern: self.pattern.to_string(),
                position: self.pos,
            }),
            Some(c) => Err(self.invalid(c)),
            None => Err(ParseError::UnexpectedEnd {
                pattern: self.pattern.to_string(),
                expected: "'}'",
            }),
        }
    }
}
