//! Matcher core - the bytecode VM on the request hot path.
//!
//! # JSF Compliance (Rule 206)
//!
//! Components are borrowed from the request path and only copied when a
//! value is captured or joined. The evaluation stack and the bindings live
//! inline for the common case (≤8 entries).

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::compiler::{CompiledProgram, OpCode};

/// Maximum number of bindings (and stack slots) before heap allocation.
pub const MAX_INLINE_BINDINGS: usize = 8;

/// Inline storage for `(field path, value)` pairs.
///
/// Field paths are `Arc<str>` handed out by the program's pool, so recording a
/// binding never copies the key.
pub type BindingVec = SmallVec<[(Arc<str>, String); MAX_INLINE_BINDINGS]>;

/// Field path → matched text, produced by a successful match.
///
/// Keys are unique: a second capture under the same field path overwrites the
/// first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: BindingVec,
}

impl Bindings {
    /// Value bound to `field`, if any
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == field)
            .map(|(_, v)| v.as_str())
    }

    /// Number of bound fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was bound
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.into_iter()
    }

    /// Copy into a `HashMap`.
    /// Note: This allocates - use [`Bindings::get`] in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn insert(&mut self, field: &Arc<str>, value: String) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == field) {
            slot.1 = value;
        } else {
            self.entries.push((Arc::clone(field), value));
        }
    }
}

type BindingIter<'a> =
    std::iter::Map<std::slice::Iter<'a, (Arc<str>, String)>, fn(&'a (Arc<str>, String)) -> (&'a str, &'a str)>;

fn binding_pair(entry: &(Arc<str>, String)) -> (&str, &str) {
    (entry.0.as_ref(), entry.1.as_str())
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a str, &'a str);
    type IntoIter = BindingIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(binding_pair as fn(&'a (Arc<str>, String)) -> (&'a str, &'a str))
    }
}

type Stack<'a> = SmallVec<[Cow<'a, str>; MAX_INLINE_BINDINGS]>;

fn join<'a, I>(parts: I, capacity: usize) -> String
where
    I: IntoIterator<Item = Cow<'a, str>>,
{
    let mut out = String::with_capacity(capacity);
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(&part);
    }
    out
}

/// Execute `program` against request path components and a request verb.
///
/// The request verb must equal the program's verb exactly: a program without
/// a verb rejects requests that carry one.
///
/// Returns `None` on any failure: verb mismatch, literal mismatch, running out
/// of components, stack underflow, or components left unconsumed. There is no
/// backtracking; the program encodes a single parse shape.
///
/// Values pushed by top-level literals and wildcards that are never captured
/// are simply dropped at the end.
///
/// ```rust
/// use httprule::compiler::compile;
/// use httprule::matcher::match_path;
/// use httprule::template::parse;
///
/// let program = compile(&parse("/{name=a/*/b}").unwrap());
/// let bindings = match_path(&program, &["a", "X", "b"], "").unwrap();
/// assert_eq!(bindings.get("name"), Some("a/X/b"));
///
/// assert!(match_path(&program, &["a", "X"], "").is_none());
/// ```
#[must_use]
pub fn match_path<S: AsRef<str>>(
    program: &CompiledProgram,
    components: &[S],
    verb: &str,
) -> Option<Bindings> {
    if program.verb() != verb {
        return None;
    }

    let pool = program.pool();
    let mut stack: Stack<'_> = SmallVec::with_capacity(program.max_stack_depth());
    let mut bindings = Bindings::default();
    let mut cursor = 0usize;

    for ins in program.instructions() {
        match ins.code {
            OpCode::Push => {
                let component = components.get(cursor)?.as_ref();
                cursor += 1;
                stack.push(Cow::Borrowed(component));
            }
            OpCode::LitPush => {
                let component = components.get(cursor)?.as_ref();
                if component != pool.get(ins.operand)?.as_ref() {
                    return None;
                }
                cursor += 1;
                stack.push(Cow::Borrowed(component));
            }
            OpCode::PushM => {
                let rest = components.get(cursor..).unwrap_or_default();
                cursor = components.len();
                let value = match rest {
                    [] => Cow::Borrowed(""),
                    [single] => Cow::Borrowed(single.as_ref()),
                    many => {
                        let capacity = many.iter().map(|c| c.as_ref().len() + 1).sum();
                        Cow::Owned(join(many.iter().map(|c| Cow::Borrowed(c.as_ref())), capacity))
                    }
                };
                stack.push(value);
            }
            OpCode::ConcatN => {
                let n = ins.operand;
                let start = stack.len().checked_sub(n)?;
                let value = if n == 1 {
                    stack.pop()?
                } else {
                    let capacity = stack[start..].iter().map(|v| v.len() + 1).sum();
                    Cow::Owned(join(stack.drain(start..), capacity))
                };
                stack.push(value);
            }
            OpCode::Capture => {
                let value = stack.pop()?;
                bindings.insert(pool.get(ins.operand)?, value.into_owned());
            }
            OpCode::Nop | OpCode::End => return None,
        }
    }

    if cursor != components.len() {
        return None;
    }
    Some(bindings)
}

impl CompiledProgram {
    /// Method form of [`match_path`]
    #[inline]
    #[must_use]
    pub fn match_path<S: AsRef<str>>(&self, components: &[S], verb: &str) -> Option<Bindings> {
        match_path(self, components, verb)
    }
}
