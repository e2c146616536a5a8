//! # Template Module
//!
//! The template module holds the vocabulary every other part of the crate
//! consumes: [`Segment`] and [`Template`], plus the parser that produces them
//! from pattern strings and the renderer that turns them back into text.
//!
//! ## Pattern Syntax
//!
//! | Pattern | Segment |
//! |---|---|
//! | `books` | `Literal("books")` |
//! | `*` | `Wildcard` |
//! | `**` | `DeepWildcard` |
//! | `{name}` | `Variable { path: "name", segments: [Wildcard] }` |
//! | `{name=shelves/*}` | `Variable { path: "name", segments: [Literal("shelves"), Wildcard] }` |
//!
//! A trailing `:verb` qualifies the whole template, e.g. `/v1/{name=*}:undelete`.
//!
//! ## Example
//!
//! ```rust
//! use httprule::template::Template;
//!
//! let t: Template = "/v1/{name=shelves/*}/books:batchGet".parse().unwrap();
//! assert_eq!(t.to_string(), "/v1/{name=shelves/*}/books:batchGet");
//! assert_eq!(t.field_paths().collect::<Vec<_>>(), vec!["name"]);
//! ```

mod parser;
mod render;
mod types;
#[cfg(test)]
mod tests;

pub use parser::{parse, ParseError};
pub use render::{render, render_segment};
pub use types::{Segment, Template};
