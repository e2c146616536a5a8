//! # Matcher Module
//!
//! The matcher is the virtual machine that runs a
//! [`CompiledProgram`](crate::compiler::CompiledProgram) against an incoming
//! request path.
//!
//! ## Execution Model
//!
//! - one evaluation stack of string values
//! - a cursor into the path components that only ever advances
//! - a verb check up front: a program with a verb only matches requests
//!   carrying exactly that verb
//!
//! A match succeeds when every instruction succeeds and every component has
//! been consumed. The result is a [`Bindings`] map from field path to the
//! matched text, ready for the field-binding layer to write into the request
//! message (`name.nested` addresses a nested field).
//!
//! ## Concurrency
//!
//! Programs are immutable. Each call allocates only its own stack and
//! bindings, so any number of threads may match against the same
//! `Arc<CompiledProgram>` without synchronisation.
//!
//! ## Example
//!
//! ```rust
//! use httprule::compiler::compile;
//! use httprule::matcher::split_path;
//! use httprule::template::parse;
//!
//! let program = compile(&parse("/v1/{name=shelves/*/books/*}:read").unwrap());
//! let request = split_path("/v1/shelves/7/books/42:read");
//! let bindings = program.match_path(&request.components, request.verb).unwrap();
//! assert_eq!(bindings.get("name"), Some("shelves/7/books/42"));
//! ```

mod core;
mod path;

pub use core::{match_path, BindingVec, Bindings, MAX_INLINE_BINDINGS};
pub use path::{split_path, RequestPath, MAX_INLINE_COMPONENTS};
