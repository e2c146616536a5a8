//! # Router Module
//!
//! Resolves an HTTP request (method and path) to a named route whose path
//! template matches, returning the field bindings captured from the path.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: at startup each route pattern (e.g.
//!    `/v1/{name=shelves/*}/books/{book}`) is parsed into a
//!    [`Template`](crate::template::Template), compiled into a
//!    [`CompiledProgram`](crate::compiler::CompiledProgram) and validated.
//!
//! 2. **Matching**: per request the path is split into components and a
//!    custom verb, then the programs registered for the request method run in
//!    registration order until one matches.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use httprule::router::RouteTable;
//!
//! let mut table = RouteTable::new();
//! table
//!     .register("get_book", Method::GET, "/v1/{name=shelves/*/books/*}")
//!     .unwrap();
//!
//! let m = table.route(&Method::GET, "/v1/shelves/1/books/2").unwrap();
//! assert_eq!(m.name(), "get_book");
//! assert_eq!(m.get_binding("name"), Some("shelves/1/books/2"));
//! ```
//!
//! ## Performance
//!
//! Matching never backtracks and touches each path component at most once
//! per candidate. Programs are shared behind `Arc`, so a table can be cloned
//! cheaply and used from many threads.

mod core;

pub use core::{parse_method, Route, RouteError, RouteMatch, RouteTable, SUPPORTED_METHODS};
