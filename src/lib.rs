//! # httprule
//!
//! **httprule** compiles HTTP path templates such as
//! `/v1/{name=shelves/*/books/*}:undelete` into a compact bytecode program
//! and matches request paths against it, extracting variable bindings.
//!
//! ## Overview
//!
//! Templates are compiled once, at route registration time. Matching runs
//! the program as a tiny stack machine over the request's path components:
//! no regular expressions, no backtracking, and a single left-to-right pass.
//!
//! ## Architecture
//!
//! - **[`template`]** - Template data model, parser and canonical renderer
//! - **[`compiler`]** - Template → bytecode compiler, string pool and program validation
//! - **[`matcher`]** - Bytecode VM and request path splitting
//! - **[`router`]** - Named route table keyed by HTTP method
//! - **[`config`]** - Route table files (YAML, JSON or TOML)
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `httprule` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```text
//! "/v1/shelves/1:undelete"
//!        │ split_path
//!        ▼
//! components ["v1", "shelves", "1"], verb "undelete"
//!        │ match_path (per candidate route, registration order)
//!        ▼
//! bindings { name: "shelves/1" }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use httprule::{compile, parse, split_path};
//!
//! let program = compile(&parse("/v1/{name=shelves/*}:undelete").unwrap());
//!
//! let request = split_path("/v1/shelves/1:undelete");
//! let bindings = program.match_path(&request.components, request.verb).unwrap();
//! assert_eq!(bindings.get("name"), Some("shelves/1"));
//!
//! let request = split_path("/v1/shelves/1");
//! assert!(program.match_path(&request.components, request.verb).is_none());
//! ```
//!
//! ## Bytecode
//!
//! | Opcode    | Value | Operand        | Effect                                              |
//! |-----------|-------|----------------|-----------------------------------------------------|
//! | `Nop`     | 0     | -              | reserved, never emitted                             |
//! | `Push`    | 1     | -              | consume one component, push it                      |
//! | `LitPush` | 2     | pool index     | consume one component equal to the literal, push it |
//! | `PushM`   | 3     | -              | consume all remaining components, push them joined  |
//! | `ConcatN` | 4     | count          | pop `n` values, push them joined with `/`           |
//! | `Capture` | 5     | pool index     | pop one value, bind it to the field path            |
//! | `End`     | 6     | -              | reserved, never emitted                             |
//!
//! Compiled programs are immutable and can be shared across threads behind
//! an `Arc`.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod logging;
pub mod matcher;
pub mod router;
pub mod template;

pub use compiler::{compile, CompiledProgram, OpCode, Pool, ProgramError, PROGRAM_VERSION};
pub use matcher::{match_path, split_path, Bindings};
pub use router::{RouteError, RouteMatch, RouteTable};
pub use template::{parse, render, ParseError, Segment, Template};
