//! # CLI Module
//!
//! Command-line interface for compiling templates and inspecting route
//! tables, exposed as the `httprule` binary.
//!
//! ## Commands
//!
//! ### `compile`
//!
//! Parse and compile a template, printing the canonical template, string
//! pool, fields and a disassembly:
//!
//! ```bash
//! httprule compile --pattern '/v1/{name=shelves/*}:undelete'
//! httprule compile --pattern '/v1/{name=shelves/*}' --json
//! ```
//!
//! ### `match`
//!
//! Match one request path against a template. Exits with status 1 when the
//! path does not match:
//!
//! ```bash
//! httprule match --pattern '/v1/{name=shelves/*}' --path /v1/shelves/1
//! ```
//!
//! ### `routes`
//!
//! Load a routes file (YAML, JSON or TOML) and list the table:
//!
//! ```bash
//! httprule routes --config routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Look up a request in a routes file:
//!
//! ```bash
//! httprule resolve --config routes.yaml --method POST --path /v1/shelves/1:undelete
//! ```
//!
//! ## Logging
//!
//! Logs go to stderr. The level comes from `--log-level` or
//! `HTTPRULE_LOG_LEVEL` (default `warn` for the CLI); the format from
//! `HTTPRULE_LOG_FORMAT`.

mod commands;
#[cfg(test)]
mod tests;

pub use commands::{execute, run, Cli, Commands};
