use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::compiler::compile;
use crate::config::load_routes_config;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::matcher::{split_path, Bindings};
use crate::router::{parse_method, RouteTable};
use crate::template::parse;

/// Command-line interface for httprule
///
/// Compiles HTTP path templates to matcher bytecode and resolves requests
/// against route tables.
#[derive(Parser, Debug)]
#[command(name = "httprule", version)]
#[command(about = "HTTP path template compiler and matcher", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "HTTPRULE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a path template and print the program
    Compile {
        /// Path template, e.g. /v1/{name=shelves/*}:undelete
        #[arg(short, long)]
        pattern: String,

        /// Print the program as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Match a single request path against a template
    Match {
        /// Path template
        #[arg(short, long)]
        pattern: String,

        /// Request path (no query string), e.g. /v1/shelves/1
        #[arg(long)]
        path: String,
    },
    /// List the routes in a routes file
    Routes {
        /// Routes file (YAML, JSON or TOML)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Resolve a request against a routes file
    Resolve {
        /// Routes file (YAML, JSON or TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path (no query string)
        #[arg(long)]
        path: String,
    },
}

fn bindings_json(bindings: &Bindings) -> Value {
    let map: Map<String, Value> = bindings
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map)
}

fn load_table(config: &Path) -> Result<RouteTable> {
    let routes = load_routes_config(config)?;
    RouteTable::from_config(&routes)
        .with_context(|| format!("Failed to build route table from {}", config.display()))
}

/// Run one command, writing its output to `out`.
///
/// Returns `Ok(false)` when a `match` or `resolve` found nothing.
pub fn execute<W: Write>(command: &Commands, out: &mut W) -> Result<bool> {
    match command {
        Commands::Compile { pattern, json } => {
            let template = parse(pattern).with_context(|| format!("Invalid template '{pattern}'"))?;
            let program = compile(&template);
            program
                .validate()
                .with_context(|| format!("Compiled program for '{pattern}' is invalid"))?;

            if *json {
                let doc = json!({
                    "template": template.to_string(),
                    "version": program.version(),
                    "opcodes": program.opcodes(),
                    "pool": program.pool().iter().map(|s| s.as_ref()).collect::<Vec<&str>>(),
                    "verb": program.verb(),
                    "fields": program.fields(),
                    "max_stack": program.max_stack_depth(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
            } else {
                writeln!(out, "template:  {template}")?;
                writeln!(out, "verb:      {}", program.verb())?;
                writeln!(out, "fields:    {:?}", program.fields())?;
                writeln!(out, "max stack: {}", program.max_stack_depth())?;
                writeln!(out, "pool:")?;
                for (i, entry) in program.pool().iter().enumerate() {
                    writeln!(out, "  {i:>4} {entry:?}")?;
                }
                writeln!(out, "code:")?;
                for line in program.disassemble().lines() {
                    writeln!(out, "  {line}")?;
                }
            }
            Ok(true)
        }
        Commands::Match { pattern, path } => {
            let template = parse(pattern).with_context(|| format!("Invalid template '{pattern}'"))?;
            let program = compile(&template);
            let request = split_path(path);
            match program.match_path(&request.components, request.verb) {
                Some(bindings) => {
                    let doc = json!({ "matched": true, "bindings": bindings_json(&bindings) });
                    writeln!(out, "{doc}")?;
                    Ok(true)
                }
                None => {
                    writeln!(out, "{}", json!({ "matched": false }))?;
                    Ok(false)
                }
            }
        }
        Commands::Routes { config } => {
            let table = load_table(config)?;
            table.write_routes(out)?;
            Ok(true)
        }
        Commands::Resolve {
            config,
            method,
            path,
        } => {
            let method =
                parse_method(method).ok_or_else(|| anyhow!("Unsupported HTTP method '{method}'"))?;
            let table = load_table(config)?;
            match table.route(&method, path) {
                Some(m) => {
                    let doc = json!({
                        "matched": true,
                        "route": m.name(),
                        "method": m.route.method.as_str(),
                        "pattern": m.route.pattern,
                        "bindings": bindings_json(&m.bindings),
                    });
                    writeln!(out, "{doc}")?;
                    Ok(true)
                }
                None => {
                    writeln!(out, "{}", json!({ "matched": false }))?;
                    Ok(false)
                }
            }
        }
    }
}

/// Initialise logging and run the parsed command against stdout
pub fn run(cli: &Cli) -> Result<bool> {
    let log_config = LogConfig {
        log_level: cli.log_level.clone(),
        ..LogConfig::from_env()
    };
    init_logging_with_config(&log_config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)
}
