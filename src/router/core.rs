//! Router core module - route registration and per-request lookup.
//!
//! # JSF Compliance (Rule 206)
//!
//! Registration (parse, compile, validate) happens once at startup. The
//! lookup path only splits the request path into borrowed components and
//! runs the precompiled programs.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::compiler::{compile, CompiledProgram, ProgramError};
use crate::config::RoutesConfig;
use crate::matcher::{split_path, Bindings};
use crate::template::{parse, ParseError, Template};

/// HTTP methods a route may be registered for
pub const SUPPORTED_METHODS: [Method; 8] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
    Method::TRACE,
];

/// Lookups slower than this are logged at `warn`
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Error returned when a route cannot be registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Pattern failed to parse
    Parse {
        /// Route name
        name: String,
        /// Parser error
        source: ParseError,
    },
    /// Compiled program failed validation
    Program {
        /// Route name
        name: String,
        /// Validation error
        source: ProgramError,
    },
    /// A route with this name is already registered
    DuplicateName {
        /// Route name
        name: String,
    },
    /// Method is not one of [`SUPPORTED_METHODS`]
    UnsupportedMethod {
        /// Route name
        name: String,
        /// Method as written
        method: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Parse { name, source } => write!(f, "route '{name}': {source}"),
            RouteError::Program { name, source } => {
                write!(f, "route '{name}': invalid program: {source}")
            }
            RouteError::DuplicateName { name } => {
                write!(f, "route '{name}' is already registered")
            }
            RouteError::UnsupportedMethod { name, method } => {
                write!(f, "route '{name}': unsupported HTTP method '{method}'")
            }
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Parse { source, .. } => Some(source),
            RouteError::Program { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A registered route: the parsed template and its compiled program.
#[derive(Debug, Clone)]
pub struct Route {
    /// Route (handler) name, unique within a table
    pub name: Arc<str>,
    /// HTTP method the route answers
    pub method: Method,
    /// Canonical rendering of the template
    pub pattern: String,
    /// Parsed template
    pub template: Template,
    /// Compiled program, shared read-only by every lookup
    pub program: Arc<CompiledProgram>,
}

/// Result of successfully matching a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Field bindings captured from the path
    pub bindings: Bindings,
}

impl RouteMatch {
    /// Name of the matched route
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.route.name
    }

    /// Value captured for `field`
    #[inline]
    #[must_use]
    pub fn get_binding(&self, field: &str) -> Option<&str> {
        self.bindings.get(field)
    }
}

/// Parse an HTTP method name against [`SUPPORTED_METHODS`] (case-insensitive)
#[must_use]
pub fn parse_method(method: &str) -> Option<Method> {
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(method))
        .cloned()
}

/// Table of compiled routes, looked up per request.
///
/// Candidates for a method are tried in registration order and the first
/// program that matches wins. The table performs no ranking: callers that
/// need one route to shadow another register it first.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
    by_method: HashMap<Method, Vec<Arc<Route>>>,
}

impl RouteTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a routes configuration
    pub fn from_config(config: &RoutesConfig) -> Result<Self, RouteError> {
        let mut table = Self::new();
        for route in &config.routes {
            let method = parse_method(&route.method).ok_or_else(|| RouteError::UnsupportedMethod {
                name: route.name.clone(),
                method: route.method.clone(),
            })?;
            table.register(&route.name, method, &route.pattern)?;
        }

        let routes_summary: Vec<String> = table
            .routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.pattern))
            .collect();
        info!(
            routes_count = table.len(),
            routes_summary = ?routes_summary,
            "Route table loaded"
        );
        Ok(table)
    }

    /// Parse, compile and register a route
    pub fn register(&mut self, name: &str, method: Method, pattern: &str) -> Result<(), RouteError> {
        if self.routes.iter().any(|r| r.name.as_ref() == name) {
            return Err(RouteError::DuplicateName {
                name: name.to_string(),
            });
        }
        if !SUPPORTED_METHODS.contains(&method) {
            return Err(RouteError::UnsupportedMethod {
                name: name.to_string(),
                method: method.to_string(),
            });
        }

        let template = parse(pattern).map_err(|source| RouteError::Parse {
            name: name.to_string(),
            source,
        })?;
        let program = compile(&template);
        program.validate().map_err(|source| RouteError::Program {
            name: name.to_string(),
            source,
        })?;

        let route = Arc::new(Route {
            name: Arc::from(name),
            method: method.clone(),
            pattern: template.to_string(),
            program: Arc::new(program),
            template,
        });

        info!(
            route = %route.name,
            method = %route.method,
            pattern = %route.pattern,
            fields = ?route.program.fields(),
            instructions = route.program.instructions().len(),
            "Route registered"
        );

        self.by_method
            .entry(method)
            .or_default()
            .push(Arc::clone(&route));
        self.routes.push(route);
        Ok(())
    }

    /// Match a request to a route.
    ///
    /// `path` is the request path without query string, e.g. `/v1/shelves/1:undelete`.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let request = split_path(path);
        let candidates = self.by_method.get(method).map(Vec::as_slice).unwrap_or_default();

        let result = candidates.iter().find_map(|route| {
            route
                .program
                .match_path(&request.components, request.verb)
                .map(|bindings| RouteMatch {
                    route: Arc::clone(route),
                    bindings,
                })
        });
        let match_duration = match_start.elapsed();

        match &result {
            Some(m) if match_duration > SLOW_MATCH => warn!(
                method = %method,
                path = %path,
                route = %m.route.name,
                pattern = %m.route.pattern,
                candidates = candidates.len(),
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            ),
            Some(m) => debug!(
                method = %method,
                path = %path,
                route = %m.route.name,
                pattern = %m.route.pattern,
                bindings = ?m.bindings,
                duration_us = match_duration.as_micros(),
                "Route matched"
            ),
            None => warn!(
                method = %method,
                path = %path,
                candidates = candidates.len(),
                duration_us = match_duration.as_micros(),
                "No route matched"
            ),
        }

        result
    }

    /// Registered routes in registration order
    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Write one line per registered route to `out`
    pub fn write_routes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "[routes] count={}", self.routes.len())?;
        for route in &self.routes {
            writeln!(
                out,
                "[route] {} {} -> {} fields={:?}",
                route.method,
                route.pattern,
                route.name,
                route.program.fields()
            )?;
        }
        Ok(())
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) -> io::Result<()> {
        self.write_routes(&mut io::stdout().lock())
    }
}
