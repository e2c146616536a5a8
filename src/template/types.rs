use serde::{Deserialize, Serialize};

/// One unit of a path template.
///
/// Variables carry their own nested segments; the nesting depth is exactly one,
/// so `segments` inside a [`Segment::Variable`] only ever holds the three simple
/// kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Matches exactly one path component equal to the text
    Literal(String),
    /// Matches exactly one arbitrary path component (`*`)
    Wildcard,
    /// Matches zero or more remaining path components (`**`)
    DeepWildcard,
    /// Binds the `/`-joined values matched by `segments` to the field `path`
    Variable {
        /// Field path, possibly dot-separated for nested message fields (e.g. `name.nested`)
        path: String,
        /// Nested segments; never contains another variable
        segments: Vec<Segment>,
    },
}

impl Segment {
    /// Convenience constructor for a literal segment
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    /// Convenience constructor for a variable segment
    pub fn variable(path: impl Into<String>, segments: Vec<Segment>) -> Self {
        Segment::Variable {
            path: path.into(),
            segments,
        }
    }

    /// Whether this segment binds a request field
    #[inline]
    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable { .. })
    }
}

/// A parsed route pattern: top-level segments plus an optional custom verb.
///
/// `/v1/{name=shelves/*}:undelete` has segments `[v1, {name=shelves/*}]` and
/// verb `undelete`. An empty verb means "no verb".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Template {
    /// Top-level segments in document order
    pub segments: Vec<Segment>,
    /// Custom verb qualifier (empty when absent)
    #[serde(default)]
    pub verb: String,
}

impl Template {
    /// Build a template from segments and a verb
    pub fn new(segments: Vec<Segment>, verb: impl Into<String>) -> Self {
        Self {
            segments,
            verb: verb.into(),
        }
    }

    /// Field paths of every top-level variable, in document order
    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable { path, .. } => Some(path.as_str()),
            _ => None,
        })
    }

    /// Number of variables in the template
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_variable()).count()
    }
}
