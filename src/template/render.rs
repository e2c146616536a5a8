//! Template-to-string rendering for registration logs and diagnostics.
//!
//! Rendering is the inverse of parsing for every template the parser can
//! produce: `parse(render(t)) == t`.

use std::fmt::{self, Write};

use super::types::{Segment, Template};

/// Render a template back into its textual pattern form.
///
/// ```rust
/// use httprule::template::{render, Segment, Template};
///
/// let t = Template::new(
///     vec![Segment::variable(
///         "name",
///         vec![Segment::literal("a"), Segment::Wildcard, Segment::literal("b")],
///     )],
///     "LOCK",
/// );
/// assert_eq!(render(&t), "/{name=a/*/b}:LOCK");
/// ```
#[must_use]
pub fn render(template: &Template) -> String {
    template.to_string()
}

/// Render a single segment (no leading slash)
#[must_use]
pub fn render_segment(segment: &Segment) -> String {
    segment.to_string()
}

fn write_joined(f: &mut fmt::Formatter<'_>, segments: &[Segment]) -> fmt::Result {
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            f.write_char('/')?;
        }
        fmt::Display::fmt(segment, f)?;
    }
    Ok(())
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Wildcard => f.write_char('*'),
            Segment::DeepWildcard => f.write_str("**"),
            Segment::Variable { path, segments } => {
                write!(f, "{{{path}=")?;
                if segments.is_empty() {
                    f.write_char('*')?;
                } else {
                    write_joined(f, segments)?;
                }
                f.write_char('}')
            }
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('/')?;
        write_joined(f, &self.segments)?;
        if !self.verb.is_empty() {
            write!(f, ":{}", self.verb)?;
        }
        Ok(())
    }
}
