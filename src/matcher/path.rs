use smallvec::SmallVec;

/// Maximum number of path components kept inline.
pub const MAX_INLINE_COMPONENTS: usize = 16;

/// A request path split into components plus the trailing custom verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath<'a> {
    /// Path components in order, borrowed from the request path
    pub components: SmallVec<[&'a str; MAX_INLINE_COMPONENTS]>,
    /// Custom verb (empty when absent)
    pub verb: &'a str,
}

/// Split a request path (no query string) into components and verb.
///
/// - `/` and the empty string have no components
/// - a trailing `/` yields a final empty component
/// - `:verb` is taken from the last component when the colon is not its first
///   character
///
/// ```rust
/// use httprule::matcher::split_path;
///
/// let p = split_path("/v1/shelves/1:undelete");
/// assert_eq!(p.components.as_slice(), &["v1", "shelves", "1"]);
/// assert_eq!(p.verb, "undelete");
/// ```
#[must_use]
pub fn split_path(path: &str) -> RequestPath<'_> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut components: SmallVec<[&str; MAX_INLINE_COMPONENTS]> = SmallVec::new();
    let mut verb = "";

    if trimmed.is_empty() {
        return RequestPath { components, verb };
    }

    components.extend(trimmed.split('/'));
    if let Some(last) = components.last_mut() {
        let component = *last;
        if let Some(idx) = component.rfind(':').filter(|&idx| idx > 0) {
            verb = &component[idx + 1..];
            *last = &component[..idx];
        }
    }

    RequestPath { components, verb }
}
