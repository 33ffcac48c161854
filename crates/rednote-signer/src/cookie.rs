//!
//! Cookie header normalisation
//!

/// Split a raw `Cookie` header value into the list form the signer expects
///
/// Segments are split on `;` and empty segments are dropped. Whitespace is kept as-is.
#[must_use]
pub fn normalise(cookie: &str) -> Vec<&str> {
    cookie
        .split(';')
        .filter(|segment| !segment.is_empty())
        .collect()
}
