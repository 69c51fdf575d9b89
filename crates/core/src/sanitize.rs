//! Output sanitization for user-supplied text.
//!
//! Stored values are never rewritten. Every read path converts rows into their
//! public shape through [`PublicShape`], and each free-text field goes through
//! [`sanitize`] on the way out.

use std::collections::BTreeMap;

use serde::Serialize;

/// Escape HTML-significant characters so the string is inert when rendered.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Sanitize an optional text field. `None` stays `None`.
pub fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.map(sanitize)
}

/// Sanitize every element of an optional text array. A missing array becomes empty.
pub fn sanitize_list(items: Option<&[String]>) -> Vec<String> {
    items
        .unwrap_or_default()
        .iter()
        .map(|item| sanitize(item))
        .collect()
}

/// Sanitize the keys of a checklist item set. Values pass through unchanged
/// and a missing set becomes empty.
pub fn sanitize_keys(items: Option<&BTreeMap<String, bool>>) -> BTreeMap<String, bool> {
    items
        .map(|map| {
            map.iter()
                .map(|(label, done)| (sanitize(label), *done))
                .collect()
        })
        .unwrap_or_default()
}

/// A persisted row that can be turned into its outward-facing representation.
pub trait PublicShape {
    /// Serializable form with every free-text field sanitized and secrets omitted.
    type Public: Serialize + Send;

    fn to_public(&self) -> Self::Public;
}

/// Element-wise [`PublicShape::to_public`], preserving order.
pub fn to_public_all<T: PublicShape>(rows: &[T]) -> Vec<T::Public> {
    rows.iter().map(PublicShape::to_public).collect()
}
