//! Request header reflection.
//!
//! # Design Decisions
//! - Names are rendered Title-Case (`x-test` → `X-Test`); any non-letter,
//!   digits included, starts a new word. The header map stores them lowercase
//! - Repeated headers are joined with `", "` in arrival order
//! - Non UTF-8 values are converted lossily
//! - Keys are sorted so identical requests yield identical bodies

use std::collections::BTreeMap;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Body returned by `GET /reflect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub headers: BTreeMap<String, String>,
}

/// Collect a request's headers into a [`Reflection`].
pub fn reflect_headers(headers: &HeaderMap) -> Reflection {
    let mut reflected: BTreeMap<String, String> = BTreeMap::new();

    // HeaderMap yields a name once per value, in insertion order.
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        reflected
            .entry(canonical_name(name.as_str()))
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }

    Reflection { headers: reflected }
}

/// `content-type` → `Content-Type`, `x-1abc` → `X-1Abc`.
///
/// A letter is upper-cased when it does not follow another letter and
/// lower-cased otherwise, so digits and hyphens both start a new word.
pub fn canonical_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut after_letter = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if after_letter {
                canonical.extend(c.to_lowercase());
            } else {
                canonical.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            canonical.push(c);
            after_letter = false;
        }
    }
    canonical
}
