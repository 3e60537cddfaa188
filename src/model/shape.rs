use serde_json::{Map, Value};

const LOG_TARGET: &str = "     shape";

/// Maximum number of nested list layers `normalize` will unwrap before
/// giving up on a value.
pub const MAX_UNWRAP_DEPTH: usize = 8;

/// Collapse arbitrarily nested single-element list wrappers into a JSON
/// object, or signal "no element".
///
/// The store sometimes encodes a singleton result as `{...}`, sometimes as
/// `[{...}]`, and occasionally as `[[{...}]]`. This repeatedly takes the
/// first entry of a list, up to [`MAX_UNWRAP_DEPTH`] layers. An empty list,
/// an exhausted depth bound, or a terminal value that is not an object all
/// yield `None`.
///
/// Idempotent: feeding the returned object back in returns it unchanged.
#[must_use]
pub fn normalize(value: Value) -> Option<Map<String, Value>> {
    let mut value = value;
    let mut remaining = MAX_UNWRAP_DEPTH;

    while let Value::Array(mut items) = value {
        if items.is_empty() {
            log::debug!(target: LOG_TARGET, "cannot normalize an empty list");
            return None;
        }

        if remaining == 0 {
            log::warn!(target: LOG_TARGET, "giving up unwrapping after {MAX_UNWRAP_DEPTH} nested list layers");
            return None;
        }

        remaining -= 1;
        value = items.swap_remove(0);
    }

    match value {
        Value::Object(map) => Some(map),
        other => {
            log::debug!(target: LOG_TARGET, "cannot normalize non-object value: {other}");
            None
        }
    }
}
