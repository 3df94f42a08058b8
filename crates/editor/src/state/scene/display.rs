//! Display helpers for placed objects

use super::PlacedObject;

/// Name plus short id, for logs and listings
pub fn object_label(object: &PlacedObject) -> String {
    format!("{} ({})", object.name, short_id(&object.id))
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
