// src/models/mod.rs

pub mod banner;
pub mod question;
pub mod section;
pub mod voucher;

use serde::de::DeserializeOwned;

/// A record listed by a collection screen.
pub trait Entity: Clone + Send + Sync + DeserializeOwned + 'static {
    /// Backend identifier; `None` for records not yet saved.
    fn id(&self) -> Option<&str>;

    /// Display label.
    fn title(&self) -> &str;

    /// Text the search box matches against.
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title()]
    }
}

/// Case-insensitive substring match of `query` against the entity's search fields.
/// An empty (or blank) query matches everything.
pub fn matches_query<E: Entity>(entity: &E, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    entity
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
