use serde::{Deserialize, Serialize};

/// A followable subject area that news resources are tagged with
///
/// Topics are owned by the local store and mutated only through sync-driven
/// upserts and deletes, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Stable catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description shown in lists
    pub short_description: String,
    /// Full description shown on the topic page
    pub long_description: String,
    /// Canonical URL for the topic
    pub url: String,
    /// Header image URL (may be empty)
    pub image_url: String,
}

impl Topic {
    /// A minimal placeholder row carrying only the id
    ///
    /// Used when a news resource references a topic that has not been synced
    /// yet; the real row replaces the shell on the next topic sync because
    /// shells are inserted with insert-or-ignore semantics.
    pub fn shell(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            short_description: String::new(),
            long_description: String::new(),
            url: String::new(),
            image_url: String::new(),
        }
    }
}
