use serde::{Deserialize, Serialize};

/// An author of news resources
///
/// Owned by the local store; created and updated exclusively through
/// sync-driven upserts keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar image URL (may be empty)
    pub image_url: String,
    /// Twitter handle or URL (may be empty)
    pub twitter: String,
    /// Medium page URL (may be empty)
    pub medium_page: String,
    /// Short biography
    pub bio: String,
}

impl Author {
    /// A minimal placeholder row carrying only the id
    ///
    /// Same role as [`Topic::shell`](super::Topic::shell): satisfies foreign
    /// key references from news resources ahead of the author sync pass.
    pub fn shell(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            image_url: String::new(),
            twitter: String::new(),
            medium_page: String::new(),
            bio: String::new(),
        }
    }
}
