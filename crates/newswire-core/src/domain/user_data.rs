use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-user state owned by the preferences store
///
/// Sets use `BTreeSet` so serialized snapshots are stable, which keeps the
/// preferences file diff-friendly and test assertions order-independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub followed_topic_ids: BTreeSet<String>,
    #[serde(default)]
    pub followed_author_ids: BTreeSet<String>,
    #[serde(default)]
    pub bookmarked_news_ids: BTreeSet<String>,
    #[serde(default)]
    pub viewed_news_ids: BTreeSet<String>,
}

impl UserData {
    /// True once the user follows at least one topic or author
    ///
    /// Drives the first-run onboarding behavior: sync only raises "new
    /// content" state for followed interests after onboarding is done.
    pub fn has_onboarded(&self) -> bool {
        !self.followed_topic_ids.is_empty() || !self.followed_author_ids.is_empty()
    }
}
