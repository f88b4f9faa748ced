use serde::{Deserialize, Serialize};

/// Last-synced version cursors, one per syncable collection
///
/// Each field is non-decreasing across successful syncs: it is read before a
/// sync pass for that collection and written after, always as a whole record.
/// `0` means the collection has never been synced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeListVersions {
    #[serde(default)]
    pub topic_version: i32,
    #[serde(default)]
    pub author_version: i32,
    #[serde(default)]
    pub news_resource_version: i32,
}

/// One remote mutation since some prior version cursor
///
/// The server returns these ordered by ascending `change_list_version`; the
/// synchronizer takes the last entry's version as the new cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkChangeList {
    /// Id of the entity that changed
    pub id: String,
    /// Monotonic version at which the change happened
    pub change_list_version: i32,
    /// True if the entity was deleted server-side
    pub is_delete: bool,
}
