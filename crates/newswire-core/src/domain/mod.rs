//! Domain entities for the Newswire data layer
//!
//! These are the externally visible models of the system: the content
//! catalog (`Topic`, `Author`, `NewsResource`), per-user state (`UserData`),
//! and the sync bookkeeping types (`ChangeListVersions`, `NetworkChangeList`).
//! All of them are plain serde-friendly structs owned by the adapter that
//! persists them; none carry behavior beyond simple accessors.

mod author;
mod change_list;
mod news_resource;
mod topic;
mod user_data;

pub use author::Author;
pub use change_list::{ChangeListVersions, NetworkChangeList};
pub use news_resource::{NewsResource, NewsResourceType};
pub use topic::Topic;
pub use user_data::UserData;
