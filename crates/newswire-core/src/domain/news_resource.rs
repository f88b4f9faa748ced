use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of content a news resource points at
///
/// Unrecognized wire values deserialize to `Unknown` rather than failing the
/// whole sync batch, so a server-side addition of a new type degrades
/// gracefully on old clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NewsResourceType {
    Video,
    Article,
    #[serde(rename = "API change")]
    ApiChange,
    Codelab,
    #[serde(rename = "DAC")]
    Dac,
    Event,
    #[default]
    #[serde(other)]
    Unknown,
}

impl NewsResourceType {
    /// Human-readable label for CLI output
    pub fn label(&self) -> &'static str {
        match self {
            NewsResourceType::Video => "Video",
            NewsResourceType::Article => "Article",
            NewsResourceType::ApiChange => "API change",
            NewsResourceType::Codelab => "Codelab",
            NewsResourceType::Dac => "DAC",
            NewsResourceType::Event => "Event",
            NewsResourceType::Unknown => "Unknown",
        }
    }
}

/// A single piece of content in the catalog: an article, video, codelab, etc.
///
/// `topic_ids` and `author_ids` are the cross-reference sets maintained by the
/// local store; the referenced rows may initially be shells until their own
/// collections sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResource {
    /// Stable catalog identifier
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    /// Header image URL; absent for text-only resources
    pub header_image_url: Option<String>,
    pub publish_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub resource_type: NewsResourceType,
    /// Ids of topics this resource is tagged with
    pub topic_ids: Vec<String>,
    /// Ids of this resource's authors
    pub author_ids: Vec<String>,
}
