//! Status command - show sync cursors and local catalog counts

use std::path::Path;

use anyhow::Result;
use clap::Args;

use newswire_core::ports::NewsQuery;
use newswire_core::sync::Synchronizer;

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let app = App::init(config).await?;

        let versions = app.prefs.change_list_versions().await?;
        let user_data = app.prefs.user_data().await;

        let topic_count = app.topics.get_topics().await?.len();
        let author_count = app.authors.get_authors().await?.len();
        let news_count = app
            .news
            .get_news_resources(&NewsQuery::default())
            .await?
            .len();

        match format {
            OutputFormat::Json => {
                formatter.print_json(&serde_json::json!({
                    "cursors": {
                        "topics": versions.topic_version,
                        "authors": versions.author_version,
                        "news_resources": versions.news_resource_version,
                    },
                    "catalog": {
                        "topics": topic_count,
                        "authors": author_count,
                        "news_resources": news_count,
                    },
                    "user": {
                        "followed_topics": user_data.followed_topic_ids.len(),
                        "followed_authors": user_data.followed_author_ids.len(),
                        "bookmarks": user_data.bookmarked_news_ids.len(),
                        "onboarded": user_data.has_onboarded(),
                    },
                }));
            }
            OutputFormat::Human => {
                println!("Sync cursors");
                println!("  topics:          {}", versions.topic_version);
                println!("  authors:         {}", versions.author_version);
                println!("  news resources:  {}", versions.news_resource_version);
                println!("Local catalog");
                println!("  topics:          {topic_count}");
                println!("  authors:         {author_count}");
                println!("  news resources:  {news_count}");
                println!("You");
                println!(
                    "  following {} topics, {} authors; {} bookmarks",
                    user_data.followed_topic_ids.len(),
                    user_data.followed_author_ids.len(),
                    user_data.bookmarked_news_ids.len()
                );
                if !user_data.has_onboarded() {
                    formatter.info("Follow a topic or author to personalize your feed");
                }
            }
        }

        Ok(())
    }
}
