//! News command - browse, bookmark, and mark news resources

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use newswire_core::ports::NewsQuery;

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum NewsCommand {
    /// List news resources, newest first
    List(ListArgs),
    /// Bookmark a news resource
    Bookmark { id: String },
    /// Remove a bookmark
    Unbookmark { id: String },
    /// Mark a news resource as viewed
    View { id: String },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Restrict to resources tagged with this topic (repeatable)
    #[arg(long = "topic")]
    pub topics: Vec<String>,

    /// Only resources tagged with topics you follow
    #[arg(long, conflicts_with = "topics")]
    pub followed: bool,

    /// Only bookmarked resources
    #[arg(long)]
    pub bookmarked: bool,
}

impl NewsCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let app = App::init(config).await?;

        match self {
            NewsCommand::List(args) => {
                let user_data = app.prefs.user_data().await;

                let filter_topic_ids = if args.followed {
                    Some(user_data.followed_topic_ids.iter().cloned().collect())
                } else if !args.topics.is_empty() {
                    Some(args.topics.clone())
                } else {
                    None
                };
                let filter_news_ids = args
                    .bookmarked
                    .then(|| user_data.bookmarked_news_ids.iter().cloned().collect());

                let query = NewsQuery {
                    filter_topic_ids,
                    filter_news_ids,
                };
                let resources = app.news.get_news_resources(&query).await?;

                match format {
                    OutputFormat::Json => {
                        let items: Vec<serde_json::Value> = resources
                            .iter()
                            .map(|r| {
                                serde_json::json!({
                                    "id": r.id,
                                    "title": r.title,
                                    "type": r.resource_type.label(),
                                    "publish_date": r.publish_date.to_rfc3339(),
                                    "topics": r.topic_ids,
                                    "bookmarked": user_data.bookmarked_news_ids.contains(&r.id),
                                    "viewed": user_data.viewed_news_ids.contains(&r.id),
                                })
                            })
                            .collect();
                        formatter.print_json(&serde_json::json!({ "news_resources": items }));
                    }
                    OutputFormat::Human => {
                        if resources.is_empty() {
                            formatter.info("Nothing here. Run 'newswire sync' first.");
                        }
                        for resource in &resources {
                            let unread = if user_data.viewed_news_ids.contains(&resource.id) {
                                ' '
                            } else {
                                '*'
                            };
                            println!(
                                "{unread} {}  {:<10} {:<24} {}",
                                resource.publish_date.format("%Y-%m-%d"),
                                resource.resource_type.label(),
                                resource.id,
                                resource.title
                            );
                        }
                    }
                }
            }
            NewsCommand::Bookmark { id } => {
                app.news.set_news_bookmarked(id, true).await?;
                formatter.success(&format!("Bookmarked '{id}'"));
            }
            NewsCommand::Unbookmark { id } => {
                app.news.set_news_bookmarked(id, false).await?;
                formatter.success(&format!("Removed bookmark '{id}'"));
            }
            NewsCommand::View { id } => {
                app.news.set_news_viewed(id, true).await?;
                formatter.success(&format!("Marked '{id}' viewed"));
            }
        }

        Ok(())
    }
}
