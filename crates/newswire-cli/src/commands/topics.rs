//! Topics command - browse and follow topics

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum TopicsCommand {
    /// List locally synced topics
    List,
    /// Show one topic in full
    Show { id: String },
    /// Follow a topic
    Follow { id: String },
    /// Unfollow a topic
    Unfollow { id: String },
}

impl TopicsCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let app = App::init(config).await?;

        match self {
            TopicsCommand::List => {
                let topics = app.topics.get_topics().await?;
                let followed = app.prefs.user_data().await.followed_topic_ids;

                match format {
                    OutputFormat::Json => {
                        let items: Vec<serde_json::Value> = topics
                            .iter()
                            .map(|t| {
                                serde_json::json!({
                                    "id": t.id,
                                    "name": t.name,
                                    "followed": followed.contains(&t.id),
                                })
                            })
                            .collect();
                        formatter.print_json(&serde_json::json!({ "topics": items }));
                    }
                    OutputFormat::Human => {
                        if topics.is_empty() {
                            formatter.info("No topics yet. Run 'newswire sync' first.");
                        }
                        for topic in &topics {
                            let marker = if followed.contains(&topic.id) { "*" } else { " " };
                            println!("{marker} {:<24} {}", topic.id, topic.name);
                        }
                    }
                }
            }
            TopicsCommand::Show { id } => match app.topics.get_topic(id).await? {
                Some(topic) => match format {
                    OutputFormat::Json => {
                        formatter.print_json(&serde_json::to_value(&topic)?);
                    }
                    OutputFormat::Human => {
                        println!("{} ({})", topic.name, topic.id);
                        if !topic.short_description.is_empty() {
                            println!("  {}", topic.short_description);
                        }
                        if !topic.url.is_empty() {
                            println!("  {}", topic.url);
                        }
                    }
                },
                None => {
                    formatter.error(&format!("Unknown topic '{id}'"));
                    std::process::exit(1);
                }
            },
            TopicsCommand::Follow { id } => {
                if app.topics.get_topic(id).await?.is_none() {
                    formatter.error(&format!("Unknown topic '{id}'. Run 'newswire sync' first."));
                    std::process::exit(1);
                }
                app.topics.set_topic_followed(id, true).await?;
                formatter.success(&format!("Following topic '{id}'"));
            }
            TopicsCommand::Unfollow { id } => {
                app.topics.set_topic_followed(id, false).await?;
                formatter.success(&format!("Unfollowed topic '{id}'"));
            }
        }

        Ok(())
    }
}
