//! Authors command - browse and follow authors

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum AuthorsCommand {
    /// List locally synced authors
    List,
    /// Show one author in full
    Show { id: String },
    /// Follow an author
    Follow { id: String },
    /// Unfollow an author
    Unfollow { id: String },
}

impl AuthorsCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let app = App::init(config).await?;

        match self {
            AuthorsCommand::List => {
                let authors = app.authors.get_authors().await?;
                let followed = app.prefs.user_data().await.followed_author_ids;

                match format {
                    OutputFormat::Json => {
                        let items: Vec<serde_json::Value> = authors
                            .iter()
                            .map(|a| {
                                serde_json::json!({
                                    "id": a.id,
                                    "name": a.name,
                                    "followed": followed.contains(&a.id),
                                })
                            })
                            .collect();
                        formatter.print_json(&serde_json::json!({ "authors": items }));
                    }
                    OutputFormat::Human => {
                        if authors.is_empty() {
                            formatter.info("No authors yet. Run 'newswire sync' first.");
                        }
                        for author in &authors {
                            let marker = if followed.contains(&author.id) { "*" } else { " " };
                            println!("{marker} {:<24} {}", author.id, author.name);
                        }
                    }
                }
            }
            AuthorsCommand::Show { id } => match app.authors.get_author(id).await? {
                Some(author) => match format {
                    OutputFormat::Json => {
                        formatter.print_json(&serde_json::to_value(&author)?);
                    }
                    OutputFormat::Human => {
                        println!("{} ({})", author.name, author.id);
                        if !author.bio.is_empty() {
                            println!("  {}", author.bio);
                        }
                        if !author.twitter.is_empty() {
                            println!("  {}", author.twitter);
                        }
                    }
                },
                None => {
                    formatter.error(&format!("Unknown author '{id}'"));
                    std::process::exit(1);
                }
            },
            AuthorsCommand::Follow { id } => {
                if app.authors.get_author(id).await?.is_none() {
                    formatter.error(&format!("Unknown author '{id}'. Run 'newswire sync' first."));
                    std::process::exit(1);
                }
                app.authors.set_author_followed(id, true).await?;
                formatter.success(&format!("Following author '{id}'"));
            }
            AuthorsCommand::Unfollow { id } => {
                app.authors.set_author_followed(id, false).await?;
                formatter.success(&format!("Unfollowed author '{id}'"));
            }
        }

        Ok(())
    }
}
