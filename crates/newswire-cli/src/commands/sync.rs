//! Sync command - pull remote catalog changes into the local store

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tokio_util::sync::CancellationToken;

use newswire_core::sync::Synchronizer;

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Keep running, syncing on the configured interval until interrupted
    #[arg(long)]
    pub watch: bool,
}

impl SyncCommand {
    pub async fn execute(&self, config: Option<&Path>, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let app = App::init(config).await?;

        if self.watch {
            formatter.info(&format!(
                "Syncing every {}s, press Ctrl-C to stop",
                app.config.sync.poll_interval_secs
            ));

            let cancel = CancellationToken::new();
            let cancel_on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel_on_signal.cancel();
                }
            });

            app.engine.run(app.poll_interval(), cancel).await;
            formatter.success("Sync loop stopped");
            return Ok(());
        }

        if app.engine.sync_once().await {
            let versions = app.prefs.change_list_versions().await?;
            formatter.success("Catalog is up to date");
            formatter.print_json(&serde_json::json!({
                "success": true,
                "topic_version": versions.topic_version,
                "author_version": versions.author_version,
                "news_resource_version": versions.news_resource_version,
            }));
        } else {
            formatter.error("Sync failed for one or more collections; will retry next run");
            std::process::exit(1);
        }

        Ok(())
    }
}
