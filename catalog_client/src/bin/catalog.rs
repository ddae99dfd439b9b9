use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_client::{CatalogClient, ItemMetadata, ItemPublisher, PublishError};
use catalog_logging::{LoggingConfig, init_logging};
use clap::{Args, Parser, Subcommand};
use config::CatalogConfig;
use indicatif::{ProgressBar, ProgressStyle};
use progress_tracking::BatchProgressUpdate;
use upload_client::{FileHandle, RemoteTransport};

#[derive(Parser)]
#[clap(version, about = "List and create catalog items")]
struct CatalogCommand {
    #[clap(flatten)]
    overrides: CliOverrides,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CliOverrides {
    /// Base URL items are listed from.
    #[clap(long)]
    catalog_endpoint: Option<String>, // if not specified we use env:CATALOG_CATALOG_ENDPOINT
    /// Base URL files and new items are posted to.
    #[clap(long)]
    storage_endpoint: Option<String>, // if not specified we use env:CATALOG_UPLOAD_STORAGE_ENDPOINT
}

impl CatalogCommand {
    async fn run(self) -> Result<()> {
        let mut config = CatalogConfig::new();
        if let Some(endpoint) = self.overrides.catalog_endpoint {
            config = config.with_catalog_endpoint(endpoint);
        }
        if let Some(endpoint) = self.overrides.storage_endpoint {
            config = config.with_storage_endpoint(endpoint);
        }

        init_logging(LoggingConfig::from_config(&config, env!("CARGO_PKG_VERSION")));

        self.command.run(&config).await
    }
}

#[derive(Subcommand)]
enum Command {
    /// Prints every item of the catalog.
    List(ListArg),
    /// Uploads files and creates an item referencing them.
    Create(CreateArg),
}

#[derive(Args)]
struct ListArg {
    /// Print the items as JSON instead of a listing.
    #[clap(long)]
    json: bool,
}

#[derive(Args)]
struct CreateArg {
    #[clap(long)]
    title: String,
    #[clap(long)]
    price: f64,
    #[clap(long, default_value = "")]
    description: String,
    #[clap(long, default_value = "")]
    category: String,
    /// Files to attach, in order. The first one is the primary image.
    #[clap(long = "file", required = true)]
    files: Vec<PathBuf>,
}

impl Command {
    async fn run(self, config: &CatalogConfig) -> Result<()> {
        let client = CatalogClient::new(config)?;

        match self {
            Command::List(arg) => {
                let items = client.list_items().await?;

                if arg.json {
                    println!("{}", serde_json::to_string_pretty(&items)?);
                    return Ok(());
                }

                for item in &items {
                    println!("{:>5}  {:<40}  {:>10.2}  {}", item.id, item.title, item.price, item.category);
                }
                eprintln!("{} items", items.len());
            },
            Command::Create(arg) => {
                let mut files = Vec::with_capacity(arg.files.len());
                for path in &arg.files {
                    files.push(FileHandle::from_path(path).await.with_context(|| format!("cannot upload {path:?}"))?);
                }

                let metadata = ItemMetadata {
                    title: arg.title,
                    price: arg.price,
                    description: arg.description,
                    category: arg.category,
                };

                let transport = RemoteTransport::with_client(client.http_client().clone(), config)?;
                let publisher = ItemPublisher::new(Arc::new(transport), Arc::new(client));

                let bar = ProgressBar::new(100);
                bar.set_style(ProgressStyle::with_template("{spinner} [{bar:40}] {pos:>3}% {msg}")?.progress_chars("=> "));
                let on_progress = {
                    let bar = bar.clone();
                    move |update: &BatchProgressUpdate| {
                        bar.set_position(update.percent as u64);
                        if let Some(item) = &update.item {
                            bar.set_message(format!("{}: {} of {} bytes", item.item_name, item.bytes_sent, item.bytes_total));
                        }
                    }
                };

                let result = publisher.publish(files, &metadata, &on_progress).await;
                bar.finish_and_clear();

                match result {
                    Ok(item) => {
                        println!("Created item {} ({})", item.id, item.title);
                        for locator in item.image_locators() {
                            println!("  {locator}");
                        }
                    },
                    Err(e) => {
                        report_publish_error(&e);
                        return Err(e.into());
                    },
                }
            },
        }

        Ok(())
    }
}

fn report_publish_error(e: &PublishError) {
    if let PublishError::Upload(failure) = e {
        for failed in &failure.failed {
            eprintln!("  failed   #{} {}: {}", failed.index, failed.name, failed.reason);
        }
    }

    let orphaned = e.orphaned_locators();
    if !orphaned.is_empty() {
        eprintln!("Stored files not referenced by any item:");
        for locator in orphaned {
            eprintln!("  {locator}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CatalogCommand::parse().run().await
}
