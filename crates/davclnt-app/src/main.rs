use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use davclnt_client::{ClientConfig, DavClient, Depth, PropfindRequest};
use davclnt_core::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Command-line `WebDAV` client.
///
/// Connection settings come from `DAV_*` environment variables, a `.env`
/// file, or `config.toml` in the working directory.
#[derive(Debug, Parser)]
#[command(name = "davclnt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch named properties of a resource and its children.
    Props {
        path: String,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Fetch all properties of a resource and its children.
    Allprops { path: String },
    /// List property names of a resource and its children.
    Propnames { path: String },
    /// Run a raw PROPFIND and print the decoded responses in server order.
    Query {
        path: String,
        #[arg(long, default_value = "1")]
        depth: Depth,
        /// Property to request; all properties when omitted.
        #[arg(long = "prop")]
        props: Vec<String>,
    },
    /// Print whether a resource exists.
    Exists { path: String },
    /// Download a resource to stdout.
    Get { path: String },
    /// Upload a local file.
    Put { path: String, file: PathBuf },
    /// Delete a resource.
    Delete { path: String },
    /// Create a collection.
    Mkcol { path: String },
    /// Copy a resource.
    Copy { path: String, destination: String },
    /// Move a resource.
    Move { path: String, destination: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter_layer, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new("info")));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = load_config().context("loading configuration")?;

    // RUST_LOG wins over the configured level.
    if !from_env {
        match EnvFilter::try_new(&settings.log_level) {
            Ok(filter) => {
                if let Err(e) = filter_handle.modify(|current| *current = filter) {
                    tracing::warn!(error = %e, "Failed to update log filter from config");
                }
            }
            Err(_) => {
                tracing::warn!(level = %settings.log_level, "Invalid log level in config, keeping info");
            }
        }
    }

    tracing::info!("Configuration loaded: {}", settings);

    let client = DavClient::new(ClientConfig::from(&settings))?;

    run(&client, cli.command).await
}

async fn run(client: &DavClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Props { path, names } => {
            print_json(&client.prop_find(&path, names).await?)?;
        }
        Command::Allprops { path } => {
            print_json(&client.all_prop_find(&path).await?)?;
        }
        Command::Propnames { path } => {
            print_json(&client.prop_name_find(&path).await?)?;
        }
        Command::Query { path, depth, props } => {
            let request = if props.is_empty() {
                PropfindRequest::allprop()
            } else {
                PropfindRequest::prop(props)
            };
            print_json(&client.query(&path, &request.with_depth(depth)).await?)?;
        }
        Command::Exists { path } => {
            println!("{}", client.exists(&path).await?);
        }
        Command::Get { path } => {
            let body = client.get(&path).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&body)?;
            stdout.flush()?;
        }
        Command::Put { path, file } => {
            let body = tokio::fs::read(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            client.put(&path, body).await?;
        }
        Command::Delete { path } => client.delete(&path).await?,
        Command::Mkcol { path } => client.mkcol(&path).await?,
        Command::Copy { path, destination } => client.copy(&path, &destination).await?,
        Command::Move { path, destination } => client.move_to(&path, &destination).await?,
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
