//! CLI entry point for the AutoFlow site

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "autoflow")]
#[command(version)]
#[command(about = "The AutoFlow marketing site: landing page, blog and workflow templates", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List the entries of a collection (blog, templates)
    List {
        #[arg(default_value = "blog")]
        collection: String,
    },

    /// Show one entry of a collection
    Show {
        /// Collection name (blog, templates)
        collection: String,

        /// Entry slug
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "autoflow_site=debug,info"
    } else {
        "autoflow_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Server { port, ip } => {
            let site = autoflow_site::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            autoflow_site::server::start(&site, &ip, port).await?;
        }

        Commands::List { collection } => {
            let site = autoflow_site::Site::new(&base_dir)?;
            autoflow_site::commands::list::run(&site, &collection).await?;
        }

        Commands::Show { collection, slug } => {
            let site = autoflow_site::Site::new(&base_dir)?;
            autoflow_site::commands::show::run(&site, &collection, &slug).await?;
        }

        Commands::Version => {
            println!("autoflow version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
