//! CLI entry point for nlob

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nlob")]
#[command(version = "0.1.0")]
#[command(about = "A markdown blog front end rendering posts from a remote repository", long_about = None)]
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
    /// Serve the list and post pages, rendered on request
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Render a page once and print it
    Render {
        #[command(subcommand)]
        page: RenderPage,
    },

    /// Rebuild blogs/index.json from the local markdown files
    Index,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Comma separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum RenderPage {
    /// The post list
    List,

    /// A single post
    Post {
        /// Post id as listed in the manifest
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug { "nlob=debug,info" } else { "nlob=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip, open } => {
            let nlob = nlob::Nlob::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            nlob::server::start(&nlob, &ip, port, open).await?;
        }

        Commands::Render { page } => {
            let nlob = nlob::Nlob::new(&base_dir)?;
            let html = match page {
                RenderPage::List => nlob::commands::render::list(&nlob).await?,
                RenderPage::Post { id } => nlob::commands::render::post(&nlob, &id).await?,
            };
            println!("{}", html);
        }

        Commands::Index => {
            let nlob = nlob::Nlob::new(&base_dir)?;
            tracing::info!("Indexing {:?}", nlob.blogs_dir);
            let path = nlob.build_index()?;
            println!("Wrote {:?}", path);
        }

        Commands::New { title, tags } => {
            let nlob = nlob::Nlob::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = nlob.new_post(&title, &tags)?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("nlob version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
