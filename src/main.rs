//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "Jeevan KC")]
#[command(version)]
#[command(about = "Personal portfolio and blog site backed by a content API", long_about = None)]
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
    /// Clean raw blog content into Markdown
    Normalize {
        /// File to read (defaults to stdin)
        file: Option<PathBuf>,

        /// Only strip tags and decode entities, skip the paragraph pass
        #[arg(long)]
        strip_only: bool,
    },

    /// Render a blog JSON document to an HTML page
    Render {
        /// Blog JSON, bare or wrapped in `{"data": ...}`
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate static files from the content API
    #[command(alias = "g")]
    Generate,

    /// Start the site server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List content served by the API
    List {
        /// Type of content to list (blog, project)
        #[arg(default_value = "blog")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Normalize { file, strip_only } => {
            let file = file.map(|f| base_dir.join(f));
            let cleaned = folio::commands::normalize::run(file.as_deref(), strip_only)?;
            println!("{}", cleaned);
        }

        Commands::Render { input, output } => {
            let site = folio::Folio::new(&base_dir)?;
            let input = base_dir.join(input);
            let output = output.map(|o| base_dir.join(o));
            if let Some(html) = folio::commands::render::run(&site, &input, output.as_deref())? {
                println!("{}", html);
            }
        }

        Commands::Generate => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            let written = site.generate().await?;
            println!("Generated {} files successfully!", written);
        }

        Commands::Server { port, ip, open } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port, open).await?;
        }

        Commands::List { r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &r#type).await?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
