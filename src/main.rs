//! CLI entry point for strapi-press

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "strapi-press")]
#[command(version)]
#[command(about = "Render Strapi CMS articles as HTML pages", long_about = None)]
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
    /// Serve pages rendered from live CMS data
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Clean the public folder
    Clean,

    /// List CMS content
    List {
        /// Type of content to list (article, author, category)
        #[arg(default_value = "article")]
        r#type: String,
    },

    /// Render blocks from a JSON file without contacting the CMS
    Render {
        /// JSON file with a block array, an article, or an API response
        input: PathBuf,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "strapi_press=debug,info"
    } else {
        "strapi_press=info"
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
        Commands::Serve { port, ip, open } => {
            let press = strapi_press::Press::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| press.config.server.ip.clone());
            let port = port.unwrap_or(press.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            strapi_press::server::start(&press, &ip, port, open).await?;
        }

        Commands::Generate => {
            let press = strapi_press::Press::new(&base_dir)?;
            tracing::info!("Generating static files from {}...", press.config.api_base());
            press.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let press = strapi_press::Press::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            press.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let press = strapi_press::Press::new(&base_dir)?;
            strapi_press::commands::list::run(&press, &r#type).await?;
        }

        Commands::Render { input, output } => {
            let press = strapi_press::Press::new(&base_dir)?;
            let input = if input.is_absolute() {
                input
            } else {
                base_dir.join(input)
            };
            strapi_press::commands::render::run(&press, &input, output.as_deref())?;
        }

        Commands::Version => {
            println!("strapi-press version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
