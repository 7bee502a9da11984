//! Novenapp CLI - Tools for exercising a running server.
//!
//! # Usage
//!
//! ```bash
//! # Send a test lead
//! novenapp lead send -e a@b.com -n "Juan Pérez" -c Bogotá
//!
//! # Look up a novena
//! novenapp novena get familia-garcia-173000
//!
//! # Print the generated service worker
//! novenapp sw print
//!
//! # Generate a slug for a name
//! novenapp slug "Familia García"
//! ```
//!
//! # Commands
//!
//! - `lead send` - Post a lead to `/api/lead`
//! - `novena get` - Fetch `/api/novena/{slug}`
//! - `sw print` - Render `/sw.js` from the current environment
//! - `slug` - Generate a slug the way the creation form does
//! - `days` - List the nine days of the novena
//!
//! The server defaults to `NOVENAPP_BASE_URL`, then `http://localhost:3000`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "novenapp")]
#[command(author, version, about = "Novenapp CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit leads
    Lead {
        #[command(subcommand)]
        action: LeadAction,
    },
    /// Look up personalized novenas
    Novena {
        #[command(subcommand)]
        action: NovenaAction,
    },
    /// Inspect the service worker
    Sw {
        #[command(subcommand)]
        action: SwAction,
    },
    /// Generate a slug for a name
    Slug {
        /// Family or person name
        name: String,
    },
    /// List the nine days of the novena
    Days,
}

#[derive(Subcommand)]
enum LeadAction {
    /// Send a lead to the server
    Send {
        /// Contact email
        #[arg(short, long)]
        email: String,

        /// Family or person name
        #[arg(short, long)]
        nombre: String,

        /// City
        #[arg(short, long)]
        ciudad: String,

        /// Dedication text
        #[arg(short, long)]
        dedicatoria: Option<String>,

        /// Phone number
        #[arg(short, long)]
        telefono: Option<String>,

        /// Slug (generated from the name if omitted)
        #[arg(long)]
        slug: Option<String>,

        /// UTM source
        #[arg(long)]
        utm_source: Option<String>,

        /// Server base URL
        #[arg(long)]
        server: Option<String>,
    },
}

#[derive(Subcommand)]
enum NovenaAction {
    /// Fetch a novena by slug
    Get {
        /// Novena slug
        slug: String,

        /// Server base URL
        #[arg(long)]
        server: Option<String>,
    },
}

#[derive(Subcommand)]
enum SwAction {
    /// Print the generated service worker
    Print,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Lead { action } => match action {
            LeadAction::Send {
                email,
                nombre,
                ciudad,
                dedicatoria,
                telefono,
                slug,
                utm_source,
                server,
            } => {
                let server = commands::server_url(server.as_deref())?;
                let lead = commands::lead::build_submission(
                    email,
                    nombre,
                    ciudad,
                    dedicatoria,
                    telefono,
                    slug,
                    utm_source,
                );
                commands::lead::send(&server, &lead).await?;
            }
        },
        Commands::Novena { action } => match action {
            NovenaAction::Get { slug, server } => {
                let server = commands::server_url(server.as_deref())?;
                commands::novena::get(&server, &slug).await?;
            }
        },
        Commands::Sw { action } => match action {
            SwAction::Print => commands::worker::print()?,
        },
        Commands::Slug { name } => commands::content::slug(&name),
        Commands::Days => commands::content::days(),
    }
    Ok(())
}
