//! json-api-router command line.
//!
//! Checks route configuration files (or inline JSON) without starting a
//! server, and prints the error catalog handlers can raise.
//!
//! ```text
//! json-api-router --config routes.json check
//! json-api-router --config '{"domain": {...}, "routes": [...]}' routes
//! json-api-router catalog
//! ```

use clap::{Parser, Subcommand};

use json_api_router::config::ConfigSource;
use json_api_router::http::errors;
use json_api_router::http::Envelope;
use json_api_router::observability::init_logging;
use json_api_router::routing::check;

#[derive(Parser)]
#[command(name = "json-api-router")]
#[command(about = "Validate declarative JSON API route configurations", long_about = None)]
struct Cli {
    /// Path to a routes file, or JSON text starting with '{'
    #[arg(short, long, env = "ROUTES_CONFIG", default_value = "routes.json")]
    config: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print a summary
    Check,
    /// Print the validated route table as a JSON envelope
    Routes,
    /// Print the error catalog as a JSON envelope
    Catalog,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Check => {
            let validated = check(ConfigSource::from_text(cli.config))?;
            tracing::info!(
                domain = %validated.domain,
                routes = validated.routes.len(),
                "Configuration is valid"
            );
            println!("{}: {} route(s)", validated.domain, validated.routes.len());
            for route in &validated.routes {
                println!("  {:<7} {}  ->  {}", route.method, route.pattern, route.controller);
            }
        }
        Commands::Routes => {
            let validated = check(ConfigSource::from_text(cli.config))?;
            println!("{}", Envelope::ok(&validated).to_json()?);
        }
        Commands::Catalog => {
            println!("{}", Envelope::ok(errors::entries()).to_json()?);
        }
    }

    Ok(())
}
