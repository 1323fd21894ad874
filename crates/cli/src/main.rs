use anyhow::Context;
use clap::{Parser, Subcommand};
use invsys_db::seed;
use invsys_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "invsys-cli", version, about = "Operate the InvSys server and its database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (resets and seeds first when configured)
    Serve,
    /// Drop and recreate every table without seeding
    Reset,
    /// Drop, recreate, and seed every table, then exit
    Seed,
    /// Print the effective server and database settings
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load InvSys settings")?;
    invsys_telemetry::init(&settings.telemetry).context("failed to initialize telemetry")?;

    match cli.command {
        Command::Serve => invsys_app::serve(&settings).await,
        Command::Reset => reset_database(&settings).await,
        Command::Seed => seed_database(&settings).await,
        Command::Config => {
            print_config(&settings);
            Ok(())
        }
    }
}

async fn reset_database(settings: &Settings) -> anyhow::Result<()> {
    let registry = invsys_app::build_registry()?;
    let tables = registry.collect_tables()?;
    let db = invsys_app::connect(settings).await?;

    db.reset_schema(&tables)
        .await
        .context("failed to reset database schema")?;

    tracing::info!(tables = tables.len(), "database schema reset");
    Ok(())
}

async fn seed_database(settings: &Settings) -> anyhow::Result<()> {
    let registry = invsys_app::build_registry()?;
    let tables = registry.collect_tables()?;
    let db = invsys_app::connect(settings).await?;

    db.reset_schema(&tables)
        .await
        .context("failed to reset database schema")?;
    seed::initial(db.as_ref())
        .await
        .context("failed to seed database")?;

    tracing::info!("initial data and constraints have been set up successfully");
    Ok(())
}

fn print_config(settings: &Settings) {
    println!("environment       = {:?}", settings.environment);
    println!("server.host       = {}", settings.server.host);
    println!("server.port       = {}", settings.server.port);
    println!("server.cors       = {}", settings.server.cors_origin);
    println!("database.backend  = {}", backend_name(&settings.database.url));
    println!("database.reset    = {}", settings.database.reset_on_startup);
    println!("telemetry.format  = {:?}", settings.telemetry.log_format);
}

/// Scheme of the database URL; credentials are never printed.
fn backend_name(url: &str) -> &str {
    url.split_once("://").map(|(scheme, _)| scheme).unwrap_or("unknown")
}
