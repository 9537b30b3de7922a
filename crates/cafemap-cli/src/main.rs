mod db;
mod expand;

use cafemap_core::Category;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;
use crate::expand::ExpandArgs;

#[derive(Debug, Parser)]
#[command(name = "cafemap")]
#[command(about = "Expands the café dataset from Google Maps search results")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every configured region and write qualifying cafés
    Expand {
        /// Only process districts of this city (e.g., 台北市)
        #[arg(long)]
        city: Option<String>,
        /// Only process this district; requires --city
        #[arg(long, requires = "city")]
        district: Option<String>,
        /// Category to populate; repeat for several (defaults to all)
        #[arg(long = "category")]
        categories: Vec<Category>,
        /// Run against an in-memory store instead of the database
        #[arg(long)]
        dry_run: bool,
    },
    /// List the configured (city, district) regions
    Regions,
    /// Database management
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Show stored record counts per category
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = cafemap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Expand {
            city,
            district,
            categories,
            dry_run,
        }) => {
            let args = ExpandArgs {
                city,
                district,
                categories,
                dry_run,
            };
            expand::run_expand(&config, args).await?;
        }
        None => expand::run_expand(&config, ExpandArgs::default()).await?,
        Some(Commands::Regions) => {
            let regions = cafemap_core::load_regions(&config.regions_path)?;
            for city in &regions.cities {
                println!("{} ({} districts)", city.name, city.districts.len());
                for district in &city.districts {
                    println!("  {district}");
                }
            }
        }
        Some(Commands::Db { command }) => db::run_db(&config, command).await?,
        Some(Commands::Stats) => db::run_stats(&config).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
