//! Database maintenance and reporting commands.

use cafemap_core::{AppConfig, Category};
use cafemap_db::{DocumentStore, PgDocumentStore};
use clap::Subcommand;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = cafemap_db::connect_pool_from_config(config).await?;
    match command {
        DbCommands::Ping => {
            cafemap_db::ping(&pool).await?;
            println!("database connection ok");
        }
        DbCommands::Migrate => {
            let applied = cafemap_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }
    Ok(())
}

/// Prints the number of stored records per category.
pub(crate) async fn run_stats(config: &AppConfig) -> anyhow::Result<()> {
    let pool = cafemap_db::connect_pool_from_config(config).await?;
    let store = PgDocumentStore::new(pool);

    let mut total = 0_u64;
    for category in Category::ALL {
        let count = store.count_under(category.as_str()).await?;
        total += count;
        println!("{category:<14} {count:>6}");
    }
    println!("{:<14} {total:>6}", "total");
    Ok(())
}
