use std::error::Error;

use picto_catalog::db::{establish_connection_pool, run_migrations};
use picto_catalog::models::config::CatalogConfig;
use picto_catalog::repository::{CategoryReader, DieselRepository, OwnerFilter, PictogramReader};

fn main() -> Result<(), Box<dyn Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CatalogConfig::load("picto-catalog")?;
    log::info!(
        "Opening catalog at {} (pictogram updates: {:?})",
        config.database_url,
        config.pictogram_update_policy
    );

    let pool = establish_connection_pool(&config.database_url)?;
    let mut conn = pool.get()?;
    let applied = run_migrations(&mut conn).map_err(|e| e as Box<dyn Error>)?;
    drop(conn);
    log::info!("{applied} pending migrations applied");

    let repo = DieselRepository::new(pool);
    let categories = repo.list_categories(OwnerFilter::General)?;
    let pictograms = repo.list_pictograms(OwnerFilter::General)?;
    log::info!(
        "General catalog holds {} categories and {} pictograms",
        categories.len(),
        pictograms.len()
    );

    Ok(())
}
