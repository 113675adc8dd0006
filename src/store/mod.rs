//! In-memory gallery store.
//!
//! The store lives only as long as the process; state resets on restart.

pub mod fixtures;
pub mod query;
mod repository;

pub use repository::*;

use crate::config::Config;
use crate::errors::AppError;

/// Build the store for a server run, seeding the sample gallery when configured.
pub fn init_store(config: &Config) -> Result<Repository, AppError> {
    if !config.seed_fixtures {
        tracing::info!("Starting with an empty gallery");
        return Ok(Repository::new());
    }

    let seed = fixtures::sample_gallery()?;
    let repo = Repository::from_seed(seed);
    tracing::info!(
        images = repo.images().len(),
        categories = repo.categories().len(),
        tags = repo.tags().len(),
        "Seeded sample gallery"
    );
    Ok(repo)
}
