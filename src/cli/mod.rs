pub mod countries;
pub mod predict;

use anyhow::Result;
use tracing::info;

use crate::catalog::PartyCatalog;
use crate::config::Config;

/// Load config, then the catalog it names. `--catalog` wins over the config file.
pub fn load_config_and_catalog(
    config_path: Option<String>,
    catalog_override: Option<String>,
) -> Result<(Config, PartyCatalog)> {
    let mut config = Config::load_with_path(config_path)?;
    if let Some(path) = catalog_override {
        info!("CLI override: catalog = {}", path);
        config.catalog.path = Some(path);
    }
    let catalog = config.catalog.load_catalog()?;
    Ok((config, catalog))
}
