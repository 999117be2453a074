use anyhow::Result;

use super::load_config_and_catalog;
use crate::catalog::PartyCatalog;

/// One line per country: `Country: Party A, Party B`
pub fn render(catalog: &PartyCatalog) -> String {
    catalog
        .countries()
        .map(|country| {
            let parties = catalog
                .options_for(country)
                .map(|p| p.join(", "))
                .unwrap_or_default();
            format!("{}: {}\n", country, parties)
        })
        .collect()
}

pub fn run(config_path: Option<String>, catalog_path: Option<String>) -> Result<()> {
    let (_, catalog) = load_config_and_catalog(config_path, catalog_path)?;
    print!("{}", render(&catalog));
    Ok(())
}
