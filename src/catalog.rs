//! Country -> candidate party lookup.
//!
//! The catalog is an explicit value handed to the pipeline at construction
//! time. It can be the built-in table, caller-supplied entries, or a TOML
//! file of the form:
//!
//! ```toml
//! [countries]
//! India = ["Bharatiya Janata Party", "Indian National Congress"]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::PredictError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyCatalog {
    entries: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    countries: BTreeMap<String, Vec<String>>,
}

impl PartyCatalog {
    /// Build a catalog from (country, parties) pairs.
    ///
    /// Every country must have at least one party. A country listed twice
    /// keeps its last entry.
    pub fn from_entries<I, C, P>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, Vec<P>)>,
        C: Into<String>,
        P: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (country, parties) in entries {
            let country = country.into();
            if country.trim().is_empty() {
                bail!("catalog contains a blank country name");
            }
            let parties: Vec<String> = parties.into_iter().map(Into::into).collect();
            if parties.is_empty() {
                bail!("catalog entry for {:?} has no parties", country);
            }
            map.insert(country, parties);
        }
        Ok(Self { entries: map })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).context("failed to parse party catalog TOML")?;
        Self::from_entries(file.countries)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading party catalog from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read party catalog {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// The default table shipped with the binary.
    pub fn builtin() -> Self {
        let table: [(&str, &[&str]); 5] = [
            (
                "India",
                &[
                    "Bharatiya Janata Party",
                    "Indian National Congress",
                    "Aam Aadmi Party",
                ],
            ),
            ("United States", &["Democratic Party", "Republican Party"]),
            (
                "United Kingdom",
                &[
                    "Conservative Party",
                    "Labour Party",
                    "Liberal Democrats",
                    "Scottish National Party",
                ],
            ),
            (
                "Germany",
                &[
                    "Christian Democratic Union",
                    "Social Democratic Party",
                    "Alliance 90/The Greens",
                    "Free Democratic Party",
                ],
            ),
            (
                "Brazil",
                &[
                    "Workers' Party",
                    "Liberal Party",
                    "Brazilian Democratic Movement",
                ],
            ),
        ];

        let entries: BTreeMap<String, Vec<String>> = table
            .iter()
            .map(|(country, parties)| {
                (
                    country.to_string(),
                    parties.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Candidate parties for `country`, in catalog order. Exact match only.
    pub fn options_for(&self, country: &str) -> Result<&[String], PredictError> {
        self.entries
            .get(country)
            .map(Vec::as_slice)
            .ok_or_else(|| PredictError::UnknownCountry(country.to_string()))
    }

    /// Country names, sorted.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PartyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
