//! Institution and fellowship sponsor codes, keyed by country *name*.
//!
//! Two documents are required: a country list and the sponsor list. The
//! sponsor entries carry no country code, so the country name is the
//! matching key. States are derived from the sponsor entries themselves.

use std::collections::HashMap;

use serde::Deserialize;

use codefinder_model::{Catalog, Category, LeafRecord, Result, SubCategory};

use super::{SourceAdapter, SourceKind, deserialize_code, expect_documents, non_empty};
use crate::loader::{Document, ResourceLocation};

#[derive(Debug, Deserialize)]
struct CountriesDocument {
    countries: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryEntry {
    name: String,
    #[serde(default)]
    has_states: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SponsorsDocument {
    institutions_and_fellowship_sponsors: Vec<SponsorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SponsorEntry {
    country: String,
    #[serde(default)]
    state: Option<String>,
    name: String,
    #[serde(deserialize_with = "deserialize_code")]
    code: String,
}

#[derive(Debug, Clone)]
pub struct SponsorsAdapter {
    resources: Vec<ResourceLocation>,
}

impl SponsorsAdapter {
    /// `resources` must list the country document first.
    pub fn new(resources: Vec<ResourceLocation>) -> Self {
        Self { resources }
    }
}

impl SourceAdapter for SponsorsAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Sponsors
    }

    fn resources(&self) -> &[ResourceLocation] {
        &self.resources
    }

    fn normalize(&self, documents: Vec<Document>) -> Result<Catalog> {
        expect_documents(&documents, 2)?;
        let countries: CountriesDocument = documents[0].parse()?;
        let sponsors: SponsorsDocument = documents[1].parse()?;

        let mut states: HashMap<String, Vec<SubCategory>> = HashMap::new();
        let leaves: Vec<LeafRecord> = sponsors
            .institutions_and_fellowship_sponsors
            .into_iter()
            .map(|entry| {
                let state = non_empty(entry.state);
                if let Some(state) = &state {
                    let seen = states.entry(entry.country.clone()).or_default();
                    if !seen.iter().any(|known| &known.id == state) {
                        seen.push(SubCategory::new(state.clone(), state.clone()));
                    }
                }
                LeafRecord {
                    name: entry.name,
                    code: entry.code,
                    category: entry.country,
                    sub_category: state,
                }
            })
            .collect();

        let mut sub_categories = Vec::new();
        let categories = countries
            .countries
            .into_iter()
            .map(|country| {
                let derived = states.remove(&country.name).unwrap_or_default();
                let has_children = country.has_states.unwrap_or(!derived.is_empty());
                if has_children {
                    sub_categories.push((country.name.clone(), derived));
                }
                Category::new(country.name.clone(), country.name, has_children)
            })
            .collect();

        Ok(Catalog::new(categories, sub_categories, leaves))
    }
}

#[cfg(test)]
mod tests {
    use codefinder_model::{CodeCatalog, LoadError};

    use super::*;

    const COUNTRIES: &str = r#"{ "countries": [
        { "name": "United States" },
        { "name": "Germany" },
        { "name": "Japan", "hasStates": false }
    ] }"#;

    const SPONSORS: &str = r#"{ "institutions_and_fellowship_sponsors": [
        { "Country": "United States", "State": "Ohio", "Name": "Ohio State U", "Code": "1592" },
        { "Country": "Germany", "Name": "DAAD", "Code": "9901" },
        { "Country": "United States", "State": "Texas", "Name": "Rice U", "Code": "6609" },
        { "Country": "United States", "State": "Ohio", "Name": "Oberlin College", "Code": 1587 },
        { "Country": "Japan", "State": "Tokyo", "Name": "U of Tokyo", "Code": "0845" }
    ] }"#;

    fn adapter() -> SponsorsAdapter {
        SponsorsAdapter::new(vec![
            "countries.json".parse().unwrap(),
            "institutions_and_fellowship_sponsors.json".parse().unwrap(),
        ])
    }

    fn documents(countries: &str, sponsors: &str) -> Vec<Document> {
        let adapter = adapter();
        vec![
            Document::new(adapter.resources()[0].clone(), countries),
            Document::new(adapter.resources()[1].clone(), sponsors),
        ]
    }

    #[test]
    fn derives_states_in_first_seen_order() {
        let catalog = adapter().normalize(documents(COUNTRIES, SPONSORS)).unwrap();
        let states: Vec<&str> = catalog
            .list_sub_categories("United States")
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(states, vec!["Ohio", "Texas"]);
        assert!(catalog.category("United States").is_some_and(|c| c.has_children));
        assert!(catalog.category("Germany").is_some_and(|c| !c.has_children));
    }

    #[test]
    fn explicit_flag_overrides_derived_states() {
        let catalog = adapter().normalize(documents(COUNTRIES, SPONSORS)).unwrap();
        assert!(catalog.category("Japan").is_some_and(|c| !c.has_children));
        assert!(catalog.list_sub_categories("Japan").is_empty());
    }

    #[test]
    fn requires_both_documents() {
        let mut docs = documents(COUNTRIES, SPONSORS);
        docs.pop();
        let error = adapter().normalize(docs).unwrap_err();
        assert!(matches!(
            error,
            LoadError::MissingDocument {
                expected: 2,
                received: 1
            }
        ));
    }
}
