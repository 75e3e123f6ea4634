//! `codes.json`: institution codes keyed by country code and state code.

use std::collections::HashMap;

use serde::Deserialize;

use codefinder_model::{Catalog, Category, LeafRecord, Result, SubCategory};

use super::{SourceAdapter, SourceKind, deserialize_code, expect_documents, non_empty};
use crate::loader::{Document, ResourceLocation};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodesDocument {
    countries: Vec<CountryEntry>,
    #[serde(default)]
    regions_by_country: HashMap<String, Vec<RegionEntry>>,
    #[serde(default)]
    institutions: Vec<InstitutionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryEntry {
    code: String,
    name: String,
    #[serde(default)]
    has_states: bool,
}

#[derive(Debug, Deserialize)]
struct RegionEntry {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct InstitutionEntry {
    country: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(deserialize_with = "deserialize_code")]
    code: String,
    name: String,
}

/// Matches records by country code.
#[derive(Debug, Clone)]
pub struct InstitutionsAdapter {
    resources: Vec<ResourceLocation>,
}

impl InstitutionsAdapter {
    pub fn new(resources: Vec<ResourceLocation>) -> Self {
        Self { resources }
    }
}

impl SourceAdapter for InstitutionsAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Institutions
    }

    fn resources(&self) -> &[ResourceLocation] {
        &self.resources
    }

    fn normalize(&self, documents: Vec<Document>) -> Result<Catalog> {
        expect_documents(&documents, 1)?;
        let CodesDocument {
            countries,
            mut regions_by_country,
            institutions,
        } = documents[0].parse()?;

        let mut sub_categories = Vec::new();
        let categories = countries
            .into_iter()
            .map(|country| {
                if country.has_states {
                    let regions = regions_by_country
                        .remove(&country.code)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|region| SubCategory::new(region.code, region.name))
                        .collect();
                    sub_categories.push((country.code.clone(), regions));
                }
                Category::new(country.code, country.name, country.has_states)
            })
            .collect();

        let leaves = institutions
            .into_iter()
            .map(|entry| LeafRecord {
                name: entry.name,
                code: entry.code,
                category: entry.country,
                sub_category: non_empty(entry.region),
            })
            .collect();

        Ok(Catalog::new(categories, sub_categories, leaves))
    }
}
