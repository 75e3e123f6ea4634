//! Source adapters: one per data file shape, all producing a [`Catalog`].

mod departments;
mod institutions;
mod sponsors;

use std::fmt;
use std::path::Path;

use serde::de::Error as _;
use serde_json::Value;

use codefinder_model::{Catalog, LoadError, Result};

use crate::loader::{Document, ResourceLocation};

pub use departments::DepartmentsAdapter;
pub use institutions::InstitutionsAdapter;
pub use sponsors::SponsorsAdapter;

/// Normalizes the documents of one data source shape.
pub trait SourceAdapter: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Resources to fetch, in the order `normalize` expects them.
    fn resources(&self) -> &[ResourceLocation];

    fn normalize(&self, documents: Vec<Document>) -> Result<Catalog>;
}

/// The supported data source shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Institution codes by country code and state.
    Institutions,
    /// Department codes by category and sub-department.
    Departments,
    /// Institution and fellowship sponsor codes by country name and state.
    Sponsors,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::Institutions, Self::Departments, Self::Sponsors];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Institutions => "institutions",
            Self::Departments => "departments",
            Self::Sponsors => "sponsors",
        }
    }

    /// Data file locations relative to a data directory.
    #[must_use]
    pub fn default_resources(self, data_dir: &Path) -> Vec<ResourceLocation> {
        let files: &[&str] = match self {
            Self::Institutions => &["codes.json"],
            Self::Departments => &["data_the_site_uses/department_codes.json"],
            Self::Sponsors => &[
                "countries.json",
                "institutions_and_fellowship_sponsors.json",
            ],
        };
        files
            .iter()
            .map(|file| ResourceLocation::from(data_dir.join(file)))
            .collect()
    }

    /// Default text of the sub-category control when nothing is selected.
    #[must_use]
    pub fn sub_category_prompt(self) -> &'static str {
        match self {
            Self::Institutions | Self::Sponsors => "Select a state…",
            Self::Departments => "Select a sub department…",
        }
    }

    #[must_use]
    pub fn category_noun(self) -> &'static str {
        match self {
            Self::Institutions | Self::Sponsors => "country",
            Self::Departments => "department",
        }
    }

    #[must_use]
    pub fn sub_category_noun(self) -> &'static str {
        match self {
            Self::Institutions | Self::Sponsors => "state",
            Self::Departments => "sub department",
        }
    }

    /// Build the adapter for this shape reading from `resources`.
    #[must_use]
    pub fn adapter(self, resources: Vec<ResourceLocation>) -> Box<dyn SourceAdapter> {
        match self {
            Self::Institutions => Box::new(InstitutionsAdapter::new(resources)),
            Self::Departments => Box::new(DepartmentsAdapter::new(resources)),
            Self::Sponsors => Box::new(SponsorsAdapter::new(resources)),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn expect_documents(documents: &[Document], expected: usize) -> Result<()> {
    if documents.len() < expected {
        return Err(LoadError::MissingDocument {
            expected,
            received: documents.len(),
        });
    }
    Ok(())
}

/// Codes are strings in the data files, but numeric codes are accepted.
fn code_text(value: Value, location: &ResourceLocation) -> Result<String> {
    match value {
        Value::String(code) => Ok(code),
        Value::Number(code) => Ok(code.to_string()),
        other => Err(LoadError::json(
            location.to_string(),
            serde_json::Error::custom(format!("expected a string or number code, found {other}")),
        )),
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match <Value as serde::Deserialize>::deserialize(deserializer)? {
        Value::String(code) => Ok(code),
        Value::Number(code) => Ok(code.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number code, found {other}"
        ))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
