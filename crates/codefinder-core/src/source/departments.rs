//! `department_codes.json`: `{"Department Codes": {category: {sub: {name: code}}}}`.
//!
//! Object key order in the document is the display order.

use serde::Deserialize;
use serde_json::{Map, Value};

use codefinder_model::{Catalog, Category, LeafRecord, LoadError, Result, SubCategory};

use super::{SourceAdapter, SourceKind, code_text, expect_documents};
use crate::loader::{Document, ResourceLocation};

#[derive(Debug, Deserialize)]
struct DepartmentsDocument {
    #[serde(rename = "Department Codes")]
    department_codes: Map<String, Value>,
}

/// Every department has sub-departments; keys double as ids and labels.
#[derive(Debug, Clone)]
pub struct DepartmentsAdapter {
    resources: Vec<ResourceLocation>,
}

impl DepartmentsAdapter {
    pub fn new(resources: Vec<ResourceLocation>) -> Self {
        Self { resources }
    }
}

impl SourceAdapter for DepartmentsAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Departments
    }

    fn resources(&self) -> &[ResourceLocation] {
        &self.resources
    }

    fn normalize(&self, documents: Vec<Document>) -> Result<Catalog> {
        expect_documents(&documents, 1)?;
        let document = &documents[0];
        let location = &document.location;
        let parsed: DepartmentsDocument = document.parse()?;
        let as_object = |value: Value| -> Result<Map<String, Value>> {
            serde_json::from_value(value)
                .map_err(|source| LoadError::json(location.to_string(), source))
        };

        let mut categories = Vec::new();
        let mut sub_categories = Vec::new();
        let mut leaves = Vec::new();
        for (category, subs) in parsed.department_codes {
            let mut scoped = Vec::new();
            for (sub, entries) in as_object(subs)? {
                for (name, code) in as_object(entries)? {
                    leaves.push(LeafRecord {
                        name,
                        code: code_text(code, location)?,
                        category: category.clone(),
                        sub_category: Some(sub.clone()),
                    });
                }
                scoped.push(SubCategory::new(sub.clone(), sub));
            }
            sub_categories.push((category.clone(), scoped));
            categories.push(Category::new(category.clone(), category, true));
        }

        Ok(Catalog::new(categories, sub_categories, leaves))
    }
}
