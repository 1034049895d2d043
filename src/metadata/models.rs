//! The photo metadata record and its derived views.

use super::keywords::KeywordSet;
use crate::record_store::{base_filename, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SHUTTERSTOCK_HEADER: &str =
    "Filename,Description,Keywords,Categories,Editorial,Mature content,illustration";

/// Metadata for one photo, identified by the basename of its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub keywords: KeywordSet,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PhotoMetadata {
    /// Creates an empty record for `path`; `id` and `filename` are both its basename.
    pub fn new(path: &str) -> Self {
        let name = base_filename(path);
        Self {
            id: name.clone(),
            filename: name,
            keywords: KeywordSet::new(),
            title: None,
            description: None,
        }
    }

    /// Builds a record from the attribute mapping returned by the tagging
    /// API, stamping `id` and `filename` from `path` over whatever it carried.
    pub fn from_attributes(path: &str, mut attributes: Document) -> serde_json::Result<Self> {
        let name = base_filename(path);
        attributes.insert("id".to_string(), Value::String(name.clone()));
        attributes.insert("filename".to_string(), Value::String(name));
        Self::from_document(attributes)
    }

    pub fn from_document(document: Document) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(document))
    }

    pub fn append_keywords<S: AsRef<str>>(&mut self, keywords: &[S]) {
        self.keywords.extend(keywords);
    }

    pub fn remove_keywords<S: AsRef<str>>(&mut self, keywords: &[S]) {
        self.keywords.remove_all(keywords);
    }

    /// Keywords as a sorted, comma-and-space separated list.
    pub fn pexels(&self) -> String {
        self.keywords.iter().collect::<Vec<_>>().join(", ")
    }

    /// Keywords as sorted hashtags with their whitespace stripped.
    pub fn instagram(&self) -> String {
        self.keywords
            .iter()
            .map(|keyword| {
                let tag: String = keyword.chars().filter(|c| !c.is_whitespace()).collect();
                format!("#{}", tag)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One row of a stock-site upload CSV, see [`SHUTTERSTOCK_HEADER`].
    pub fn shutterstock_row(&self) -> String {
        format!(
            "{},{},\"{}\",,,no,",
            self.filename,
            self.title.as_deref().unwrap_or_default(),
            self.pexels()
        )
    }

    /// The persisted representation: `id`, `filename`, sorted `keywords`,
    /// `title`, `description`.
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert("id".to_string(), Value::String(self.id.clone()));
        document.insert("filename".to_string(), Value::String(self.filename.clone()));
        document.insert(
            "keywords".to_string(),
            Value::Array(self.keywords.iter().map(|k| Value::String(k.to_string())).collect()),
        );
        document.insert("title".to_string(), optional_string(&self.title));
        document.insert("description".to_string(), optional_string(&self.description));
        document
    }

    /// The persisted representation plus the `pexels` and `instagram` views.
    pub fn to_json_with_formats(&self) -> Value {
        let mut document = self.to_document();
        document.insert("pexels".to_string(), Value::String(self.pexels()));
        document.insert("instagram".to_string(), Value::String(self.instagram()));
        Value::Object(document)
    }
}

fn optional_string(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}
