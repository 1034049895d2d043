//! Named field accessors used by the presentation layer.

use super::models::PhotoMetadata;

/// A printable field of [`PhotoMetadata`], looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccessor {
    Id,
    Filename,
    Title,
    Description,
    Keywords,
    Pexels,
    Instagram,
}

impl FieldAccessor {
    pub const ALL: [FieldAccessor; 7] = [
        FieldAccessor::Id,
        FieldAccessor::Filename,
        FieldAccessor::Title,
        FieldAccessor::Description,
        FieldAccessor::Keywords,
        FieldAccessor::Pexels,
        FieldAccessor::Instagram,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldAccessor::Id => "id",
            FieldAccessor::Filename => "filename",
            FieldAccessor::Title => "title",
            FieldAccessor::Description => "description",
            FieldAccessor::Keywords => "keywords",
            FieldAccessor::Pexels => "pexels",
            FieldAccessor::Instagram => "instagram",
        }
    }

    /// `None` for names that are not fields.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Absent optional values render as the empty string.
    pub fn render(&self, metadata: &PhotoMetadata) -> String {
        match self {
            FieldAccessor::Id => metadata.id.clone(),
            FieldAccessor::Filename => metadata.filename.clone(),
            FieldAccessor::Title => metadata.title.clone().unwrap_or_default(),
            FieldAccessor::Description => metadata.description.clone().unwrap_or_default(),
            FieldAccessor::Keywords => format!("{:?}", metadata.keywords.to_vec()),
            FieldAccessor::Pexels => metadata.pexels(),
            FieldAccessor::Instagram => metadata.instagram(),
        }
    }
}
