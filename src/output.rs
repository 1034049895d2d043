//! Rendering of metadata records for the command line.

use crate::metadata::{FieldAccessor, PhotoMetadata, SHUTTERSTOCK_HEADER};
use anyhow::{bail, Result};
use std::io::{self, Write};

pub const RECORD_SEPARATOR: &str = "------------------------";

/// Fields printed by `--print all`.
pub const ALL_FIELDS: [&str; 5] = ["filename", "title", "pexels", "instagram", "description"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Pretty JSON of the record plus the formatted keyword views.
    Json,
    /// The named fields, one per line, then a separator.
    Fields(Vec<String>),
    /// A stock-site CSV row per record, after a single header line.
    Shutterstock,
}

impl OutputMode {
    /// Interprets the `--print` arguments. `all` and `shutterstock` (alias
    /// `shutter`) are presets and cannot be combined with anything else.
    pub fn from_print_fields(fields: &[String]) -> Result<Self> {
        if fields.is_empty() {
            return Ok(OutputMode::Json);
        }
        if fields.iter().any(|f| f == "shutterstock" || f == "shutter") {
            if fields.len() > 1 {
                bail!("The 'shutterstock' field cannot be used with other fields.");
            }
            return Ok(OutputMode::Shutterstock);
        }
        if fields.iter().any(|f| f == "all") {
            if fields.len() > 1 {
                bail!("The 'all' field cannot be used with other fields.");
            }
            return Ok(OutputMode::Fields(
                ALL_FIELDS.iter().map(|f| f.to_string()).collect(),
            ));
        }
        Ok(OutputMode::Fields(fields.to_vec()))
    }

    pub fn header(&self) -> Option<&'static str> {
        match self {
            OutputMode::Shutterstock => Some(SHUTTERSTOCK_HEADER),
            _ => None,
        }
    }

    pub fn write_record<W: Write>(&self, out: &mut W, metadata: &PhotoMetadata) -> io::Result<()> {
        match self {
            OutputMode::Json => {
                let json = serde_json::to_string_pretty(&metadata.to_json_with_formats())?;
                writeln!(out, "{}", json)
            }
            OutputMode::Fields(fields) => {
                for name in fields {
                    match FieldAccessor::from_name(name) {
                        Some(field) => writeln!(out, "{}", field.render(metadata))?,
                        None => writeln!(out, "No such field: {}", name)?,
                    }
                }
                writeln!(out, "{}", RECORD_SEPARATOR)
            }
            OutputMode::Shutterstock => writeln!(out, "{}", metadata.shutterstock_row()),
        }
    }
}
