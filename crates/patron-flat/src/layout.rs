//! Layout tables.
//!
//! A layout describes everything the writer needs: which fields appear,
//! in what order, under what tag or width, and how dates render. The
//! Symphony default reproduces the flat-user load format: a document
//! boundary, a `FORM=` line, dotted tags with `|a` value markers, and
//! address/extended-info blocks wrapped in `BEGIN`/`END` tags.

use std::path::Path;

use patron_model::FieldType;
use serde::{Deserialize, Serialize};

use crate::error::FlatError;

/// Physical shape of an encoded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutKind {
    /// Symphony-style `.TAG.   |avalue` lines, one record per document.
    Tagged { form: String },
    /// Concatenated fixed-width columns, one record per line.
    FixedWidth,
    /// Values joined by a delimiter, one record per line.
    Delimited { delimiter: char },
}

/// Which block a tagged field belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    /// Wrapped in `USER_ADDR1_BEGIN` / `USER_ADDR1_END`.
    Address,
    /// Wrapped in `USER_XINFO_BEGIN` / `USER_XINFO_END`.
    ExtendedInfo,
}

/// One field's slot in the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatField {
    /// The semantic field this slot encodes.
    pub field: FieldType,
    /// Target-system tag (tagged layouts) or column name (others).
    pub tag: String,
    /// Column width; required for fixed-width layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    /// Block membership, tagged layouts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockKind>,
}

impl FlatField {
    fn new(field: FieldType, tag: &str) -> Self {
        Self {
            field,
            tag: tag.to_string(),
            width: None,
            block: None,
        }
    }

    fn in_block(mut self, block: BlockKind) -> Self {
        self.block = Some(block);
        self
    }
}

/// A complete flat-file layout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatLayout {
    pub kind: LayoutKind,
    /// Fields in output order.
    pub fields: Vec<FlatField>,
    /// Constant tag/value pairs emitted before the fields. Tagged only.
    #[serde(default)]
    pub defaults: Vec<(String, String)>,
    /// chrono format string for date fields.
    pub date_format: String,
}

impl FlatLayout {
    /// The SirsiDynix Symphony flat-user layout.
    ///
    /// Country has no Symphony tag and is validated but never emitted.
    /// Dates are ANSI `yyyymmdd`.
    pub fn symphony_default() -> Self {
        Self {
            kind: LayoutKind::Tagged {
                form: "LDUSER".to_string(),
            },
            fields: vec![
                FlatField::new(FieldType::Barcode, "USER_ID"),
                FlatField::new(FieldType::GivenName, "USER_FIRST_NAME"),
                FlatField::new(FieldType::FamilyName, "USER_LAST_NAME"),
                FlatField::new(FieldType::Date, "USER_BIRTH_DATE"),
                FlatField::new(FieldType::Gender, "USER_CATEGORY2"),
                FlatField::new(FieldType::StreetAddress, "STREET")
                    .in_block(BlockKind::Address),
                FlatField::new(FieldType::Province, "CITYPROV").in_block(BlockKind::Address),
                FlatField::new(FieldType::PostalCode, "POSTALCODE")
                    .in_block(BlockKind::Address),
                FlatField::new(FieldType::Phone, "PHONE").in_block(BlockKind::Address),
                FlatField::new(FieldType::Email, "EMAIL").in_block(BlockKind::Address),
            ],
            defaults: vec![
                ("USER_NAME_DSP_PREF".to_string(), "0".to_string()),
                ("USER_PREF_LANG".to_string(), "ENGLISH".to_string()),
                ("USER_ROUTING_FLAG".to_string(), "Y".to_string()),
                ("USER_CHG_HIST_RULE".to_string(), "ALLCHARGES".to_string()),
                ("USER_ACCESS".to_string(), "PUBLIC".to_string()),
                ("USER_ENVIRONMENT".to_string(), "PUBLIC".to_string()),
                ("USER_MAILINGADDR".to_string(), "1".to_string()),
            ],
            date_format: "%Y%m%d".to_string(),
        }
    }

    /// Loads a layout table from JSON.
    pub fn load(path: &Path) -> Result<Self, FlatError> {
        if !path.is_file() {
            return Err(FlatError::LayoutNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|err| FlatError::MalformedLayout {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Validates layout constraints before any record is written.
    pub fn check(&self) -> Result<(), FlatError> {
        if self.fields.is_empty() {
            return Err(FlatError::EmptyLayout);
        }
        let mut seen = std::collections::BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.tag.as_str()) {
                return Err(FlatError::DuplicateTag {
                    tag: field.tag.clone(),
                });
            }
        }
        if self.kind == LayoutKind::FixedWidth {
            for field in &self.fields {
                if field.width.is_none() || field.width == Some(0) {
                    return Err(FlatError::MissingWidth {
                        tag: field.tag.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Total line width of a fixed-width layout.
    pub fn total_width(&self) -> usize {
        self.fields.iter().filter_map(|f| f.width).sum()
    }
}
