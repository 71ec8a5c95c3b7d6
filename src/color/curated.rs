//! Curated domain color table
//!
//! Well-known domain families get fixed colors regardless of hashing, so a
//! kinase domain is instantly recognizable in any fusion. The table is
//! configuration data: it ships with a built-in default and can be replaced
//! wholesale from JSON at startup, without touching the hashing path.
//!
//! Matching is substring, case-insensitive, against the *raw* feature name;
//! the first matching rule wins. Curated colors are exempt from collision
//! tracking in the cache.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Color;
use crate::error::FusionError;

/// Alert color for kinase-family domains.
pub const ALERT_COLOR: &str = "#dc2626";

/// Name substrings that mark a feature as a kinase domain.
///
/// The short forms are the SMART/CDD accession-style names that appear
/// verbatim in feature names ("TyrKc", "S_TKc", "STYKc").
pub const KINASE_TERMS: [&str; 5] = ["kinase", "pkinase", "tyrkc", "s_tkc", "stykc"];

/// Whether a feature name indicates a kinase domain.
pub fn is_kinase_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    KINASE_TERMS.iter().any(|term| lower.contains(term))
}

/// One curated rule: a substring pattern and the color it pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedRule {
    /// Substring matched case-insensitively against the raw feature name
    pub pattern: String,
    /// Fixed color for matching features
    pub color: Color,
}

/// An ordered list of curated rules; earlier rules win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedTable {
    /// Rules in priority order
    pub rules: Vec<CuratedRule>,
}

impl CuratedTable {
    /// The built-in table: kinase families on the alert color, a handful of
    /// signaling and structural families on fixed hues.
    pub fn builtin() -> &'static CuratedTable {
        static BUILTIN: Lazy<CuratedTable> = Lazy::new(|| {
            let rule = |pattern: &str, color: &str| CuratedRule {
                pattern: pattern.to_string(),
                color: Color::from(color),
            };
            CuratedTable {
                rules: KINASE_TERMS
                    .iter()
                    .map(|term| rule(term, ALERT_COLOR))
                    .chain([
                        rule("sh2", "#7c3aed"),
                        rule("sh3", "#2563eb"),
                        rule("pleckstrin", "#0891b2"),
                        rule("ph domain", "#0891b2"),
                        rule("dbl homology", "#ca8a04"),
                        rule("rhogef", "#ca8a04"),
                        rule("zinc finger", "#059669"),
                        rule("znf", "#059669"),
                        rule("coiled coil", "#9333ea"),
                        rule("coiled-coil", "#9333ea"),
                        rule("immunoglobulin", "#0d9488"),
                        rule("ig-like", "#0d9488"),
                    ])
                    .collect(),
            }
        });
        &BUILTIN
    }

    /// Parse a table from JSON text.
    ///
    /// Rules with empty patterns are rejected; they would match every name.
    pub fn from_json_str(json: &str) -> Result<Self, FusionError> {
        let table: CuratedTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, FusionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<(), FusionError> {
        for rule in &self.rules {
            if rule.pattern.trim().is_empty() {
                return Err(FusionError::InvalidColorTable {
                    msg: "empty pattern".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Color for the first rule whose pattern the raw name contains,
    /// case-insensitively.
    pub fn match_color(&self, raw_name: &str) -> Option<&Color> {
        let lower = raw_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| lower.contains(&rule.pattern.to_lowercase()))
            .map(|rule| &rule.color)
    }
}
