//! Domain visibility filters and coloring strategy
//!
//! [`DomainFilters`] is the configuration surface the presentation layer
//! hands in: allow-lists over annotation source and data provider, a
//! provider deny-list, and the coloring strategy. [`should_show`] is the
//! per-feature predicate a renderer consults before drawing.
//!
//! Filter objects are treated as immutable: toggling a provider derives a
//! new effective filter with [`effective_filters`] instead of mutating the
//! caller's copy.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::annotation::Feature;
use crate::color::Color;

/// Coloring strategy for domain segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Fixed color per annotation source
    Source,
    /// Fixed color per entry type (domain, family, repeat, ...)
    Type,
    /// Deterministic per-domain coloring via [`crate::color::ColorCache`]
    #[default]
    Domain,
}

/// Visibility filters plus the coloring strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DomainFilters {
    /// Allow-list of annotation sources; empty shows all
    #[serde(default)]
    pub sources: Vec<String>,
    /// Allow-list of data providers; empty shows all
    #[serde(default)]
    pub data_providers: Vec<String>,
    /// Deny-list of data providers; hides regardless of the allow-lists
    #[serde(default)]
    pub exclude_data_providers: Vec<String>,
    /// Coloring strategy
    #[serde(default)]
    pub color_mode: ColorMode,
}

/// Whether a feature passes the filters.
///
/// Three conditions are ANDed, each defaulting to "show" when its list is
/// empty: the source allow-list, the provider allow-list (a feature without
/// a provider fails a non-empty allow-list), and the provider deny-list (a
/// feature without a provider is never hidden by it).
///
/// # Examples
///
/// ```
/// use fusion_domains::annotation::Feature;
/// use fusion_domains::filter::{should_show, DomainFilters};
///
/// let filters = DomainFilters {
///     exclude_data_providers: vec!["CDD".into()],
///     ..Default::default()
/// };
/// let mut feature = Feature {
///     name: "WW domain".into(),
///     source: "Pfam".into(),
///     data_provider: Some("CDD".into()),
///     accession: None,
///     feature_type: None,
///     start: 1,
///     end: 40,
///     score: None,
///     is_kinase: false,
/// };
/// assert!(!should_show(&feature, &filters));
/// feature.data_provider = None;
/// assert!(should_show(&feature, &filters));
/// ```
pub fn should_show(feature: &Feature, filters: &DomainFilters) -> bool {
    if !filters.sources.is_empty() && !filters.sources.contains(&feature.source) {
        return false;
    }

    if !filters.data_providers.is_empty() {
        match &feature.data_provider {
            Some(provider) if filters.data_providers.contains(provider) => {}
            _ => return false,
        }
    }

    if !filters.exclude_data_providers.is_empty() {
        if let Some(provider) = &feature.data_provider {
            if filters.exclude_data_providers.contains(provider) {
                return false;
            }
        }
    }

    true
}

/// Derive the effective filters for a provider toggle.
///
/// Including a provider clears the deny-list; excluding it sets the
/// deny-list to exactly that provider. The caller's filters are never
/// mutated, so repeated toggles always start from the same base.
pub fn effective_filters(filters: &DomainFilters, provider: &str, include: bool) -> DomainFilters {
    let mut effective = filters.clone();
    effective.exclude_data_providers = if include {
        Vec::new()
    } else {
        vec![provider.to_string()]
    };
    effective
}

static SOURCE_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("Pfam", Color::from("#3b82f6")),
        ("SMART", Color::from("#10b981")),
        ("CDD", Color::from("#f59e0b")),
        ("InterPro", Color::from("#8b5cf6")),
        ("UniProt", Color::from("#ec4899")),
        ("PROSITE", Color::from("#14b8a6")),
        ("Gene3D", Color::from("#f97316")),
        ("Superfamily", Color::from("#6366f1")),
        ("SUPFAM", Color::from("#6366f1")),
        ("PANTHER", Color::from("#84cc16")),
        ("TIGRFAMs", Color::from("#06b6d4")),
        ("PRINTS", Color::from("#a855f7")),
        ("HAMAP", Color::from("#eab308")),
    ])
});

static TYPE_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("domain", Color::from("#3b82f6")),
        ("family", Color::from("#8b5cf6")),
        ("repeat", Color::from("#10b981")),
        ("motif", Color::from("#f59e0b")),
        ("region", Color::from("#14b8a6")),
        ("site", Color::from("#ec4899")),
        ("zinc finger", Color::from("#059669")),
        ("coiled coil", Color::from("#9333ea")),
        ("transmembrane", Color::from("#f97316")),
        ("dna binding", Color::from("#6366f1")),
    ])
});

/// Neutral fallback when a source or type has no fixed color.
pub const FALLBACK_COLOR: &str = "#94a3b8";

/// Fixed color for an annotation source (the `Source` color mode).
pub fn color_for_source(source: &str) -> Color {
    SOURCE_COLORS
        .get(source)
        .cloned()
        .unwrap_or_else(|| Color::from(FALLBACK_COLOR))
}

/// Fixed color for an entry type (the `Type` color mode). Matching is
/// case-insensitive; features without a type get the fallback.
pub fn color_for_type(feature_type: Option<&str>) -> Color {
    feature_type
        .and_then(|t| TYPE_COLORS.get(t.to_lowercase().as_str()).cloned())
        .unwrap_or_else(|| Color::from(FALLBACK_COLOR))
}
