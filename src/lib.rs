//! fusion-domains: fusion-gene protein schematics engine
//!
//! Coordinate mapping and domain classification for visualizing chimeric
//! proteins produced by gene fusions: converts genomic exon coordinates to
//! amino-acid space, classifies and clips annotated domains against the
//! fusion breakpoint, projects both partners onto one fusion-protein axis,
//! and assigns deterministic, collision-aware display colors so a domain
//! renders identically across views and batches.
//!
//! # Example
//!
//! ```
//! use fusion_domains::annotation::{Feature, FeatureStatus, GeneSide};
//! use fusion_domains::classify::classify;
//! use fusion_domains::color::ColorCache;
//!
//! let domain = Feature {
//!     name: "SH3 domain".into(),
//!     source: "Pfam".into(),
//!     data_provider: None,
//!     accession: None,
//!     feature_type: None,
//!     start: 90,
//!     end: 150,
//!     score: None,
//!     is_kinase: false,
//! };
//!
//! // Classify against a 5' breakpoint at residue 120
//! let classified = classify(&[domain], Some(120), GeneSide::FivePrime, 300);
//! assert_eq!(classified[0].status, FeatureStatus::Truncated);
//!
//! // Colors are stable per name within a session cache
//! let cache = ColorCache::new();
//! assert_eq!(cache.assign("WW domain"), cache.assign("WW domain"));
//! ```

pub mod annotation;
pub mod batch;
pub mod classify;
pub mod color;
pub mod coords;
pub mod error;
pub mod filter;
pub mod mapper;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod project;
pub mod protein_text;
pub mod schematic;

// Re-export commonly used types
pub use annotation::{
    Exon, Feature, FeatureStatus, FusionAnnotation, GeneAnnotation, GeneSide, Strand,
};
pub use classify::{classify, classify_exons, ClassifiedFeature, Emphasis};
pub use color::{Color, ColorCache};
pub use coords::AaInterval;
pub use error::FusionError;
pub use filter::{effective_filters, should_show, ColorMode, DomainFilters};
pub use mapper::{genomic_to_aa, is_in_frame, map_exons_to_protein, ExonAaInterval};
pub use project::{project, FusionSegment};
pub use schematic::{build_fusion_schematic, build_gene_view, FusionSchematic, GeneView};

/// Result type alias for fusion-domains operations
pub type Result<T> = std::result::Result<T, FusionError>;
