//! Parallel batch building with rayon
//!
//! Enable with the `parallel` feature. Color pre-population stays serial
//! (the sorted assignment order is what makes the mapping deterministic);
//! after it, per-fusion builds only read the cache and can fan out freely.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use fusion_domains::color::ColorCache;
//! use fusion_domains::filter::DomainFilters;
//! use fusion_domains::parallel::build_batch_parallel;
//!
//! let fusions = Vec::new();
//! let cache = ColorCache::new();
//! let schematics = build_batch_parallel(&fusions, &DomainFilters::default(), &cache);
//! assert!(schematics.is_empty());
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::annotation::FusionAnnotation;
use crate::batch::assign_batch_colors;
use crate::color::ColorCache;
use crate::filter::{ColorMode, DomainFilters};
use crate::schematic::{build_fusion_schematic, FusionSchematic};

/// Build schematics for a batch of fusions in parallel.
///
/// Output order matches input order. The shared cache is fully
/// pre-populated before the fan-out, so the result is identical to the
/// serial [`crate::batch::build_batch`] with batch-consistent coloring.
pub fn build_batch_parallel(
    fusions: &[FusionAnnotation],
    filters: &DomainFilters,
    cache: &ColorCache,
) -> Vec<FusionSchematic> {
    if filters.color_mode == ColorMode::Domain {
        assign_batch_colors(fusions, filters, cache);
    }

    fusions
        .par_iter()
        .map(|fusion| build_fusion_schematic(fusion, filters, cache))
        .collect()
}
