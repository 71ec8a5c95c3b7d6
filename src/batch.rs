//! Batch schematic building
//!
//! Builds schematics for many fusions at once. In batch-consistent coloring
//! mode every fusion shares one color cache, pre-populated with every
//! domain name across the whole batch before the first schematic is built,
//! so a domain renders identically in all of them and the mapping does not
//! depend on build order.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::annotation::FusionAnnotation;
use crate::color::ColorCache;
use crate::filter::{ColorMode, DomainFilters};
use crate::schematic::{build_fusion_schematic, visible_domain_names, FusionSchematic};

/// Configuration for batch building.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Log progress every N fusions.
    pub progress_interval: usize,
    /// Share one color cache across the whole batch.
    pub batch_consistent_colors: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            progress_interval: 100,
            batch_consistent_colors: true,
        }
    }
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress logging interval.
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Configure batch-consistent coloring.
    pub fn batch_consistent_colors(mut self, enabled: bool) -> Self {
        self.batch_consistent_colors = enabled;
        self
    }
}

/// Result of a batch build.
#[derive(Debug)]
pub struct BatchOutcome {
    /// One schematic per input fusion, in input order.
    pub schematics: Vec<FusionSchematic>,
    /// Fusions whose views came back without any amino-acid breakpoint.
    pub unavailable: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Pre-populate a shared cache with every visible domain name across a
/// batch of fusions.
///
/// Names are assigned in sorted order inside the cache, so the resulting
/// mapping is independent of fusion order and of render order.
pub fn assign_batch_colors(
    fusions: &[FusionAnnotation],
    filters: &DomainFilters,
    cache: &ColorCache,
) {
    let names: Vec<&str> = fusions
        .iter()
        .flat_map(|f| visible_domain_names(f, filters))
        .collect();
    debug!(names = names.len(), "pre-populating batch color cache");
    cache.prepopulate(names);
}

/// Build schematics for a batch of fusions against one shared cache.
///
/// With batch-consistent coloring the cache is pre-populated first; after
/// that every color resolution is a pure read, so the per-fusion builds are
/// order-independent.
pub fn build_batch(
    fusions: &[FusionAnnotation],
    filters: &DomainFilters,
    cache: &ColorCache,
    config: &BatchConfig,
) -> BatchOutcome {
    let started = Instant::now();

    if config.batch_consistent_colors && filters.color_mode == ColorMode::Domain {
        assign_batch_colors(fusions, filters, cache);
    }

    let mut schematics = Vec::with_capacity(fusions.len());
    for (i, fusion) in fusions.iter().enumerate() {
        schematics.push(build_fusion_schematic(fusion, filters, cache));
        if (i + 1) % config.progress_interval == 0 {
            info!(done = i + 1, total = fusions.len(), "batch progress");
        }
    }

    let unavailable = schematics
        .iter()
        .filter(|s| s.gene_a.aa_breakpoint.is_none() && s.gene_b.aa_breakpoint.is_none())
        .count();

    let elapsed = started.elapsed();
    info!(
        total = schematics.len(),
        unavailable,
        ms = elapsed.as_millis() as u64,
        "batch complete"
    );

    BatchOutcome {
        schematics,
        unavailable,
        elapsed,
    }
}
