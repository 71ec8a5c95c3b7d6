//! Schematic assembly
//!
//! Wires the mapper, classifier, projector, filters and color cache into
//! the render-ready structures the presentation layer consumes: a per-gene
//! view (exon track plus classified, colored feature segments in the gene's
//! own coordinates) and the merged fusion view on the unified axis.
//!
//! The color cache is pre-populated with every surviving domain name before
//! any color is resolved, so the mapping is independent of render order and
//! safe to share with concurrent readers afterwards.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotation::{FeatureStatus, FusionAnnotation, GeneAnnotation, GeneSide, Strand};
use crate::classify::{classify, classify_exons, ClassifiedFeature, Emphasis};
use crate::color::curated::{is_kinase_name, ALERT_COLOR};
use crate::color::{Color, ColorCache};
use crate::coords::AaInterval;
use crate::filter::{color_for_source, color_for_type, should_show, ColorMode, DomainFilters};
use crate::mapper::{codon_phase, genomic_to_aa, is_in_frame, map_exons_to_protein, ExonAaInterval};
use crate::project::{project, FusionSegment};

/// Confidence grade for a fusion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A classified feature segment ready to draw, in gene-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSegment {
    /// Parent feature name
    pub name: String,
    /// Annotation source
    pub source: String,
    /// Data provider, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_provider: Option<String>,
    /// Database accession, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    /// Whether the parent feature is a kinase domain
    pub is_kinase: bool,
    /// Residues covered
    pub interval: AaInterval,
    /// Side of the breakpoint
    pub status: FeatureStatus,
    /// Rendering emphasis
    pub emphasis: Emphasis,
    /// Resolved display color
    pub color: Color,
}

/// A fusion-space segment with its resolved color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionRenderSegment {
    /// The projected segment
    #[serde(flatten)]
    pub segment: FusionSegment,
    /// Resolved display color
    pub color: Color,
}

/// One legend row; kinase domains sort first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Domain name
    pub name: String,
    /// Display color
    pub color: Color,
    /// Whether this is a kinase domain
    pub is_kinase: bool,
    /// Overall retention status of the domain
    pub status: FeatureStatus,
}

/// One gene's render-ready view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneView {
    /// Gene symbol
    pub symbol: String,
    /// Side of the fusion this gene contributes
    pub side: GeneSide,
    /// Strand
    pub strand: Strand,
    /// Genomic breakpoint, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<u64>,
    /// Amino-acid breakpoint, supplied or mapped from the genomic one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aa_breakpoint: Option<u64>,
    /// Effective protein length
    pub protein_length: u64,
    /// Exon track in amino-acid coordinates, statuses assigned
    pub exons: Vec<ExonAaInterval>,
    /// Filtered, classified, colored feature segments
    pub segments: Vec<RenderSegment>,
}

/// The full render-ready schematic for one fusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionSchematic {
    /// Conventional fusion name, e.g. "BCR--ABL1"
    pub fusion_name: String,
    /// Junction position on the fusion axis
    pub junction_position: u64,
    /// Total fusion protein length
    pub total_length: u64,
    /// Whether the junction preserves the reading frame, when computable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_frame: Option<bool>,
    /// 5' gene view
    pub gene_a: GeneView,
    /// 3' gene view
    pub gene_b: GeneView,
    /// Merged fusion-axis segments, ordered left to right
    pub fusion_segments: Vec<FusionRenderSegment>,
    /// Legend rows, kinase first then by name
    pub legend: Vec<LegendEntry>,
    /// Whether any annotated domain is a kinase
    pub has_kinase_domain: bool,
    /// Whether a kinase domain survives intact, when determinable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinase_retained: Option<bool>,
    /// Confidence grade from supporting reads and frame
    pub confidence: Confidence,
    /// Joined fusion protein sequence, when both sequences are available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fusion_sequence: Option<String>,
}

/// Resolve the display color for one feature identity.
///
/// Kinase domains always get the alert color. Otherwise the color mode
/// decides: fixed per-source or per-type maps, or the deterministic
/// per-domain cache.
pub fn resolve_color(
    name: &str,
    source: &str,
    feature_type: Option<&str>,
    is_kinase: bool,
    mode: ColorMode,
    cache: &ColorCache,
) -> Color {
    if is_kinase {
        return Color::from(ALERT_COLOR);
    }
    match mode {
        ColorMode::Source => color_for_source(source),
        ColorMode::Type => color_for_type(feature_type),
        ColorMode::Domain => cache.assign(name),
    }
}

/// Effective amino-acid breakpoint for a gene: the supplied one, or the
/// genomic breakpoint mapped through the exon structure.
pub fn effective_aa_breakpoint(gene: &GeneAnnotation) -> Option<u64> {
    gene.aa_breakpoint.or_else(|| {
        let pos = gene.breakpoint?;
        genomic_to_aa(pos, gene.strand, &gene.exons, gene.cds_start, gene.cds_end)
    })
}

/// Build one gene's render-ready view.
///
/// Classifies the exon track and the filtered features against the gene's
/// amino-acid breakpoint and resolves a color per feature identity. A gene
/// without a breakpoint yields `Unknown` statuses throughout.
pub fn build_gene_view(
    gene: &GeneAnnotation,
    side: GeneSide,
    filters: &DomainFilters,
    cache: &ColorCache,
) -> GeneView {
    let aa_breakpoint = effective_aa_breakpoint(gene);
    let protein_length = gene.effective_protein_length();

    let track = map_exons_to_protein(&gene.exons, gene.strand, gene.cds_start, gene.cds_end);
    let exons = classify_exons(&track, aa_breakpoint, side);

    let visible: Vec<_> = gene
        .valid_features()
        .filter(|f| should_show(f, filters))
        .cloned()
        .collect();
    let classified = classify(&visible, aa_breakpoint, side, protein_length);

    let segments = classified
        .iter()
        .flat_map(|c| {
            let is_kinase = c.feature.is_kinase || is_kinase_name(&c.feature.name);
            let color = resolve_color(
                &c.feature.name,
                &c.feature.source,
                c.feature.feature_type.as_deref(),
                is_kinase,
                filters.color_mode,
                cache,
            );
            c.segments.iter().map(move |seg| RenderSegment {
                name: c.feature.name.clone(),
                source: c.feature.source.clone(),
                data_provider: c.feature.data_provider.clone(),
                accession: c.feature.accession.clone(),
                is_kinase,
                interval: seg.interval,
                status: seg.status,
                emphasis: seg.emphasis,
                color: color.clone(),
            })
        })
        .collect();

    GeneView {
        symbol: gene.symbol.clone(),
        side,
        strand: gene.strand,
        breakpoint: gene.breakpoint,
        aa_breakpoint,
        protein_length,
        exons,
        segments,
    }
}

/// Build the full schematic for one fusion.
///
/// Pre-populates the color cache with every visible domain name from both
/// genes before resolving any color, classifies and projects both genes
/// onto the fusion axis, and derives the kinase/frame/confidence summary.
pub fn build_fusion_schematic(
    fusion: &FusionAnnotation,
    filters: &DomainFilters,
    cache: &ColorCache,
) -> FusionSchematic {
    let fusion_name = fusion.fusion_name();
    debug!(fusion = %fusion_name, "building fusion schematic");

    if filters.color_mode == ColorMode::Domain {
        cache.prepopulate(visible_domain_names(fusion, filters));
    }

    let gene_a = build_gene_view(&fusion.gene_a, GeneSide::FivePrime, filters, cache);
    let gene_b = build_gene_view(&fusion.gene_b, GeneSide::ThreePrime, filters, cache);

    let classified_a = classify_visible(&fusion.gene_a, GeneSide::FivePrime, filters);
    let classified_b = classify_visible(&fusion.gene_b, GeneSide::ThreePrime, filters);

    // Without a 3' breakpoint there is no offset; the fusion axis then only
    // carries the 5' gene.
    let fusion_segments = match gene_b.aa_breakpoint {
        Some(bp_b) => project(
            &classified_a,
            &classified_b,
            fusion.junction_position,
            bp_b,
        ),
        None => project(&classified_a, &[], fusion.junction_position, 0),
    };

    let fusion_segments: Vec<FusionRenderSegment> = fusion_segments
        .into_iter()
        .map(|mut segment| {
            let is_kinase = segment.is_kinase || is_kinase_name(&segment.name);
            segment.is_kinase = is_kinase;
            let color = resolve_color(
                &segment.name,
                &segment.source,
                None,
                is_kinase,
                filters.color_mode,
                cache,
            );
            FusionRenderSegment { segment, color }
        })
        .collect();

    let legend = build_legend(&classified_a, &classified_b, filters, cache);
    let (has_kinase_domain, kinase_retained) = kinase_summary(&classified_a, &classified_b);
    let is_in_frame = junction_frame(&fusion.gene_a, &fusion.gene_b);
    let confidence = grade_confidence(fusion.junction_reads, fusion.spanning_reads, is_in_frame);
    let fusion_sequence = join_fusion_sequence(
        &fusion.gene_a,
        gene_a.aa_breakpoint,
        &fusion.gene_b,
        gene_b.aa_breakpoint,
    );

    debug!(
        fusion = %fusion_name,
        segments = fusion_segments.len(),
        has_kinase = has_kinase_domain,
        "schematic complete"
    );

    FusionSchematic {
        fusion_name,
        junction_position: fusion.junction_position,
        total_length: fusion.total_length,
        is_in_frame,
        gene_a,
        gene_b,
        fusion_segments,
        legend,
        has_kinase_domain,
        kinase_retained,
        confidence,
        fusion_sequence,
    }
}

/// Every visible domain name in a fusion, for cache pre-population.
pub fn visible_domain_names<'a>(
    fusion: &'a FusionAnnotation,
    filters: &'a DomainFilters,
) -> impl Iterator<Item = &'a str> {
    fusion
        .gene_a
        .valid_features()
        .chain(fusion.gene_b.valid_features())
        .filter(|f| should_show(f, filters))
        .map(|f| f.name.as_str())
}

fn classify_visible(
    gene: &GeneAnnotation,
    side: GeneSide,
    filters: &DomainFilters,
) -> Vec<ClassifiedFeature> {
    let visible: Vec<_> = gene
        .valid_features()
        .filter(|f| should_show(f, filters))
        .cloned()
        .collect();
    classify(
        &visible,
        effective_aa_breakpoint(gene),
        side,
        gene.effective_protein_length(),
    )
}

/// Legend rows for both genes' visible domains, deduplicated by name.
///
/// Kinase domains sort first, then alphabetically.
fn build_legend(
    classified_a: &[ClassifiedFeature],
    classified_b: &[ClassifiedFeature],
    filters: &DomainFilters,
    cache: &ColorCache,
) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Vec::new();
    for c in classified_a.iter().chain(classified_b) {
        if entries.iter().any(|e| e.name == c.feature.name) {
            continue;
        }
        let is_kinase = c.feature.is_kinase || is_kinase_name(&c.feature.name);
        entries.push(LegendEntry {
            name: c.feature.name.clone(),
            color: resolve_color(
                &c.feature.name,
                &c.feature.source,
                c.feature.feature_type.as_deref(),
                is_kinase,
                filters.color_mode,
                cache,
            ),
            is_kinase,
            status: c.status,
        });
    }
    entries.sort_by(|a, b| b.is_kinase.cmp(&a.is_kinase).then(a.name.cmp(&b.name)));
    entries
}

/// Kinase summary: whether any kinase domain exists, and whether one
/// survives intact. Truncation counts against retention.
fn kinase_summary(
    classified_a: &[ClassifiedFeature],
    classified_b: &[ClassifiedFeature],
) -> (bool, Option<bool>) {
    let mut has_kinase = false;
    let mut kinase_retained: Option<bool> = None;

    for c in classified_a.iter().chain(classified_b) {
        if !(c.feature.is_kinase || is_kinase_name(&c.feature.name)) {
            continue;
        }
        has_kinase = true;
        match c.status {
            FeatureStatus::Retained => kinase_retained = Some(true),
            FeatureStatus::Lost => {
                if kinase_retained.is_none() {
                    kinase_retained = Some(false);
                }
            }
            FeatureStatus::Truncated => kinase_retained = Some(false),
            FeatureStatus::Unknown => {}
        }
    }

    (has_kinase, kinase_retained)
}

/// In-frame determination from the two genomic breakpoints, when both map
/// into their CDS.
fn junction_frame(gene_a: &GeneAnnotation, gene_b: &GeneAnnotation) -> Option<bool> {
    let phase_a = codon_phase(
        gene_a.breakpoint?,
        gene_a.strand,
        &gene_a.exons,
        gene_a.cds_start,
        gene_a.cds_end,
    )?;
    let phase_b = codon_phase(
        gene_b.breakpoint?,
        gene_b.strand,
        &gene_b.exons,
        gene_b.cds_start,
        gene_b.cds_end,
    )?;
    Some(is_in_frame(phase_a, phase_b))
}

/// Join the two protein sequences at their breakpoints.
///
/// The 5' gene contributes residues up to and including its breakpoint,
/// the 3' gene from its breakpoint on. A breakpoint outside the sequence
/// falls back to the whole sequence.
fn join_fusion_sequence(
    gene_a: &GeneAnnotation,
    bp_a: Option<u64>,
    gene_b: &GeneAnnotation,
    bp_b: Option<u64>,
) -> Option<String> {
    let seq_a = gene_a.protein_sequence.as_deref().filter(|s| !s.is_empty())?;
    let seq_b = gene_b.protein_sequence.as_deref().filter(|s| !s.is_empty())?;

    let part_a = match bp_a {
        Some(bp) if bp as usize <= seq_a.len() => &seq_a[..bp as usize],
        _ => seq_a,
    };
    let part_b = match bp_b {
        Some(bp) if bp >= 1 && bp as usize <= seq_b.len() => &seq_b[bp as usize - 1..],
        _ => seq_b,
    };

    Some(format!("{part_a}{part_b}"))
}

/// Confidence grade from junction support and frame.
fn grade_confidence(
    junction_reads: Option<u64>,
    spanning_reads: Option<u64>,
    in_frame: Option<bool>,
) -> Confidence {
    let total = junction_reads.unwrap_or(0) + spanning_reads.unwrap_or(0);
    if total >= 10 && in_frame == Some(true) {
        Confidence::High
    } else if total >= 5 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
