//! Fusion-space projection
//!
//! Merges the two genes' classified features onto the unified fusion
//! protein axis. The 5' gene's retained material already lives in
//! `[1, junction]` and passes through unchanged; the 3' gene's coordinates
//! shift by `junction - aa_breakpoint_b` so its retained material begins at
//! the junction.
//!
//! A bad 3' breakpoint can shift a segment ahead of the junction; those
//! coordinates are clamped to the junction, and segments that collapse to
//! nothing after clamping are dropped rather than drawn with negative
//! width.

use serde::{Deserialize, Serialize};

use crate::annotation::{FeatureStatus, GeneSide};
use crate::classify::{ClassifiedFeature, Emphasis};
use crate::coords::AaInterval;

/// A feature segment placed on the fusion protein axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionSegment {
    /// Gene the segment came from
    pub gene: GeneSide,
    /// Parent feature name (shared by both clips of a truncated feature)
    pub name: String,
    /// Annotation source of the parent feature
    pub source: String,
    /// Provider of the parent feature, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_provider: Option<String>,
    /// Whether the parent feature is a kinase domain
    pub is_kinase: bool,
    /// Residues covered, in fusion-space coordinates
    pub interval: AaInterval,
    /// Which side of the breakpoint the segment lies on
    pub status: FeatureStatus,
    /// Rendering emphasis carried over from classification
    pub emphasis: Emphasis,
}

/// Offset that moves 3' gene coordinates into fusion space.
#[inline]
pub const fn three_prime_offset(junction_position: u64, aa_breakpoint_b: u64) -> i64 {
    junction_position as i64 - aa_breakpoint_b as i64
}

/// Merge both genes' classified features into one fusion-space list.
///
/// The result is ordered by fusion-space start (ties broken by end), so a
/// renderer can draw it left to right.
///
/// # Examples
///
/// ```
/// use fusion_domains::project::three_prime_offset;
///
/// // Junction at 350, 3' breakpoint at residue 120: offset 230, so a
/// // 3' domain [130, 180] lands at [360, 410].
/// assert_eq!(three_prime_offset(350, 120), 230);
/// ```
pub fn project(
    gene_a: &[ClassifiedFeature],
    gene_b: &[ClassifiedFeature],
    junction_position: u64,
    aa_breakpoint_b: u64,
) -> Vec<FusionSegment> {
    let offset = three_prime_offset(junction_position, aa_breakpoint_b);

    let mut segments: Vec<FusionSegment> = Vec::new();
    segments.extend(segments_for(
        gene_a,
        GeneSide::FivePrime,
        0,
        junction_position,
    ));
    segments.extend(segments_for(
        gene_b,
        GeneSide::ThreePrime,
        offset,
        junction_position,
    ));

    segments.sort_by(|a, b| {
        (a.interval.start, a.interval.end).cmp(&(b.interval.start, b.interval.end))
    });
    segments
}

fn segments_for(
    classified: &[ClassifiedFeature],
    gene: GeneSide,
    offset: i64,
    junction_position: u64,
) -> Vec<FusionSegment> {
    classified
        .iter()
        .flat_map(|c| {
            c.segments.iter().filter_map(move |seg| {
                let interval = place(seg.interval, gene, offset, junction_position)?;
                Some(FusionSegment {
                    gene,
                    name: c.feature.name.clone(),
                    source: c.feature.source.clone(),
                    data_provider: c.feature.data_provider.clone(),
                    is_kinase: c.feature.is_kinase,
                    interval,
                    status: seg.status,
                    emphasis: seg.emphasis,
                })
            })
        })
        .collect()
}

/// Place one gene-local interval onto the fusion axis.
///
/// 5' segments are already in fusion space. 3' segments shift by the
/// junction offset and may not precede the junction; a shifted interval
/// ending before the junction has no drawable extent and is dropped.
fn place(
    interval: AaInterval,
    gene: GeneSide,
    offset: i64,
    junction_position: u64,
) -> Option<AaInterval> {
    match gene {
        GeneSide::FivePrime => Some(interval),
        GeneSide::ThreePrime => {
            let shifted = interval.shift(offset).clamp_start(junction_position);
            if shifted.is_degenerate() {
                None
            } else {
                Some(shifted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Feature;
    use crate::classify::classify;

    fn feature(name: &str, start: u64, end: u64) -> Feature {
        Feature {
            name: name.to_string(),
            source: "Pfam".to_string(),
            data_provider: None,
            accession: None,
            feature_type: None,
            start,
            end,
            score: None,
            is_kinase: false,
        }
    }

    #[test]
    fn test_three_prime_domain_shifts_by_offset() {
        let b = classify(
            &[feature("SH2", 130, 180)],
            Some(120),
            GeneSide::ThreePrime,
            500,
        );
        let merged = project(&[], &b, 350, 120);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].interval, AaInterval::new(360, 410));
        assert_eq!(merged[0].gene, GeneSide::ThreePrime);
    }

    #[test]
    fn test_five_prime_passes_through() {
        let a = classify(
            &[feature("Oligomerization", 1, 70)],
            Some(350),
            GeneSide::FivePrime,
            1200,
        );
        let merged = project(&a, &[], 350, 120);
        assert_eq!(merged[0].interval, AaInterval::new(1, 70));
        assert_eq!(merged[0].gene, GeneSide::FivePrime);
    }

    #[test]
    fn test_pre_junction_coordinates_clamp() {
        // 3' lost material sits before the gene-B breakpoint; after the
        // shift it would precede the junction and is clamped there.
        let b = classify(
            &[feature("Lost domain", 10, 60)],
            Some(120),
            GeneSide::ThreePrime,
            500,
        );
        let merged = project(&[], &b, 350, 120);
        // [10, 60] + 230 = [240, 290], entirely before the junction: dropped
        assert!(merged.is_empty());
    }

    #[test]
    fn test_straddling_segment_clamps_to_junction() {
        let b = classify(
            &[feature("Straddler", 100, 200)],
            Some(120),
            GeneSide::ThreePrime,
            500,
        );
        let merged = project(&[], &b, 350, 120);
        // Retained clip [120, 200] -> [350, 430]; lost clip [100, 120] ->
        // [330, 350] clamps to a single shared residue at the junction.
        let retained: Vec<_> = merged
            .iter()
            .filter(|s| s.status == FeatureStatus::Retained)
            .collect();
        let lost: Vec<_> = merged
            .iter()
            .filter(|s| s.status == FeatureStatus::Lost)
            .collect();
        assert_eq!(retained[0].interval, AaInterval::new(350, 430));
        assert_eq!(lost[0].interval, AaInterval::new(350, 350));
    }

    #[test]
    fn test_merged_list_is_ordered() {
        let a = classify(
            &[feature("A2", 200, 300), feature("A1", 1, 70)],
            Some(350),
            GeneSide::FivePrime,
            1200,
        );
        let b = classify(
            &[feature("B1", 130, 180)],
            Some(120),
            GeneSide::ThreePrime,
            500,
        );
        let merged = project(&a, &b, 350, 120);
        let starts: Vec<u64> = merged.iter().map(|s| s.interval.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_negative_offset() {
        // Junction earlier than the 3' breakpoint shifts material left.
        let b = classify(
            &[feature("B", 200, 260)],
            Some(150),
            GeneSide::ThreePrime,
            500,
        );
        let merged = project(&[], &b, 100, 150);
        assert_eq!(merged[0].interval, AaInterval::new(150, 210));
    }
}
