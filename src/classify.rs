//! Breakpoint classification of protein features
//!
//! Splits a gene's annotated features into retained, truncated and lost
//! relative to the amino-acid breakpoint, and clips truncated features into
//! the two segments a renderer draws.
//!
//! # Boundary convention
//!
//! The breakpoint residue belongs to the **retained** side on both genes.
//! Clip coordinates share the breakpoint position as their common drawing
//! edge, so the retained and lost segments of a truncated feature abut
//! without a gap: a 5' feature `[90, 150]` against breakpoint 120 clips to
//! retained `[90, 120]` and lost `[120, 150]`.
//!
//! This module is the single owner of every breakpoint comparison; callers
//! never re-derive retained/lost geometry themselves.

use serde::{Deserialize, Serialize};

use crate::annotation::{Feature, FeatureStatus, GeneSide};
use crate::coords::AaInterval;
use crate::mapper::ExonAaInterval;

/// Rendering emphasis for a feature segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// Drawn at full opacity (surviving material)
    Full,
    /// Drawn de-emphasized (discarded material)
    Reduced,
}

/// One drawable piece of a classified feature, still in the gene's own
/// protein coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSegment {
    /// Residues covered (gene-local amino-acid coordinates)
    pub interval: AaInterval,
    /// Which side of the breakpoint the segment lies on
    pub status: FeatureStatus,
    /// How prominently to draw it
    pub emphasis: Emphasis,
}

/// A feature together with its breakpoint classification.
///
/// Truncated features carry two segments (retained then lost) that share
/// the parent's identity, so legends and color assignment treat them as one
/// domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedFeature {
    /// The original feature
    pub feature: Feature,
    /// Overall retention status
    pub status: FeatureStatus,
    /// Drawable segments, ordered retained before lost
    pub segments: Vec<FeatureSegment>,
}

/// The retained and lost regions of a gene's protein axis, with the
/// breakpoint residue shared as the common clipping edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointRegions {
    /// Region surviving into the fusion (used for clipping)
    pub retained: AaInterval,
    /// Region discarded by the fusion (used for clipping)
    pub lost: AaInterval,
}

impl BreakpointRegions {
    /// Regions for a gene given its breakpoint and protein length.
    ///
    /// For the 5' gene the N-terminal side survives; for the 3' gene the
    /// C-terminal side does. Both regions include the breakpoint residue so
    /// clipped segments share it as a drawing edge.
    pub fn for_gene(side: GeneSide, breakpoint_aa: u64, protein_length: u64) -> Self {
        let len = protein_length.max(breakpoint_aa);
        match side {
            GeneSide::FivePrime => Self {
                retained: AaInterval::new(1, breakpoint_aa),
                lost: AaInterval::new(breakpoint_aa, len),
            },
            GeneSide::ThreePrime => Self {
                retained: AaInterval::new(breakpoint_aa, len),
                lost: AaInterval::new(1, breakpoint_aa),
            },
        }
    }
}

/// Retention status of an interval relative to the breakpoint.
///
/// Membership of the breakpoint residue itself goes to the retained side:
/// a 5' feature ending exactly at the breakpoint is fully retained, and a
/// 5' feature is only lost when it starts strictly after the breakpoint.
pub fn status_for_interval(
    interval: &AaInterval,
    breakpoint_aa: u64,
    side: GeneSide,
) -> FeatureStatus {
    match side {
        GeneSide::FivePrime => {
            if interval.end <= breakpoint_aa {
                FeatureStatus::Retained
            } else if interval.start > breakpoint_aa {
                FeatureStatus::Lost
            } else {
                FeatureStatus::Truncated
            }
        }
        GeneSide::ThreePrime => {
            if interval.start >= breakpoint_aa {
                FeatureStatus::Retained
            } else if interval.end < breakpoint_aa {
                FeatureStatus::Lost
            } else {
                FeatureStatus::Truncated
            }
        }
    }
}

/// Classify a gene's features against its amino-acid breakpoint.
///
/// Features failing range sanity are dropped. Lost features are still
/// returned, unclipped, so the caller decides whether to draw them. With no
/// breakpoint every feature is returned as `Unknown`.
///
/// # Examples
///
/// ```
/// use fusion_domains::annotation::{Feature, FeatureStatus, GeneSide};
/// use fusion_domains::classify::classify;
///
/// let kinase = Feature {
///     name: "Protein kinase domain".into(),
///     source: "Pfam".into(),
///     data_provider: None,
///     accession: None,
///     feature_type: None,
///     start: 90,
///     end: 150,
///     score: None,
///     is_kinase: true,
/// };
/// let classified = classify(&[kinase], Some(120), GeneSide::FivePrime, 300);
/// assert_eq!(classified[0].status, FeatureStatus::Truncated);
/// assert_eq!(classified[0].segments.len(), 2);
/// ```
pub fn classify(
    features: &[Feature],
    breakpoint_aa: Option<u64>,
    side: GeneSide,
    protein_length: u64,
) -> Vec<ClassifiedFeature> {
    let Some(bp) = breakpoint_aa else {
        return features
            .iter()
            .filter(|f| f.is_valid())
            .map(|f| ClassifiedFeature {
                feature: f.clone(),
                status: FeatureStatus::Unknown,
                segments: vec![FeatureSegment {
                    interval: f.interval(),
                    status: FeatureStatus::Unknown,
                    emphasis: Emphasis::Full,
                }],
            })
            .collect();
    };

    let regions = BreakpointRegions::for_gene(side, bp, protein_length);
    let bounds = AaInterval::new(1, protein_length.max(bp));

    features
        .iter()
        .filter(|f| f.is_valid())
        .filter_map(|f| classify_one(f, &regions, &bounds, bp, side))
        .collect()
}

fn classify_one(
    feature: &Feature,
    regions: &BreakpointRegions,
    bounds: &AaInterval,
    breakpoint_aa: u64,
    side: GeneSide,
) -> Option<ClassifiedFeature> {
    let interval = feature.interval();
    let status = status_for_interval(&interval, breakpoint_aa, side);

    let segments = match status {
        FeatureStatus::Retained => vec![FeatureSegment {
            interval,
            status: FeatureStatus::Retained,
            emphasis: Emphasis::Full,
        }],
        FeatureStatus::Lost => vec![FeatureSegment {
            interval,
            status: FeatureStatus::Lost,
            emphasis: Emphasis::Reduced,
        }],
        FeatureStatus::Truncated => {
            let mut segs = Vec::with_capacity(2);
            if let Some(retained) = interval
                .clip_to(&regions.retained)
                .and_then(|iv| iv.clip_to(bounds))
            {
                segs.push(FeatureSegment {
                    interval: retained,
                    status: FeatureStatus::Retained,
                    emphasis: Emphasis::Full,
                });
            }
            if let Some(lost) = interval
                .clip_to(&regions.lost)
                .and_then(|iv| iv.clip_to(bounds))
            {
                segs.push(FeatureSegment {
                    interval: lost,
                    status: FeatureStatus::Lost,
                    emphasis: Emphasis::Reduced,
                });
            }
            if segs.is_empty() {
                return None;
            }
            segs
        }
        FeatureStatus::Unknown => unreachable!("breakpoint is present"),
    };

    Some(ClassifiedFeature {
        feature: feature.clone(),
        status,
        segments,
    })
}

/// Assign retention statuses to a mapped exon track.
///
/// Exon intervals are not clipped, only tagged; the transcript view draws
/// whole exons and dims the lost ones. With no breakpoint the track is
/// returned with every status left `Unknown`.
pub fn classify_exons(
    track: &[ExonAaInterval],
    breakpoint_aa: Option<u64>,
    side: GeneSide,
) -> Vec<ExonAaInterval> {
    let Some(bp) = breakpoint_aa else {
        return track.to_vec();
    };

    track
        .iter()
        .map(|e| {
            let mut out = e.clone();
            out.status = status_for_interval(&e.interval(), bp, side);
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_five_prime_truncated_clips_share_boundary() {
        let classified = classify(&[feature("f", 90, 150)], Some(120), GeneSide::FivePrime, 300);
        assert_eq!(classified.len(), 1);
        let c = &classified[0];
        assert_eq!(c.status, FeatureStatus::Truncated);
        assert_eq!(c.segments.len(), 2);
        assert_eq!(c.segments[0].interval, AaInterval::new(90, 120));
        assert_eq!(c.segments[0].emphasis, Emphasis::Full);
        assert_eq!(c.segments[1].interval, AaInterval::new(120, 150));
        assert_eq!(c.segments[1].emphasis, Emphasis::Reduced);
    }

    #[test]
    fn test_five_prime_retained_and_lost() {
        let classified = classify(
            &[feature("r", 10, 120), feature("l", 121, 200)],
            Some(120),
            GeneSide::FivePrime,
            300,
        );
        assert_eq!(classified[0].status, FeatureStatus::Retained);
        assert_eq!(classified[0].segments.len(), 1);
        assert_eq!(classified[0].segments[0].interval, AaInterval::new(10, 120));

        assert_eq!(classified[1].status, FeatureStatus::Lost);
        // Lost features come back unclipped
        assert_eq!(
            classified[1].segments[0].interval,
            AaInterval::new(121, 200)
        );
        assert_eq!(classified[1].segments[0].emphasis, Emphasis::Reduced);
    }

    #[test]
    fn test_five_prime_feature_starting_at_breakpoint_is_truncated() {
        // The breakpoint residue is retained, so a feature starting exactly
        // there still has surviving material.
        let classified = classify(
            &[feature("f", 120, 150)],
            Some(120),
            GeneSide::FivePrime,
            300,
        );
        assert_eq!(classified[0].status, FeatureStatus::Truncated);
        assert_eq!(
            classified[0].segments[0].interval,
            AaInterval::new(120, 120)
        );
        assert_eq!(
            classified[0].segments[1].interval,
            AaInterval::new(120, 150)
        );
    }

    #[test]
    fn test_three_prime_mirrored() {
        let classified = classify(
            &[feature("f", 90, 150)],
            Some(120),
            GeneSide::ThreePrime,
            300,
        );
        let c = &classified[0];
        assert_eq!(c.status, FeatureStatus::Truncated);
        // Retained segment first, lost second
        assert_eq!(c.segments[0].interval, AaInterval::new(120, 150));
        assert_eq!(c.segments[0].status, FeatureStatus::Retained);
        assert_eq!(c.segments[1].interval, AaInterval::new(90, 120));
        assert_eq!(c.segments[1].status, FeatureStatus::Lost);
    }

    #[test]
    fn test_three_prime_retained_and_lost() {
        let classified = classify(
            &[feature("r", 120, 200), feature("l", 10, 119)],
            Some(120),
            GeneSide::ThreePrime,
            300,
        );
        assert_eq!(classified[0].status, FeatureStatus::Retained);
        assert_eq!(classified[1].status, FeatureStatus::Lost);
    }

    #[test]
    fn test_no_breakpoint_is_unknown() {
        let classified = classify(&[feature("f", 10, 20)], None, GeneSide::FivePrime, 300);
        assert_eq!(classified[0].status, FeatureStatus::Unknown);
        assert_eq!(classified[0].segments.len(), 1);
        assert_eq!(classified[0].segments[0].emphasis, Emphasis::Full);
    }

    #[test]
    fn test_invalid_features_dropped() {
        let classified = classify(
            &[feature("bad", 50, 10)],
            Some(120),
            GeneSide::FivePrime,
            300,
        );
        assert!(classified.is_empty());
    }

    #[test]
    fn test_clip_clamped_to_protein_length() {
        // Feature runs past the declared protein end; the lost clip stops
        // at the axis bound.
        let classified = classify(
            &[feature("f", 100, 500)],
            Some(120),
            GeneSide::FivePrime,
            300,
        );
        let c = &classified[0];
        assert_eq!(c.segments[1].interval, AaInterval::new(120, 300));
    }

    #[test]
    fn test_kinase_flag_does_not_change_classification() {
        let mut k = feature("Pkinase", 90, 150);
        k.is_kinase = true;
        let plain = classify(&[feature("f", 90, 150)], Some(120), GeneSide::FivePrime, 300);
        let kinase = classify(&[k], Some(120), GeneSide::FivePrime, 300);
        assert_eq!(plain[0].status, kinase[0].status);
        assert_eq!(plain[0].segments, kinase[0].segments);
    }

    #[test]
    fn test_classify_exons() {
        let track = vec![
            ExonAaInterval {
                start: 1,
                end: 100,
                rank: 1,
                is_coding: true,
                status: FeatureStatus::Unknown,
            },
            ExonAaInterval {
                start: 101,
                end: 200,
                rank: 2,
                is_coding: true,
                status: FeatureStatus::Unknown,
            },
            ExonAaInterval {
                start: 201,
                end: 300,
                rank: 3,
                is_coding: true,
                status: FeatureStatus::Unknown,
            },
        ];
        let classified = classify_exons(&track, Some(150), GeneSide::FivePrime);
        assert_eq!(classified[0].status, FeatureStatus::Retained);
        assert_eq!(classified[1].status, FeatureStatus::Truncated);
        assert_eq!(classified[2].status, FeatureStatus::Lost);

        // No breakpoint leaves the track untouched
        let untouched = classify_exons(&track, None, GeneSide::FivePrime);
        assert!(untouched.iter().all(|e| e.status == FeatureStatus::Unknown));
    }
}
