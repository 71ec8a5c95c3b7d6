//! Property-based tests for mapping, classification and coloring
//!
//! Pins the structural invariants that hold for any input: amino-acid
//! tracks are contiguous and ordered, classification partitions every
//! feature without inventing or losing residues, projection preserves
//! segment lengths past the junction, and color assignment is a function
//! of the name alone within a session.

use proptest::prelude::*;

use fusion_domains::annotation::{Exon, Feature, FeatureStatus, GeneSide, Strand};
use fusion_domains::classify::classify;
use fusion_domains::color::ColorCache;
use fusion_domains::coords::aa_len_for_coding_len;
use fusion_domains::mapper::map_exons_to_protein;
use fusion_domains::project::project;

fn arb_strand() -> impl Strategy<Value = Strand> {
    prop_oneof![Just(Strand::Plus), Just(Strand::Minus)]
}

/// Non-overlapping exons with a gap between neighbors.
fn arb_exons() -> impl Strategy<Value = Vec<Exon>> {
    prop::collection::vec((1u64..500, 1u64..300), 1..8).prop_map(|pairs| {
        let mut exons = Vec::new();
        let mut cursor = 1u64;
        for (i, (gap, len)) in pairs.into_iter().enumerate() {
            let start = cursor + gap;
            let end = start + len;
            exons.push(Exon {
                rank: (i + 1) as u32,
                start,
                end,
                is_coding: true,
            });
            cursor = end;
        }
        exons
    })
}

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

proptest! {
    #[test]
    fn mapped_track_is_contiguous_from_one(
        exons in arb_exons(),
        strand in arb_strand(),
    ) {
        let genomic_min = exons.iter().map(|e| e.start).min().unwrap();
        let genomic_max = exons.iter().map(|e| e.end).max().unwrap();
        let track = map_exons_to_protein(&exons, strand, Some(genomic_min), Some(genomic_max));

        prop_assert!(!track.is_empty());
        prop_assert_eq!(track[0].start, 1);
        for pair in track.windows(2) {
            // Each exon's residues start right after the previous exon's
            prop_assert_eq!(pair[1].start, pair[0].end + 1);
        }

        let total: u64 = track.iter().map(|e| e.end - e.start + 1).sum();
        let expected: u64 = exons
            .iter()
            .map(|e| aa_len_for_coding_len(e.end - e.start + 1))
            .sum();
        prop_assert_eq!(total, expected);
    }

    #[test]
    fn strand_changes_order_not_lengths(exons in arb_exons()) {
        let genomic_min = exons.iter().map(|e| e.start).min().unwrap();
        let genomic_max = exons.iter().map(|e| e.end).max().unwrap();
        let plus = map_exons_to_protein(&exons, Strand::Plus, Some(genomic_min), Some(genomic_max));
        let minus = map_exons_to_protein(&exons, Strand::Minus, Some(genomic_min), Some(genomic_max));

        let mut plus_lens: Vec<u64> = plus.iter().map(|e| e.end - e.start + 1).collect();
        let mut minus_lens: Vec<u64> = minus.iter().map(|e| e.end - e.start + 1).collect();
        plus_lens.sort_unstable();
        minus_lens.sort_unstable();
        prop_assert_eq!(plus_lens, minus_lens);
    }

    #[test]
    fn classification_accounts_for_every_residue(
        start in 1u64..1000,
        len in 0u64..500,
        bp in 1u64..1000,
        five_prime in any::<bool>(),
    ) {
        let end = start + len;
        let side = if five_prime { GeneSide::FivePrime } else { GeneSide::ThreePrime };
        let classified = classify(&[feature("f", start, end)], Some(bp), side, 2000);

        prop_assert_eq!(classified.len(), 1);
        let c = &classified[0];

        match c.status {
            FeatureStatus::Retained | FeatureStatus::Lost => {
                prop_assert_eq!(c.segments.len(), 1);
                prop_assert_eq!(c.segments[0].interval.start, start);
                prop_assert_eq!(c.segments[0].interval.end, end);
            }
            FeatureStatus::Truncated => {
                prop_assert_eq!(c.segments.len(), 2);
                // The two clips cover the feature exactly, sharing the
                // breakpoint residue as their common edge.
                let retained = &c.segments[0].interval;
                let lost = &c.segments[1].interval;
                prop_assert_eq!(retained.len() + lost.len(), (end - start + 1) + 1);
                prop_assert_eq!(retained.start.min(lost.start), start);
                prop_assert_eq!(retained.end.max(lost.end), end);
                prop_assert!(retained.contains(bp) && lost.contains(bp));
            }
            FeatureStatus::Unknown => prop_assert!(false, "breakpoint was provided"),
        }
    }

    #[test]
    fn truncation_boundary_is_exact(
        bp in 2u64..500,
        reach in 1u64..100,
    ) {
        // Feature straddling the 5' breakpoint by `reach` on both sides
        let start = bp.saturating_sub(reach).max(1);
        let end = bp + reach;
        let classified = classify(&[feature("f", start, end)], Some(bp), GeneSide::FivePrime, 1000);
        let c = &classified[0];
        prop_assert_eq!(c.status, FeatureStatus::Truncated);
        prop_assert_eq!(c.segments[0].interval.end, bp);
        prop_assert_eq!(c.segments[1].interval.start, bp);
    }

    #[test]
    fn projection_preserves_length_past_junction(
        domain_start in 1u64..400,
        domain_len in 0u64..100,
        bp_b in 1u64..300,
        junction in 1u64..600,
    ) {
        let domain_end = domain_start + domain_len;
        let b = classify(
            &[feature("d", domain_start, domain_end)],
            Some(bp_b),
            GeneSide::ThreePrime,
            1000,
        );
        let merged = project(&[], &b, junction, bp_b);

        for segment in &merged {
            // Nothing precedes the junction, and nothing degenerate survives
            prop_assert!(segment.interval.start >= junction);
            prop_assert!(!segment.interval.is_degenerate());
            // Clamping can only shorten a segment, never stretch it
            prop_assert!(segment.interval.len() <= domain_len + 1);
        }
    }

    #[test]
    fn color_assignment_is_a_function_of_the_name(
        names in prop::collection::vec("[a-z]{1,12}", 1..30),
    ) {
        let cache = ColorCache::new();
        let first: Vec<_> = names.iter().map(|n| cache.assign(n)).collect();
        let second: Vec<_> = names.iter().map(|n| cache.assign(n)).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prepopulation_order_never_matters(
        mut names in prop::collection::vec("[a-z]{1,10}", 1..16),
    ) {
        let sorted = ColorCache::new();
        {
            let mut s = names.clone();
            s.sort();
            sorted.prepopulate(s);
        }
        names.reverse();
        let reversed = ColorCache::new();
        reversed.prepopulate(names.iter());

        for name in &names {
            prop_assert_eq!(sorted.get(name), reversed.get(name));
        }
    }
}
