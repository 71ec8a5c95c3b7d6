//! Genomic to protein coordinate mapping
//!
//! Converts exon-level genomic annotation into amino-acid space:
//!
//! - [`map_exons_to_protein`] lays a transcript's coding exons onto a
//!   contiguous amino-acid track,
//! - [`genomic_to_aa`] maps a single genomic position (a breakpoint) to its
//!   amino-acid position,
//! - [`codon_phase`] and [`is_in_frame`] answer whether a fusion junction
//!   preserves the reading frame.
//!
//! Strand affects iteration order only: exons are walked in transcription
//! order (ascending genomic position on `+`, descending on `-`) and the
//! amino-acid cursor always runs 5' to 3'.
//!
//! Missing inputs (no exons, no CDS bounds) produce empty or `None`
//! results, never errors; callers treat those as "view unavailable".

use serde::{Deserialize, Serialize};

use crate::annotation::{Exon, FeatureStatus, Strand};
use crate::coords::{aa_len_for_coding_len, cds_to_aa, AaInterval};

/// An exon projected onto the amino-acid track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExonAaInterval {
    /// First residue the exon contributes (1-based, inclusive)
    pub start: u64,
    /// Last residue the exon contributes (1-based, inclusive)
    pub end: u64,
    /// Exon rank from the source annotation
    pub rank: u32,
    /// Whether the exon was annotated as coding
    pub is_coding: bool,
    /// Retention status; `Unknown` until classified against a breakpoint
    pub status: FeatureStatus,
}

impl ExonAaInterval {
    /// The residues this exon contributes.
    #[inline]
    pub fn interval(&self) -> AaInterval {
        AaInterval::new(self.start, self.end)
    }
}

/// Exons sorted into transcription order for the given strand.
fn transcription_order(exons: &[Exon], strand: Strand) -> Vec<&Exon> {
    let mut ordered: Vec<&Exon> = exons.iter().collect();
    match strand {
        Strand::Plus => ordered.sort_by_key(|e| e.start),
        Strand::Minus => ordered.sort_by(|a, b| b.end.cmp(&a.end)),
    }
    ordered
}

/// Lay a transcript's coding exons onto a contiguous amino-acid track.
///
/// Walks exons in transcription order with an amino-acid cursor starting at
/// 1. Each exon contributes `ceil(coding_len / 3)` residues, where the
/// coding length is the exon's overlap with `[cds_start, cds_end]`; a
/// partial trailing codon still occupies one residue slot. Exons with no
/// coding overlap, and exons annotated non-coding, contribute nothing.
///
/// Returns an empty track when `exons` is empty or either CDS bound is
/// absent.
///
/// # Examples
///
/// ```
/// use fusion_domains::annotation::{Exon, Strand};
/// use fusion_domains::mapper::map_exons_to_protein;
///
/// let exons = vec![Exon { rank: 1, start: 1, end: 500, is_coding: true }];
/// let track = map_exons_to_protein(&exons, Strand::Plus, Some(100), Some(400));
/// // Coding length 301 rounds up to 101 residues
/// assert_eq!(track[0].start, 1);
/// assert_eq!(track[0].end, 101);
/// ```
pub fn map_exons_to_protein(
    exons: &[Exon],
    strand: Strand,
    cds_start: Option<u64>,
    cds_end: Option<u64>,
) -> Vec<ExonAaInterval> {
    let (Some(cds_start), Some(cds_end)) = (cds_start, cds_end) else {
        return Vec::new();
    };
    if exons.is_empty() || cds_start > cds_end {
        return Vec::new();
    }

    let mut track = Vec::new();
    let mut cursor: u64 = 1;

    for exon in transcription_order(exons, strand) {
        if !exon.is_coding {
            continue;
        }
        let coding_start = exon.start.max(cds_start);
        let coding_end = exon.end.min(cds_end);
        if coding_start > coding_end {
            continue;
        }

        let coding_len = coding_end - coding_start + 1;
        let aa_len = aa_len_for_coding_len(coding_len);

        track.push(ExonAaInterval {
            start: cursor,
            end: cursor + aa_len - 1,
            rank: exon.rank,
            is_coding: exon.is_coding,
            status: FeatureStatus::Unknown,
        });
        cursor += aa_len;
    }

    track
}

/// CDS nucleotide position (1-based) of a genomic position, or `None` when
/// the position falls outside every coding exon.
///
/// Accumulates coding lengths over exons in transcription order; inside the
/// containing exon, counting runs from the coding start on `+` and from the
/// coding end on `-`.
pub fn cds_position(
    genomic_pos: u64,
    strand: Strand,
    exons: &[Exon],
    cds_start: u64,
    cds_end: u64,
) -> Option<u64> {
    let mut accumulated: u64 = 0;

    for exon in transcription_order(exons, strand) {
        let coding_start = exon.start.max(cds_start);
        let coding_end = exon.end.min(cds_end);
        if coding_start > coding_end {
            continue;
        }

        if coding_start <= genomic_pos && genomic_pos <= coding_end {
            let within = match strand {
                Strand::Plus => genomic_pos - coding_start,
                Strand::Minus => coding_end - genomic_pos,
            };
            return Some(accumulated + within + 1);
        }

        accumulated += coding_end - coding_start + 1;
    }

    None
}

/// Amino-acid position (1-based) of a genomic position, or `None` when the
/// position is outside the coding region or the CDS bounds are absent.
pub fn genomic_to_aa(
    genomic_pos: u64,
    strand: Strand,
    exons: &[Exon],
    cds_start: Option<u64>,
    cds_end: Option<u64>,
) -> Option<u64> {
    let (cds_start, cds_end) = (cds_start?, cds_end?);
    let cds_pos = cds_position(genomic_pos, strand, exons, cds_start, cds_end)?;
    Some(cds_to_aa(cds_pos))
}

/// Reading-frame phase (0, 1 or 2) at a genomic position, or `None` when
/// the position is not in the CDS.
pub fn codon_phase(
    genomic_pos: u64,
    strand: Strand,
    exons: &[Exon],
    cds_start: Option<u64>,
    cds_end: Option<u64>,
) -> Option<u8> {
    let (cds_start, cds_end) = (cds_start?, cds_end?);
    let cds_pos = cds_position(genomic_pos, strand, exons, cds_start, cds_end)?;
    Some(((cds_pos - 1) % 3) as u8)
}

/// Whether two junction phases combine into an in-frame fusion.
///
/// The phases at the 5' gene's last contributed base and the 3' gene's
/// first contributed base must complement each other modulo 3.
#[inline]
pub const fn is_in_frame(phase_a: u8, phase_b: u8) -> bool {
    (phase_a + phase_b) % 3 == 0
}
