//! Gene and fusion annotation models
//!
//! In-memory structures handed to the engine by an upstream data source.
//! The engine performs no parsing and no retrieval; it only applies the
//! range sanity rules documented on each type.
//!
//! All genomic and amino-acid coordinates are 1-based inclusive, see
//! [`crate::coords`].

use serde::{Deserialize, Serialize};

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// Which side of the fusion a gene contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneSide {
    /// The 5' partner; its N-terminal portion survives.
    #[serde(rename = "5prime")]
    FivePrime,
    /// The 3' partner; its C-terminal portion survives.
    #[serde(rename = "3prime")]
    ThreePrime,
}

impl GeneSide {
    /// True for the 5' partner.
    #[inline]
    pub const fn is_five_prime(&self) -> bool {
        matches!(self, GeneSide::FivePrime)
    }
}

/// Retention status of a feature or exon relative to the breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    /// Entirely on the surviving side of the breakpoint.
    Retained,
    /// Straddles the breakpoint; split into retained and lost clips.
    Truncated,
    /// Entirely on the discarded side.
    Lost,
    /// No breakpoint available to classify against.
    Unknown,
}

/// An annotated protein feature (domain, repeat, motif) in the original
/// single-gene protein, with 1-based inclusive amino-acid bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Display name, e.g. "Protein kinase domain"
    pub name: String,
    /// Annotation source, e.g. "Pfam", "SMART", "CDD"
    pub source: String,
    /// Upstream provider the record came through, when distinct from source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_provider: Option<String>,
    /// Database accession, e.g. "PF00069"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    /// Entry type, e.g. "domain", "family", "repeat"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
    /// First residue covered (1-based, inclusive)
    pub start: u64,
    /// Last residue covered (1-based, inclusive)
    pub end: u64,
    /// E-value or hit score from the domain prediction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Whether the name matched a kinase family term
    #[serde(default)]
    pub is_kinase: bool,
}

impl Feature {
    /// Basic range sanity: `start <= end` and a real position.
    ///
    /// Violators are discarded before classification rather than reported.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start >= 1 && self.start <= self.end
    }

    /// The feature's full interval.
    #[inline]
    pub fn interval(&self) -> crate::coords::AaInterval {
        crate::coords::AaInterval::new(self.start, self.end)
    }
}

/// An exon with genomic bounds. CDS bounds are shared per transcript and
/// live on [`GeneAnnotation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    /// Exon number in transcription order (1-based)
    pub rank: u32,
    /// Genomic start (1-based, inclusive)
    pub start: u64,
    /// Genomic end (1-based, inclusive)
    pub end: u64,
    /// Whether any part of the exon is coding
    #[serde(default = "default_true")]
    pub is_coding: bool,
}

fn default_true() -> bool {
    true
}

/// One gene's annotations as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneAnnotation {
    /// Gene symbol, e.g. "BCR"
    pub symbol: String,
    /// Strand the transcript is read from
    pub strand: Strand,
    /// Genomic breakpoint position, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<u64>,
    /// Breakpoint in amino-acid coordinates, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aa_breakpoint: Option<u64>,
    /// Declared protein length; derived from annotations when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_length: Option<u64>,
    /// Translated protein sequence, when the source supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_sequence: Option<String>,
    /// CDS genomic start shared by all exons of the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cds_start: Option<u64>,
    /// CDS genomic end shared by all exons of the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cds_end: Option<u64>,
    /// Annotated protein features, in source order
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Exons, in source order
    #[serde(default)]
    pub exons: Vec<Exon>,
}

impl GeneAnnotation {
    /// Features that pass range sanity, preserving order.
    pub fn valid_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.is_valid())
    }

    /// Effective protein length.
    ///
    /// When no length was declared, derive it as the maximum of the
    /// amino-acid breakpoint and the furthest feature end, so every
    /// annotated residue fits on the axis.
    pub fn effective_protein_length(&self) -> u64 {
        let declared = self.protein_length.unwrap_or(0);
        let from_breakpoint = self.aa_breakpoint.unwrap_or(0);
        let from_features = self.valid_features().map(|f| f.end).max().unwrap_or(0);
        declared.max(from_breakpoint).max(from_features)
    }
}

/// A fusion event: the 5' gene, the 3' gene, and where they meet on the
/// unified fusion-protein axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionAnnotation {
    /// The 5' partner
    pub gene_a: GeneAnnotation,
    /// The 3' partner
    pub gene_b: GeneAnnotation,
    /// Junction position on the fusion axis (amino acids)
    pub junction_position: u64,
    /// Total fusion protein length (amino acids)
    pub total_length: u64,
    /// Reads crossing the junction exactly, when the caller has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction_reads: Option<u64>,
    /// Read pairs spanning the junction, when the caller has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spanning_reads: Option<u64>,
}

impl FusionAnnotation {
    /// Conventional fusion name, e.g. "BCR--ABL1".
    pub fn fusion_name(&self) -> String {
        format!("{}--{}", self.gene_a.symbol, self.gene_b.symbol)
    }
}
