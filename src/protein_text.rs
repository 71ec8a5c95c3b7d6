//! Protein-change text utilities
//!
//! Small pure helpers for placing mutation annotations on the amino-acid
//! axis: position extraction from protein-change and coding-change
//! notation, 3-letter to 1-letter residue formatting, and mutation-type
//! normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized mutation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    Missense,
    Nonsense,
    Frameshift,
    Silent,
    Splice,
    InframeIndel,
    Other,
}

static AA_POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][a-z]{2})?(\d+)").expect("valid regex"));
static ANY_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").expect("valid regex"));
static CODING_POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"c\.(\d+)").expect("valid regex"));

static THREE_TO_ONE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Ala", "A"),
        ("Arg", "R"),
        ("Asn", "N"),
        ("Asp", "D"),
        ("Cys", "C"),
        ("Gln", "Q"),
        ("Glu", "E"),
        ("Gly", "G"),
        ("His", "H"),
        ("Ile", "I"),
        ("Leu", "L"),
        ("Lys", "K"),
        ("Met", "M"),
        ("Phe", "F"),
        ("Pro", "P"),
        ("Ser", "S"),
        ("Thr", "T"),
        ("Trp", "W"),
        ("Tyr", "Y"),
        ("Val", "V"),
        ("Ter", "*"),
    ])
});

/// Extract the amino-acid position from protein-change notation.
///
/// Handles `p.Arg123Cys`, `p.R123C`, bare `V600E`, and range forms like
/// `p.Arg123_Lys125del` (the first position wins).
///
/// # Examples
///
/// ```
/// use fusion_domains::protein_text::extract_protein_position;
///
/// assert_eq!(extract_protein_position("p.Arg123Cys"), Some(123));
/// assert_eq!(extract_protein_position("V600E"), Some(600));
/// assert_eq!(extract_protein_position(""), None);
/// ```
pub fn extract_protein_position(protein_change: &str) -> Option<u64> {
    if protein_change.is_empty() {
        return None;
    }
    let text = protein_change.strip_prefix("p.").unwrap_or(protein_change);

    if let Some(caps) = AA_POSITION.captures(text) {
        return caps.get(2).and_then(|m| m.as_str().parse().ok());
    }
    ANY_DIGITS
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Approximate amino-acid position from coding-change notation.
///
/// Intronic forms like `c.213-259C>T` anchor at the nearest coding base;
/// the codon holding coding position `n` is `(n + 2) / 3`.
///
/// # Examples
///
/// ```
/// use fusion_domains::protein_text::extract_position_from_coding;
///
/// assert_eq!(extract_position_from_coding("c.213-259C>T"), Some(71));
/// assert_eq!(extract_position_from_coding("c.635G>A"), Some(212));
/// assert_eq!(extract_position_from_coding("g.12345A>G"), None);
/// ```
pub fn extract_position_from_coding(hgvsc: &str) -> Option<u64> {
    let caps = CODING_POSITION.captures(hgvsc)?;
    let coding_pos: u64 = caps.get(1)?.as_str().parse().ok()?;
    Some((coding_pos + 2) / 3)
}

/// Convert a 3-letter amino-acid code to its 1-letter form. Unknown codes
/// pass through unchanged.
pub fn three_to_one(code: &str) -> &str {
    THREE_TO_ONE.get(code).copied().unwrap_or(code)
}

/// Format protein-change notation into a compact 1-letter label.
///
/// # Examples
///
/// ```
/// use fusion_domains::protein_text::format_protein_change;
///
/// assert_eq!(format_protein_change("p.Val600Glu"), "V600E");
/// assert_eq!(format_protein_change("p.Arg123Ter"), "R123*");
/// ```
pub fn format_protein_change(hgvsp: &str) -> String {
    let text = hgvsp.strip_prefix("p.").unwrap_or(hgvsp);
    let mut result = text.to_string();
    for (three, one) in THREE_TO_ONE.iter() {
        result = result.replace(three, one);
    }
    result
}

/// Normalize a free-form mutation type string to a standard category.
pub fn normalize_mutation_type(raw_type: &str) -> MutationType {
    let mt = raw_type.to_lowercase();
    if mt.is_empty() {
        return MutationType::Other;
    }
    if mt.contains("missense") {
        MutationType::Missense
    } else if mt.contains("nonsense") || mt.contains("stop") {
        MutationType::Nonsense
    } else if mt.contains("frameshift") || mt.contains("frame_shift") {
        MutationType::Frameshift
    } else if mt.contains("silent") || mt.contains("synonymous") {
        MutationType::Silent
    } else if mt.contains("splice") {
        MutationType::Splice
    } else if mt.contains("inframe")
        || mt.contains("in_frame")
        || mt.contains("insertion")
        || mt.contains("deletion")
    {
        MutationType::InframeIndel
    } else {
        MutationType::Other
    }
}
