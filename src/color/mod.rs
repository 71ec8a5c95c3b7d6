//! Deterministic domain coloring
//!
//! Assigns every domain name a stable display color so the same domain
//! renders identically across independently-drawn views and across whole
//! batches of fusions sharing one cache.
//!
//! Resolution order for a name:
//!
//! 1. the curated table (kinase families and other well-known domains get
//!    fixed hues; these bypass collision tracking),
//! 2. the cache (a name already assigned keeps its color forever),
//! 3. a 32-bit rolling hash over the normalized name, indexing a fixed
//!    16-entry palette, with a linear scan to the first unused palette
//!    color on collision. Once the palette is exhausted, hash-selected
//!    duplicates are accepted.
//!
//! The cache is the only mutable state in the crate. It is explicitly
//! constructed and scoped to one rendering session (a single fusion, or a
//! whole batch when batch-consistent coloring is requested), and dropped
//! with it; there is no process-wide color state.
//!
//! # Example
//!
//! ```
//! use fusion_domains::color::ColorCache;
//!
//! let cache = ColorCache::new();
//! let c1 = cache.assign("WW domain");
//! let c2 = cache.assign("WW domain");
//! assert_eq!(c1, c2);
//! ```

pub mod curated;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use self::curated::CuratedTable;

/// A display color as a `#rrggbb` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Wrap a hex color string.
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The hex string, e.g. `"#3b82f6"`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Color {
    fn from(hex: &str) -> Self {
        Self(hex.to_string())
    }
}

/// The fixed hash palette. Order matters twice: the hash indexes into it,
/// and the collision fallback scans it from the front.
pub const PALETTE: [&str; 16] = [
    "#3b82f6", // blue
    "#10b981", // emerald
    "#f59e0b", // amber
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#6366f1", // indigo
    "#84cc16", // lime
    "#06b6d4", // cyan
    "#a855f7", // purple
    "#eab308", // yellow
    "#22c55e", // green
    "#0ea5e9", // sky
    "#d946ef", // fuchsia
    "#64748b", // slate
];

/// Normalize a domain name for cache lookup: lowercase, trimmed.
#[inline]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// 32-bit rolling hash over a name, matching the widely-used
/// `h = h * 31 + char` string hash truncated to a signed 32-bit value.
pub fn name_hash(name: &str) -> i32 {
    name.chars()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32))
}

/// Palette index selected by the hash for a normalized name.
#[inline]
pub fn palette_index(name: &str) -> usize {
    name_hash(name).unsigned_abs() as usize % PALETTE.len()
}

/// Usage counters for a color cache.
#[derive(Debug, Clone, Default)]
pub struct ColorCacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that assigned a new color
    pub misses: u64,
    /// Lookups answered by the curated table
    pub curated_hits: u64,
    /// Number of distinct names currently mapped
    pub size: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    mapping: HashMap<String, Color>,
    used_colors: HashSet<Color>,
}

/// Session-scoped color assignments.
///
/// Interior-mutable so presentation code holding shared references can
/// resolve colors concurrently; assignment is idempotent, and when the
/// cache was pre-populated with every name it will see, concurrent lookups
/// are pure reads.
#[derive(Debug)]
pub struct ColorCache {
    state: RwLock<CacheState>,
    table: CuratedTable,
    hits: AtomicU64,
    misses: AtomicU64,
    curated_hits: AtomicU64,
}

impl ColorCache {
    /// Create an empty cache using the built-in curated table.
    pub fn new() -> Self {
        Self::with_table(CuratedTable::builtin().clone())
    }

    /// Create an empty cache with a custom curated table.
    pub fn with_table(table: CuratedTable) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            table,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            curated_hits: AtomicU64::new(0),
        }
    }

    /// Resolve the color for a domain name, assigning one if needed.
    ///
    /// Deterministic for a fixed sequence of distinct names against a fresh
    /// cache, and idempotent per name: assigning the same name twice never
    /// changes its color.
    pub fn assign(&self, name: &str) -> Color {
        // Curated names are fixed and never participate in collision
        // tracking, so they can short-circuit before any lock.
        if let Some(color) = self.table.match_color(name) {
            self.curated_hits.fetch_add(1, Ordering::Relaxed);
            return color.clone();
        }

        let normalized = normalize_name(name);

        {
            let state = self.state.read().unwrap();
            if let Some(color) = state.mapping.get(&normalized) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return color.clone();
            }
        }

        let mut state = self.state.write().unwrap();
        // A concurrent writer may have assigned the name between the locks.
        if let Some(color) = state.mapping.get(&normalized) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return color.clone();
        }

        let color = Self::pick_color(&normalized, &state.used_colors);
        state.mapping.insert(normalized, color.clone());
        state.used_colors.insert(color.clone());
        self.misses.fetch_add(1, Ordering::Relaxed);
        color
    }

    /// Hash-select a palette color, falling back to the first unused entry
    /// on collision. With the palette exhausted the hash pick stands and
    /// duplicates become acceptable.
    fn pick_color(normalized: &str, used: &HashSet<Color>) -> Color {
        let candidate = Color::from(PALETTE[palette_index(normalized)]);
        if !used.contains(&candidate) {
            return candidate;
        }
        for hex in PALETTE {
            let color = Color::from(hex);
            if !used.contains(&color) {
                return color;
            }
        }
        candidate
    }

    /// Pre-populate the cache with every name a rendering scope will need.
    ///
    /// Names are deduplicated and assigned in sorted order, so the
    /// resulting mapping does not depend on submission order. Call this
    /// before handing the cache to concurrent readers.
    pub fn prepopulate<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pending: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .collect();
        pending.sort();
        pending.dedup();
        for name in pending {
            self.assign(&name);
        }
    }

    /// Color for a name if one is already assigned (curated or cached);
    /// never assigns.
    pub fn get(&self, name: &str) -> Option<Color> {
        if let Some(color) = self.table.match_color(name) {
            return Some(color.clone());
        }
        let state = self.state.read().unwrap();
        state.mapping.get(&normalize_name(name)).cloned()
    }

    /// Number of distinct names mapped (curated names excluded).
    pub fn len(&self) -> usize {
        self.state.read().unwrap().mapping.len()
    }

    /// Whether no names have been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every assignment, returning the cache to its freshly-created
    /// state. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.mapping.clear();
        state.used_colors.clear();
    }

    /// Usage counters.
    pub fn stats(&self) -> ColorCacheStats {
        ColorCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            curated_hits: self.curated_hits.load(Ordering::Relaxed),
            size: self.len(),
        }
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_is_idempotent() {
        let cache = ColorCache::new();
        let first = cache.assign("WW domain");
        for _ in 0..10 {
            assert_eq!(cache.assign("WW domain"), first);
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_normalization_merges_case_and_whitespace() {
        let cache = ColorCache::new();
        let a = cache.assign("WW domain");
        let b = cache.assign("  ww DOMAIN ");
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_names_distinct_colors_within_capacity() {
        let cache = ColorCache::new();
        let names: Vec<String> = (0..PALETTE.len()).map(|i| format!("domain-{i}")).collect();
        let mut seen = HashSet::new();
        for name in &names {
            assert!(seen.insert(cache.assign(name)), "collision for {name}");
        }
    }

    #[test]
    fn test_palette_exhaustion_accepts_duplicates() {
        let cache = ColorCache::new();
        for i in 0..PALETTE.len() + 5 {
            cache.assign(&format!("domain-{i}"));
        }
        // All palette colors used at least once, nothing panicked, and the
        // mapping kept every name.
        assert_eq!(cache.len(), PALETTE.len() + 5);
    }

    #[test]
    fn test_curated_name_bypasses_collision_tracking() {
        let cache = ColorCache::new();
        let kinase = cache.assign("Protein kinase domain");
        assert_eq!(kinase, Color::from(curated::ALERT_COLOR));
        // Curated assignments do not occupy the cache
        assert_eq!(cache.len(), 0);
        // The alert color is not reserved against hash assignments
        let stats = cache.stats();
        assert_eq!(stats.curated_hits, 1);
    }

    #[test]
    fn test_hash_matches_reference_values() {
        // h = h * 31 + char, truncated to i32
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_deterministic_across_fresh_caches() {
        let a = ColorCache::new();
        let b = ColorCache::new();
        for name in ["alpha", "beta", "gamma", "delta"] {
            assert_eq!(a.assign(name), b.assign(name));
        }
    }

    #[test]
    fn test_prepopulate_is_order_independent() {
        let forward = ColorCache::new();
        forward.prepopulate(["ankyrin", "bromodomain", "chromo shadow"]);

        let backward = ColorCache::new();
        backward.prepopulate(["chromo shadow", "bromodomain", "ankyrin"]);

        for name in ["ankyrin", "bromodomain", "chromo shadow"] {
            assert_eq!(forward.get(name), backward.get(name));
        }
    }

    #[test]
    fn test_prepopulate_dedupes() {
        let cache = ColorCache::new();
        cache.prepopulate(["x", "x", "X ", "y"]);
        // "x", "X " normalize apart only by case/trim handling inside
        // assign; two distinct normalized names remain
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_does_not_assign() {
        let cache = ColorCache::new();
        assert!(cache.get("unseen").is_none());
        assert!(cache.is_empty());
        cache.assign("unseen");
        assert!(cache.get("unseen").is_some());
    }

    #[test]
    fn test_clear_resets_assignments() {
        let cache = ColorCache::new();
        cache.assign("a");
        cache.assign("b");
        cache.clear();
        assert!(cache.is_empty());
        // After clearing, hash picks are available again
        let again = cache.assign("a");
        assert_eq!(again, Color::from(PALETTE[palette_index("a")]));
    }

    #[test]
    fn test_stats_counters() {
        let cache = ColorCache::new();
        cache.assign("one");
        cache.assign("one");
        cache.assign("Pkinase");
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.curated_hits, 1);
        assert_eq!(stats.size, 1);
    }
}
