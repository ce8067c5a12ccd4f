//! # Note Normalization
//!
//! Canonicalizes free-text scent note strings so catalog rows with
//! inconsistent casing, punctuation, or spelling compare cleanly.
//!
//! - Cleanup: trim, lowercase, hyphen/underscore folding, punctuation strip,
//!   whitespace collapse.
//! - Aliases map alternative spellings to canonical note names.
//! - Optional fuzzy fallback (Jaro-Winkler) against a known vocabulary.
//! - Lookup order: cleanup → vocabulary exact → alias → fuzzy → cleaned as-is.
//!
//! Normalization is deterministic and idempotent: normalizing an already
//! normalized note returns it unchanged.

use crate::perfume::{NoteTiers, Perfume};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Minimum Jaro-Winkler similarity for the fuzzy vocabulary fallback.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.92;

static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N} ]+").expect("punct regex"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("spaces regex"));

/// Canonicalization contract consumed by the scoring core. Implementations
/// must be deterministic and idempotent.
pub trait NoteNormalizer {
    fn normalize(&self, note: &str) -> String;

    /// Element-wise, order-preserving.
    fn normalize_array(&self, notes: &[String]) -> Vec<String> {
        notes.iter().map(|n| self.normalize(n)).collect()
    }

    /// Returns a perfume with all three note tiers normalized; every other
    /// field is untouched.
    fn normalize_perfume_notes(&self, perfume: &Perfume) -> Perfume {
        Perfume {
            notes: NoteTiers {
                top: self.normalize_array(&perfume.notes.top),
                middle: self.normalize_array(&perfume.notes.middle),
                base: self.normalize_array(&perfume.notes.base),
            },
            ..perfume.clone()
        }
    }
}

/// Configurable normalizer: alias table plus an optional vocabulary for the
/// fuzzy fallback. Loads from JSON or starts from the built-in seed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogNormalizer {
    /// Aliases mapping non-canonical spellings → canonical note names.
    #[serde(default)]
    aliases: HashMap<String, String>,
    /// Known-good note names; enables the fuzzy fallback when non-empty.
    #[serde(default)]
    vocabulary: Vec<String>,
}

impl CatalogNormalizer {
    /// Parse from a JSON string (`{"aliases": {...}, "vocabulary": [...]}`).
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let n: Self = serde_json::from_str(json)?;
        Ok(n)
    }

    /// Load from a JSON file. Falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_json_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Built-in alias seed for common alternative spellings. No vocabulary;
    /// combine with [`CatalogNormalizer::with_vocabulary`] to enable fuzzy
    /// matching.
    pub fn default_seed() -> Self {
        let aliases = [
            ("cedarwood", "cedar"),
            ("cedar wood", "cedar"),
            ("oudh", "oud"),
            ("agarwood", "oud"),
            ("tonka", "tonka bean"),
            ("vanilla bean", "vanilla"),
            ("lemon zest", "lemon"),
            ("orange peel", "orange"),
            ("mandarin orange", "mandarin"),
            ("muguet", "lily of the valley"),
        ]
        .into_iter()
        .map(|(a, c)| (a.to_string(), c.to_string()))
        .collect();
        Self {
            aliases,
            vocabulary: Vec::new(),
        }
    }

    /// Replace the fuzzy-match vocabulary (builder style). Entries are run
    /// through cleanup so idempotence holds regardless of the source.
    pub fn with_vocabulary<I, S>(mut self, vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vocabulary = vocabulary.into_iter().map(|v| cleanup(v.as_ref())).collect();
        self
    }
}

impl NoteNormalizer for CatalogNormalizer {
    fn normalize(&self, note: &str) -> String {
        let cleaned = cleanup(note);

        // 1) Already canonical.
        if self.vocabulary.iter().any(|v| v == &cleaned) {
            return cleaned;
        }

        // 2) Alias resolution.
        if let Some(canonical) = self.aliases.get(&cleaned) {
            return cleanup(canonical);
        }

        // 3) Fuzzy fallback against the vocabulary (best match wins).
        if !cleaned.is_empty() {
            let mut best: Option<(&String, f64)> = None;
            for v in &self.vocabulary {
                let sim = strsim::jaro_winkler(&cleaned, v);
                if sim >= FUZZY_MATCH_THRESHOLD && best.map_or(true, |(_, b)| sim > b) {
                    best = Some((v, sim));
                }
            }
            if let Some((v, _)) = best {
                return v.clone();
            }
        }

        // 4) Keep the cleaned input.
        cleaned
    }
}

/// Case, punctuation, and whitespace canonicalization. Idempotent.
fn cleanup(note: &str) -> String {
    let lowered = note.trim().to_lowercase();
    let dashed = lowered.replace(['-', '_', '/'], " ");
    let stripped = PUNCT.replace_all(&dashed, "");
    let collapsed = SPACES.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
