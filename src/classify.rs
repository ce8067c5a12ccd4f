//! # Note Classification
//!
//! Maps a normalized note to a scent subcategory (stable key, display name,
//! parent family), exposes the complementary-subcategory relation, and
//! buckets notes by intensity.
//!
//! The default implementation is backed by a TOML taxonomy. A bundled
//! taxonomy ships inside the crate; a custom file can be pointed to via
//! `SCENT_TAXONOMY_PATH` (defaults to `config/taxonomy.toml`).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Sentinel subcategory key: "not attributable to a single subcategory".
pub const COMPLEX_KEY: &str = "COMPLEX";
/// Intensity bucket for unclassifiable notes; dominant-bucket selection
/// skips it.
pub const COMPLEX_BUCKET: &str = "Complex";
/// Default bucket when a note list is empty or fully tied.
pub const DEFAULT_INTENSITY: &str = "Medium";
/// Selectable intensity buckets, in reporting order.
pub const INTENSITY_BUCKETS: [&str; 3] = ["Light", "Medium", "Heavy"];

pub const DEFAULT_TAXONOMY_PATH: &str = "config/taxonomy.toml";
pub const ENV_TAXONOMY_PATH: &str = "SCENT_TAXONOMY_PATH";

/// Result of classifying one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub subcategory_key: String,
    pub subcategory: String,
    pub family: String,
}

impl Classification {
    /// The sentinel classification for unknown/blended notes.
    pub fn complex() -> Self {
        Self {
            subcategory_key: COMPLEX_KEY.to_string(),
            subcategory: "Complex".to_string(),
            family: "Complex".to_string(),
        }
    }

    pub fn is_complex(&self) -> bool {
        self.subcategory_key == COMPLEX_KEY
    }
}

/// Taxonomy contract consumed by the scoring core.
pub trait NoteClassifier {
    /// Classify one normalized note. Unknown notes yield the `COMPLEX`
    /// sentinel, never an error.
    fn classify_note(&self, note: &str) -> Classification;

    /// Subcategory keys that pair well with `key`. Queried in one direction
    /// per call site; the relation is not assumed symmetric.
    fn complementary_subcategories(&self, key: &str) -> Vec<String>;

    /// Ordered intensity bucket counts for a note list: Light, Medium,
    /// Heavy, then the trailing Complex bucket for unclassifiable notes.
    fn intensity_profile(&self, notes: &[String]) -> Vec<(String, usize)>;
}

/// Pick the bucket with the strictly highest count, skipping `Complex`.
/// Ties keep the earlier bucket; an empty or all-complex profile defaults
/// to `Medium`.
pub fn dominant_bucket(profile: &[(String, usize)]) -> String {
    let mut dominant = DEFAULT_INTENSITY.to_string();
    let mut max = 0usize;
    for (bucket, count) in profile {
        if bucket == COMPLEX_BUCKET {
            continue;
        }
        if *count > max {
            max = *count;
            dominant = bucket.clone();
        }
    }
    dominant
}

/* ----------------------------
Taxonomy schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyRoot {
    pub subcategories: Vec<SubcategoryCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubcategoryCfg {
    pub key: String,
    pub name: String,
    pub family: String,
    /// "Light" | "Medium" | "Heavy"
    pub intensity: String,
    pub notes: Vec<String>,
    #[serde(default)]
    pub complements: Vec<String>,
}

/// Static TOML-backed classifier with an O(1) note lookup index.
#[derive(Debug, Clone)]
pub struct StaticNoteClassifier {
    cfg: TaxonomyRoot,
    /// normalized note → index into `cfg.subcategories`
    by_note: HashMap<String, usize>,
}

static BUNDLED: Lazy<StaticNoteClassifier> = Lazy::new(|| {
    StaticNoteClassifier::from_toml_str(include_str!("../config/taxonomy.toml"))
        .expect("valid bundled taxonomy")
});

impl StaticNoteClassifier {
    /// The taxonomy bundled with the crate.
    pub fn bundled() -> Self {
        BUNDLED.clone()
    }

    /// Load from a TOML file. Uses SCENT_TAXONOMY_PATH or defaults to
    /// "config/taxonomy.toml".
    pub fn from_toml() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_TAXONOMY_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TAXONOMY_PATH));

        let content = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read taxonomy at {}: {}", path.display(), e)
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: TaxonomyRoot = toml::from_str(toml_str)?;

        let mut by_note: HashMap<String, usize> = HashMap::new();
        for (idx, sc) in cfg.subcategories.iter().enumerate() {
            if !INTENSITY_BUCKETS.contains(&sc.intensity.as_str()) {
                anyhow::bail!(
                    "subcategory `{}` has unknown intensity `{}`",
                    sc.key,
                    sc.intensity
                );
            }
            for note in &sc.notes {
                if by_note.insert(note.clone(), idx).is_some() {
                    anyhow::bail!("note `{}` is assigned to more than one subcategory", note);
                }
            }
        }

        info!(
            subcategories = cfg.subcategories.len(),
            notes = by_note.len(),
            "scent taxonomy loaded"
        );
        Ok(Self { cfg, by_note })
    }

    /// Every canonical note name the taxonomy knows, in taxonomy order.
    /// Handy as a normalizer vocabulary.
    pub fn known_notes(&self) -> Vec<String> {
        self.cfg
            .subcategories
            .iter()
            .flat_map(|sc| sc.notes.iter().cloned())
            .collect()
    }

    fn lookup(&self, note: &str) -> Option<&SubcategoryCfg> {
        let key = note.trim().to_lowercase();
        self.by_note.get(&key).map(|&idx| &self.cfg.subcategories[idx])
    }
}

impl NoteClassifier for StaticNoteClassifier {
    fn classify_note(&self, note: &str) -> Classification {
        match self.lookup(note) {
            Some(sc) => Classification {
                subcategory_key: sc.key.clone(),
                subcategory: sc.name.clone(),
                family: sc.family.clone(),
            },
            None => Classification::complex(),
        }
    }

    fn complementary_subcategories(&self, key: &str) -> Vec<String> {
        self.cfg
            .subcategories
            .iter()
            .find(|sc| sc.key == key)
            .map(|sc| sc.complements.clone())
            .unwrap_or_default()
    }

    fn intensity_profile(&self, notes: &[String]) -> Vec<(String, usize)> {
        let mut counts = [0usize; 3];
        let mut complex = 0usize;
        for note in notes {
            match self.lookup(note) {
                Some(sc) => {
                    // intensity validated at load time
                    if let Some(pos) = INTENSITY_BUCKETS.iter().position(|b| *b == sc.intensity) {
                        counts[pos] += 1;
                    }
                }
                None => complex += 1,
            }
        }
        INTENSITY_BUCKETS
            .iter()
            .zip(counts)
            .map(|(b, c)| (b.to_string(), c))
            .chain(std::iter::once((COMPLEX_BUCKET.to_string(), complex)))
            .collect()
    }
}
