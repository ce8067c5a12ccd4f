//! User collection read contract consumed by the profile builder, plus an
//! in-memory implementation for embedding applications and tests.
//!
//! Analytics are presence-based: a subcategory or note counts once per
//! perfume containing it, so counts compare directly against collection-size
//! thresholds.

use crate::classify::{dominant_bucket, NoteClassifier, INTENSITY_BUCKETS};
use crate::normalize::NoteNormalizer;
use crate::perfume::Perfume;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-subcategory presence count across a collection, with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryStat {
    pub count: usize,
    pub name: String,
    pub family: String,
}

/// Collection-wide intensity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityProfile {
    pub dominant_intensity: String,
    /// Perfume counts per dominant bucket.
    #[serde(default)]
    pub counts: BTreeMap<String, usize>,
}

/// A normalized note and the number of collection perfumes containing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCount {
    pub note: String,
    pub count: usize,
}

/// Read contract the profile builder consumes. Ordered maps keep profile
/// derivation deterministic; the scans downstream are order-dependent.
pub trait UserCollection {
    fn all_perfumes(&self) -> Vec<Perfume>;

    /// family → subcategory key → presence stats.
    fn subcategory_preferences(&self) -> BTreeMap<String, BTreeMap<String, SubcategoryStat>>;

    fn intensity_profile(&self) -> IntensityProfile;

    /// Normalized notes with presence counts, most frequent first.
    fn most_popular_notes(&self) -> Vec<NoteCount>;

    /// Perfume counts per fragrance family label.
    fn family_distribution(&self) -> BTreeMap<String, usize>;
}

/// Straightforward in-memory collection computing its analytics on demand
/// through an injected normalizer and classifier.
#[derive(Debug, Clone)]
pub struct InMemoryCollection<N, C> {
    perfumes: Vec<Perfume>,
    normalizer: N,
    classifier: C,
}

impl<N: NoteNormalizer, C: NoteClassifier> InMemoryCollection<N, C> {
    pub fn new(normalizer: N, classifier: C) -> Self {
        Self {
            perfumes: Vec::new(),
            normalizer,
            classifier,
        }
    }

    pub fn add(&mut self, perfume: Perfume) {
        self.perfumes.push(perfume);
    }

    pub fn len(&self) -> usize {
        self.perfumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perfumes.is_empty()
    }

    /// Normalized notes of one perfume, first occurrence only, tier order
    /// preserved.
    fn unique_notes(&self, perfume: &Perfume) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tier in [
            &perfume.notes.top,
            &perfume.notes.middle,
            &perfume.notes.base,
        ] {
            for note in tier {
                let normalized = self.normalizer.normalize(note);
                if !out.contains(&normalized) {
                    out.push(normalized);
                }
            }
        }
        out
    }
}

impl InMemoryCollection<crate::normalize::CatalogNormalizer, crate::classify::StaticNoteClassifier> {
    /// Collection wired to the bundled taxonomy and default alias seed.
    pub fn with_defaults() -> Self {
        let classifier = crate::classify::StaticNoteClassifier::bundled();
        let normalizer =
            crate::normalize::CatalogNormalizer::default_seed().with_vocabulary(classifier.known_notes());
        Self::new(normalizer, classifier)
    }
}

impl<N: NoteNormalizer, C: NoteClassifier> UserCollection for InMemoryCollection<N, C> {
    fn all_perfumes(&self) -> Vec<Perfume> {
        self.perfumes.clone()
    }

    fn subcategory_preferences(&self) -> BTreeMap<String, BTreeMap<String, SubcategoryStat>> {
        let mut out: BTreeMap<String, BTreeMap<String, SubcategoryStat>> = BTreeMap::new();
        for perfume in &self.perfumes {
            // Unique subcategories for this perfume; one perfume counts once.
            let mut seen: Vec<crate::classify::Classification> = Vec::new();
            for note in self.unique_notes(perfume) {
                let c = self.classifier.classify_note(&note);
                if c.is_complex() || seen.iter().any(|s| s.subcategory_key == c.subcategory_key) {
                    continue;
                }
                seen.push(c);
            }
            for c in seen {
                let stat = out
                    .entry(c.family.clone())
                    .or_default()
                    .entry(c.subcategory_key.clone())
                    .or_insert_with(|| SubcategoryStat {
                        count: 0,
                        name: c.subcategory.clone(),
                        family: c.family.clone(),
                    });
                stat.count += 1;
            }
        }
        out
    }

    fn intensity_profile(&self) -> IntensityProfile {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for perfume in &self.perfumes {
            let notes = self.unique_notes(perfume);
            let dominant = dominant_bucket(&self.classifier.intensity_profile(&notes));
            *counts.entry(dominant).or_insert(0) += 1;
        }
        // Re-order for dominance selection: first-seen-on-tie over the fixed
        // bucket order.
        let ordered: Vec<(String, usize)> = INTENSITY_BUCKETS
            .iter()
            .map(|b| (b.to_string(), counts.get(*b).copied().unwrap_or(0)))
            .collect();
        IntensityProfile {
            dominant_intensity: dominant_bucket(&ordered),
            counts,
        }
    }

    fn most_popular_notes(&self) -> Vec<NoteCount> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for perfume in &self.perfumes {
            for note in self.unique_notes(perfume) {
                *counts.entry(note).or_insert(0) += 1;
            }
        }
        let mut out: Vec<NoteCount> = counts
            .into_iter()
            .map(|(note, count)| NoteCount { note, count })
            .collect();
        // Descending by count; the BTreeMap source makes ties alphabetical.
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }

    fn family_distribution(&self) -> BTreeMap<String, usize> {
        let mut out: BTreeMap<String, usize> = BTreeMap::new();
        for perfume in &self.perfumes {
            if perfume.fragrance_family.is_empty() {
                continue;
            }
            *out.entry(perfume.fragrance_family.clone()).or_insert(0) += 1;
        }
        out
    }
}
