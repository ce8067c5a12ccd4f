//! # Recommendation Engine Core
//! Pure, testable scoring over immutable catalog inputs. No I/O; the note
//! normalizer and classifier collaborators are injected at construction, so
//! every call path only reads its inputs and allocates local results.
//!
//! Shared helpers live here: note extraction, dominant-subcategory
//! aggregation, and perfume intensity. The two scoring pipelines build on
//! them in `similarity` and `matching`.

use crate::classify::{dominant_bucket, NoteClassifier, StaticNoteClassifier};
use crate::normalize::{CatalogNormalizer, NoteNormalizer};
use crate::perfume::Perfume;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default truncation for ranking wrappers.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A subcategory is dominant within one perfume's notes when at least this
/// many classifiable notes fall into it. A fixed count, not a fraction.
pub const DOMINANCE_MIN_NOTES: usize = 2;

/// A dominant subcategory with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryInfo {
    pub key: String,
    pub name: String,
    pub family: String,
}

/// The scoring engine: stateless beyond its two injected collaborators.
#[derive(Debug, Clone)]
pub struct Recommender<N, C> {
    pub(crate) normalizer: N,
    pub(crate) classifier: C,
}

impl<N: NoteNormalizer, C: NoteClassifier> Recommender<N, C> {
    pub fn new(normalizer: N, classifier: C) -> Self {
        Self {
            normalizer,
            classifier,
        }
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// All notes of a perfume, normalized: top, then middle, then base,
    /// intra-tier order preserved. Missing tiers are empty.
    pub fn all_notes(&self, perfume: &Perfume) -> Vec<String> {
        let mut all: Vec<String> = Vec::with_capacity(perfume.notes.len());
        all.extend(perfume.notes.top.iter().cloned());
        all.extend(perfume.notes.middle.iter().cloned());
        all.extend(perfume.notes.base.iter().cloned());
        self.normalizer.normalize_array(&all)
    }

    /// Subcategories that at least [`DOMINANCE_MIN_NOTES`] classifiable notes
    /// in `notes` fall into, in first-occurrence order. The `COMPLEX`
    /// sentinel never counts. Input is re-normalized; normalization is
    /// idempotent, so already-normalized notes pass through unchanged.
    pub fn dominant_subcategories(&self, notes: &[String]) -> Vec<SubcategoryInfo> {
        let normalized = self.normalizer.normalize_array(notes);

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut info: HashMap<String, SubcategoryInfo> = HashMap::new();

        for note in &normalized {
            let c = self.classifier.classify_note(note);
            if c.is_complex() {
                continue;
            }
            if !counts.contains_key(&c.subcategory_key) {
                order.push(c.subcategory_key.clone());
            }
            *counts.entry(c.subcategory_key.clone()).or_insert(0) += 1;
            // Last observation wins; classification is key-deterministic in
            // practice, so this is stable.
            info.insert(
                c.subcategory_key.clone(),
                SubcategoryInfo {
                    key: c.subcategory_key,
                    name: c.subcategory,
                    family: c.family,
                },
            );
        }

        order
            .into_iter()
            .filter(|key| counts[key] >= DOMINANCE_MIN_NOTES)
            .filter_map(|key| info.remove(&key))
            .collect()
    }

    /// Dominant intensity bucket over a perfume's full note list. Ties keep
    /// the earlier bucket; empty or all-complex input defaults to Medium.
    pub fn perfume_intensity(&self, perfume: &Perfume) -> String {
        let notes = self.all_notes(perfume);
        dominant_bucket(&self.classifier.intensity_profile(&notes))
    }

    /// Run every candidate through the normalizer, returning new values.
    pub fn normalize_candidates(&self, candidates: &[Perfume]) -> Vec<Perfume> {
        candidates
            .iter()
            .map(|p| self.normalizer.normalize_perfume_notes(p))
            .collect()
    }
}

impl Recommender<CatalogNormalizer, StaticNoteClassifier> {
    /// Engine wired to the bundled taxonomy, with the classifier's canonical
    /// notes feeding the normalizer's fuzzy vocabulary.
    pub fn with_defaults() -> Self {
        let classifier = StaticNoteClassifier::bundled();
        let normalizer =
            CatalogNormalizer::default_seed().with_vocabulary(classifier.known_notes());
        Self::new(normalizer, classifier)
    }
}

impl Default for Recommender<CatalogNormalizer, StaticNoteClassifier> {
    fn default() -> Self {
        Self::with_defaults()
    }
}
