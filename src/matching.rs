//! Match scoring of a candidate perfume against a user preference profile.
//!
//! Four weighted factors: subcategory overlap (0.4), signature notes (0.3),
//! intensity compatibility (0.2), and complementary expansion (0.1). The
//! first two only add their weight to the applicable maximum when the
//! profile carries data for them, so a thin profile cannot drag the ratio
//! toward zero.

use crate::classify::NoteClassifier;
use crate::collection::UserCollection;
use crate::engine::{Recommender, SubcategoryInfo};
use crate::normalize::NoteNormalizer;
use crate::perfume::Perfume;
use crate::profile::{ProfileSubcategory, UserProfile};
use crate::score::{MatchScore, ScoreAcc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SUBCATEGORY_WEIGHT: f64 = 0.4;
pub const SIGNATURE_NOTE_WEIGHT: f64 = 0.3;
pub const INTENSITY_WEIGHT: f64 = 0.2;
pub const COMPLEMENTARY_WEIGHT: f64 = 0.1;

/// Reasoning line when no factor produced one.
pub const VARIETY_FALLBACK: &str = "Different style - might offer nice variety!";

/// One ranked collection-match result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionHit {
    pub perfume: Perfume,
    pub match_score: f64,
    pub reasoning: Vec<String>,
}

impl<N: NoteNormalizer, C: NoteClassifier> Recommender<N, C> {
    /// Score how well a candidate matches a derived profile, 0-1 scale.
    pub fn match_score(&self, candidate: &Perfume, profile: &UserProfile) -> MatchScore {
        let mut acc = ScoreAcc::new();

        let candidate_notes = self.all_notes(candidate);
        let candidate_subcategories = self.dominant_subcategories(&candidate_notes);

        // 1) Subcategory overlap: fraction of the profile's dominant
        //    subcategories the candidate shares.
        let mut subcategory_matches = 0usize;
        for user_subcat in &profile.dominant_subcategories {
            if candidate_subcategories
                .iter()
                .any(|c| c.key == user_subcat.key)
            {
                subcategory_matches += 1;
                acc.reason(format!("Matches your {} preference", user_subcat.name));
            }
        }
        if !profile.dominant_subcategories.is_empty() {
            let fraction =
                subcategory_matches as f64 / profile.dominant_subcategories.len() as f64;
            acc.factor(fraction * SUBCATEGORY_WEIGHT, SUBCATEGORY_WEIGHT);
        }

        // 2) Signature notes, re-normalized before comparison.
        let lower_candidate: Vec<String> =
            candidate_notes.iter().map(|n| n.to_lowercase()).collect();
        let mut note_matches = 0usize;
        for signature in &profile.signature_notes {
            let normalized = self.normalizer.normalize(signature);
            if lower_candidate.contains(&normalized.to_lowercase()) {
                note_matches += 1;
                acc.reason(format!("Contains your signature note: {normalized}"));
            }
        }
        if !profile.signature_notes.is_empty() {
            let fraction = note_matches as f64 / profile.signature_notes.len() as f64;
            acc.factor(fraction * SIGNATURE_NOTE_WEIGHT, SIGNATURE_NOTE_WEIGHT);
        }

        // 3) Intensity compatibility; always applicable.
        let candidate_intensity = self.perfume_intensity(candidate);
        if candidate_intensity == profile.intensity_preference {
            acc.factor(INTENSITY_WEIGHT, INTENSITY_WEIGHT);
            acc.reason(format!(
                "Matches your {} intensity preference",
                profile.intensity_preference
            ));
        } else {
            acc.factor(0.0, INTENSITY_WEIGHT);
        }

        // 4) Complementary expansion; always applicable, first hit wins.
        if let Some(reason) =
            self.complementary_match(&candidate_subcategories, &profile.dominant_subcategories)
        {
            acc.factor(COMPLEMENTARY_WEIGHT, COMPLEMENTARY_WEIGHT);
            acc.reason(format!("Complements your style: {reason}"));
        } else {
            acc.factor(0.0, COMPLEMENTARY_WEIGHT);
        }

        let score = acc.ratio();
        let mut reasoning = acc.into_reasoning();
        if reasoning.is_empty() {
            reasoning.push(VARIETY_FALLBACK.to_string());
        }
        MatchScore { score, reasoning }
    }

    /// Scan the profile's dominant subcategories outer and the candidate's
    /// inner; the first candidate subcategory found in a profile
    /// subcategory's complementary set wins. Scan order is load-bearing for
    /// which reasoning line appears.
    fn complementary_match(
        &self,
        candidate_subcategories: &[SubcategoryInfo],
        user_subcategories: &[ProfileSubcategory],
    ) -> Option<String> {
        for user in user_subcategories {
            let complements = self.classifier.complementary_subcategories(&user.key);
            for candidate in candidate_subcategories {
                if complements.contains(&candidate.key) {
                    return Some(format!(
                        "{} complements your {} style",
                        candidate.name, user.name
                    ));
                }
            }
        }
        None
    }

    /// Build one profile from `collection`, score every candidate against
    /// it, highest first (stable sort), truncated to `limit`.
    pub fn rank_by_collection(
        &self,
        collection: &impl UserCollection,
        candidates: &[Perfume],
        limit: usize,
    ) -> Vec<CollectionHit> {
        let profile = self.build_profile(collection);
        let mut hits: Vec<CollectionHit> = candidates
            .iter()
            .map(|candidate| {
                let m = self.match_score(candidate, &profile);
                CollectionHit {
                    perfume: candidate.clone(),
                    match_score: m.score,
                    reasoning: m.reasoning,
                }
            })
            .collect();
        hits.sort_by(|x, y| y.match_score.total_cmp(&x.match_score));
        hits.truncate(limit);
        debug!(
            collection_size = profile.collection_size,
            candidates = candidates.len(),
            returned = hits.len(),
            "collection ranking done"
        );
        hits
    }

    /// Ranking variant that runs every candidate through the normalizer
    /// first (the collection's own analytics already normalize).
    pub fn rank_by_collection_normalized(
        &self,
        collection: &impl UserCollection,
        candidates: &[Perfume],
        limit: usize,
    ) -> Vec<CollectionHit> {
        let candidates = self.normalize_candidates(candidates);
        self.rank_by_collection(collection, &candidates, limit)
    }
}
