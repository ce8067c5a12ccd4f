//! Pairwise similarity between two perfumes.
//!
//! Four factors feed one earned/max accumulator: shared notes (the main
//! factor), fragrance-family equality, shared base notes, and the
//! dominant-subcategory relationship. The final score is the two-decimal
//! ratio of earned weight to the applicable maximum.

use crate::classify::NoteClassifier;
use crate::engine::Recommender;
use crate::normalize::NoteNormalizer;
use crate::perfume::Perfume;
use crate::score::{ScoreAcc, SimilarityScore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bonus for an exactly equal fragrance family label.
pub const FAMILY_BONUS: f64 = 0.5;
/// Bonus per matched base note; base notes carry the drydown.
pub const BASE_NOTE_BONUS: f64 = 0.2;
/// Bonus when both perfumes share a dominant subcategory.
pub const SAME_SUBCATEGORY_BONUS: f64 = 0.3;
/// Bonus when their dominant subcategories are complementary.
pub const COMPLEMENTARY_BONUS: f64 = 0.2;

/// One ranked similarity result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub perfume: Perfume,
    pub similarity_score: f64,
    pub shared_notes: Vec<String>,
    pub reasoning: Vec<String>,
}

struct SubcategoryBonus {
    score: f64,
    reasoning: Option<String>,
}

impl<N: NoteNormalizer, C: NoteClassifier> Recommender<N, C> {
    /// Score how similar two perfumes are on a 0-1 scale.
    ///
    /// Symmetric in the shared-notes and family terms. The subcategory bonus
    /// scans `a`'s dominant subcategories outer and `b`'s inner, so swapping
    /// arguments can pick a different relationship pair (see
    /// `subcategory_bonus` below).
    pub fn similarity(&self, a: &Perfume, b: &Perfume) -> SimilarityScore {
        let mut acc = ScoreAcc::new();
        let mut shared_notes: Vec<String> = Vec::new();

        let notes_a = self.all_notes(a);
        let notes_b = self.all_notes(b);

        // 1) Shared notes (main factor). Duplicates in `a` each count when
        //    matched; no de-duplication against `b`.
        let lower_b: Vec<String> = notes_b.iter().map(|n| n.to_lowercase()).collect();
        let matched: Vec<String> = notes_a
            .iter()
            .filter(|n| lower_b.contains(&n.to_lowercase()))
            .cloned()
            .collect();
        acc.factor(
            matched.len() as f64,
            notes_a.len().max(notes_b.len()) as f64,
        );
        if !matched.is_empty() {
            acc.reason(format!(
                "{} shared notes: {}",
                matched.len(),
                matched.join(", ")
            ));
        }
        shared_notes.extend(matched);

        // 2) Fragrance family bonus (exact label equality).
        if a.fragrance_family == b.fragrance_family {
            acc.factor(FAMILY_BONUS, FAMILY_BONUS);
            acc.reason(format!("Same fragrance family: {}", a.fragrance_family));
        } else {
            acc.factor(0.0, FAMILY_BONUS);
        }

        // 3) Base notes weigh extra.
        let base_a = self.normalizer.normalize_array(&a.notes.base);
        let base_b = self.normalizer.normalize_array(&b.notes.base);
        let lower_base_b: Vec<String> = base_b.iter().map(|n| n.to_lowercase()).collect();
        let base_matched: Vec<&String> = base_a
            .iter()
            .filter(|n| lower_base_b.contains(&n.to_lowercase()))
            .collect();
        if !base_matched.is_empty() {
            acc.reason(format!(
                "Shared base notes: {}",
                base_matched
                    .iter()
                    .map(|n| n.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        acc.factor(
            BASE_NOTE_BONUS * base_matched.len() as f64,
            BASE_NOTE_BONUS * base_a.len().max(base_b.len()) as f64,
        );

        // 4) Subcategory relationship.
        let bonus = self.subcategory_bonus(&notes_a, &notes_b);
        acc.factor(bonus.score, SAME_SUBCATEGORY_BONUS);
        if let Some(line) = bonus.reasoning {
            acc.reason(line);
        }

        let score = acc.ratio();
        SimilarityScore {
            score,
            shared_notes,
            reasoning: acc.into_reasoning(),
        }
    }

    /// Nested early-exit scan over both dominant-subcategory sets: for each
    /// pair in order, a same-key hit wins 0.3 and a complementary hit wins
    /// 0.2, and scanning stops at the first hit of either kind. A
    /// complementary pair early in the order can therefore shadow a same-key
    /// pair later in it; that asymmetry is long-standing ranking behavior,
    /// kept intact.
    fn subcategory_bonus(&self, notes_a: &[String], notes_b: &[String]) -> SubcategoryBonus {
        let subs_a = self.dominant_subcategories(notes_a);
        let subs_b = self.dominant_subcategories(notes_b);

        for sa in &subs_a {
            for sb in &subs_b {
                if sa.key == sb.key {
                    return SubcategoryBonus {
                        score: SAME_SUBCATEGORY_BONUS,
                        reasoning: Some(format!("Both have {} characteristics", sa.name)),
                    };
                }
                if self
                    .classifier
                    .complementary_subcategories(&sa.key)
                    .contains(&sb.key)
                {
                    return SubcategoryBonus {
                        score: COMPLEMENTARY_BONUS,
                        reasoning: Some(format!("{} complements {}", sa.name, sb.name)),
                    };
                }
            }
        }

        SubcategoryBonus {
            score: 0.0,
            reasoning: None,
        }
    }

    /// Score every candidate against `target`, highest first. The sort is
    /// stable, so ties keep candidate order; truncated to `limit`.
    pub fn rank_by_similarity(
        &self,
        target: &Perfume,
        candidates: &[Perfume],
        limit: usize,
    ) -> Vec<SimilarityHit> {
        let mut hits: Vec<SimilarityHit> = candidates
            .iter()
            .map(|candidate| {
                let s = self.similarity(target, candidate);
                SimilarityHit {
                    perfume: candidate.clone(),
                    similarity_score: s.score,
                    shared_notes: s.shared_notes,
                    reasoning: s.reasoning,
                }
            })
            .collect();
        hits.sort_by(|x, y| y.similarity_score.total_cmp(&x.similarity_score));
        hits.truncate(limit);
        debug!(
            target_id = %target.id,
            candidates = candidates.len(),
            returned = hits.len(),
            "similarity ranking done"
        );
        hits
    }

    /// Ranking variant that runs the target and every candidate through the
    /// normalizer first. Raw catalog rows often carry inconsistent casing or
    /// spelling; normalization is idempotent, so double-normalizing is safe.
    pub fn rank_by_similarity_normalized(
        &self,
        target: &Perfume,
        candidates: &[Perfume],
        limit: usize,
    ) -> Vec<SimilarityHit> {
        let target = self.normalizer.normalize_perfume_notes(target);
        let candidates = self.normalize_candidates(candidates);
        self.rank_by_similarity(&target, &candidates, limit)
    }
}
