//! Score accumulation shared by both scoring pipelines.
//!
//! Every factor reports the weight it earned and the maximum it could have
//! earned; the final score is `earned / max` rounded to two decimals. A
//! factor with no applicable data adds to neither side, so thin input never
//! drags the ratio toward zero.

use serde::{Deserialize, Serialize};

/// Pairwise similarity verdict: 0-1 score, the literal matched note strings,
/// and one human-readable line per scoring factor that fired (in evaluation
/// order, not importance order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub score: f64,
    pub shared_notes: Vec<String>,
    pub reasoning: Vec<String>,
}

/// Collection match verdict: 0-1 score plus reasoning lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: f64,
    pub reasoning: Vec<String>,
}

/// Accumulator threaded through a scoring pass, finalized into an immutable
/// result. `factor` records one weighted factor; `reason` one explanation.
#[derive(Debug, Clone, Default)]
pub struct ScoreAcc {
    earned: f64,
    max: f64,
    reasoning: Vec<String>,
}

impl ScoreAcc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a factor that earned `earned` out of `max` possible weight.
    pub fn factor(&mut self, earned: f64, max: f64) {
        self.earned += earned;
        self.max += max;
    }

    pub fn reason(&mut self, message: impl Into<String>) {
        self.reasoning.push(message.into());
    }

    /// Ratio of earned to applicable maximum, rounded to two decimals.
    /// Zero when no factor was applicable (guards the division).
    pub fn ratio(&self) -> f64 {
        if self.max > 0.0 {
            round2(self.earned / self.max)
        } else {
            0.0
        }
    }

    pub fn into_reasoning(self) -> Vec<String> {
        self.reasoning
    }
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
