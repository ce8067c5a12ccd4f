// src/lib.rs
// Public library surface for integration tests (and embedding applications).
//
// Two stateless scoring pipelines over perfume note data:
// - pairwise similarity ("similar items"), and
// - collection match ("recommended for you"),
// both explained through human-readable reasoning lines. Pure, synchronous,
// side-effect-free; safe to call concurrently without locking.

pub mod classify;
pub mod collection;
pub mod engine;
pub mod matching;
pub mod normalize;
pub mod perfume;
pub mod profile;
pub mod score;
pub mod similarity;

// ---- Re-exports for stable public API ----
pub use crate::classify::{
    dominant_bucket, Classification, NoteClassifier, StaticNoteClassifier, COMPLEX_KEY,
};
pub use crate::collection::{
    InMemoryCollection, IntensityProfile, NoteCount, SubcategoryStat, UserCollection,
};
pub use crate::engine::{Recommender, SubcategoryInfo, DEFAULT_MAX_RESULTS};
pub use crate::matching::CollectionHit;
pub use crate::normalize::{CatalogNormalizer, NoteNormalizer};
pub use crate::perfume::{NoteTiers, Perfume};
pub use crate::profile::{ProfileSubcategory, UserProfile};
pub use crate::score::{round2, MatchScore, SimilarityScore};
pub use crate::similarity::SimilarityHit;
