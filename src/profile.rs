//! Preference profile derived from a user's collection.
//!
//! Profiles are ephemeral: recomputed on every call, never persisted. An
//! empty collection yields the sentinel profile (empty lists, intensity
//! "Unknown") rather than an error.

use crate::classify::NoteClassifier;
use crate::collection::UserCollection;
use crate::engine::Recommender;
use crate::normalize::NoteNormalizer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A subcategory counts as dominant when present in at least this share of
/// the collection's perfumes.
pub const DOMINANT_SUBCATEGORY_SHARE: f64 = 0.4;
/// A note counts as a signature when present in at least this share.
pub const SIGNATURE_NOTE_SHARE: f64 = 0.3;
/// Intensity preference of the empty-collection sentinel profile.
pub const UNKNOWN_INTENSITY: &str = "Unknown";

/// A subcategory the user's collection leans on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubcategory {
    pub key: String,
    pub name: String,
    pub family: String,
    pub count: usize,
}

/// Derived preference profile. See [`Recommender::build_profile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub dominant_subcategories: Vec<ProfileSubcategory>,
    pub signature_notes: Vec<String>,
    pub intensity_preference: String,
    pub collection_size: usize,
    pub family_distribution: BTreeMap<String, usize>,
}

impl UserProfile {
    /// Sentinel profile for an empty collection.
    pub fn empty() -> Self {
        Self {
            dominant_subcategories: Vec::new(),
            signature_notes: Vec::new(),
            intensity_preference: UNKNOWN_INTENSITY.to_string(),
            collection_size: 0,
            family_distribution: BTreeMap::new(),
        }
    }
}

impl<N: NoteNormalizer, C: NoteClassifier> Recommender<N, C> {
    /// Derive a preference profile from a collection.
    ///
    /// Dominant subcategories are those present in at least 40% of the
    /// collection's perfumes; signature notes in at least 30%. Both
    /// thresholds are `ceil(size * share)` with a floor of one perfume.
    pub fn build_profile(&self, collection: &impl UserCollection) -> UserProfile {
        let perfumes = collection.all_perfumes();
        if perfumes.is_empty() {
            return UserProfile::empty();
        }
        let size = perfumes.len();

        let subcategory_threshold = share_threshold(size, DOMINANT_SUBCATEGORY_SHARE);
        let note_threshold = share_threshold(size, SIGNATURE_NOTE_SHARE);

        let mut dominant: Vec<ProfileSubcategory> = Vec::new();
        for (_family, subcategories) in collection.subcategory_preferences() {
            for (key, stat) in subcategories {
                if stat.count >= subcategory_threshold {
                    dominant.push(ProfileSubcategory {
                        key,
                        name: stat.name,
                        family: stat.family,
                        count: stat.count,
                    });
                }
            }
        }

        // Popular-notes counts arrive pre-normalized from the collection.
        let signature_notes: Vec<String> = collection
            .most_popular_notes()
            .into_iter()
            .filter(|nc| nc.count >= note_threshold)
            .map(|nc| nc.note)
            .collect();

        debug!(
            collection_size = size,
            dominant = dominant.len(),
            signature = signature_notes.len(),
            "user profile built"
        );

        UserProfile {
            dominant_subcategories: dominant,
            signature_notes,
            intensity_preference: collection.intensity_profile().dominant_intensity,
            collection_size: size,
            family_distribution: collection.family_distribution(),
        }
    }
}

/// `ceil(size * share)`, never below one perfume.
fn share_threshold(size: usize, share: f64) -> usize {
    ((size as f64 * share).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::StaticNoteClassifier;
    use crate::collection::InMemoryCollection;
    use crate::normalize::CatalogNormalizer;
    use crate::perfume::Perfume;

    fn engine() -> Recommender<CatalogNormalizer, StaticNoteClassifier> {
        Recommender::with_defaults()
    }

    fn four_perfume_collection(
    ) -> InMemoryCollection<CatalogNormalizer, StaticNoteClassifier> {
        let mut col = InMemoryCollection::with_defaults();
        col.add(
            Perfume::new("p1", "Citrus Woods")
                .family("Woody")
                .top(&["Bergamot", "Lemon"])
                .middle(&["Jasmine"])
                .base(&["Cedar", "Sandalwood"]),
        );
        col.add(
            Perfume::new("p2", "Sunlit Grove")
                .family("Woody")
                .top(&["Bergamot", "Mandarin"])
                .middle(&["Rose"])
                .base(&["Cedar", "Vetiver"]),
        );
        col.add(
            Perfume::new("p3", "White Evening")
                .family("Floral")
                .top(&["Lemon"])
                .middle(&["Jasmine", "Tuberose"])
                .base(&["Musk"]),
        );
        col.add(
            Perfume::new("p4", "Ember Rose")
                .family("Oriental")
                .top(&["Orange"])
                .middle(&["Rose"])
                .base(&["Oud", "Incense"]),
        );
        col
    }

    #[test]
    fn empty_collection_yields_sentinel_profile() {
        let e = engine();
        let col = InMemoryCollection::with_defaults();
        let profile = e.build_profile(&col);
        assert!(profile.dominant_subcategories.is_empty());
        assert!(profile.signature_notes.is_empty());
        assert_eq!(profile.intensity_preference, UNKNOWN_INTENSITY);
        assert_eq!(profile.collection_size, 0);
    }

    #[test]
    fn thresholds_are_ceiled_with_floor_one() {
        assert_eq!(share_threshold(1, 0.4), 1);
        assert_eq!(share_threshold(3, 0.4), 2);
        assert_eq!(share_threshold(4, 0.4), 2);
        assert_eq!(share_threshold(4, 0.3), 2);
        assert_eq!(share_threshold(10, 0.3), 3);
    }

    #[test]
    fn dominant_subcategories_meet_the_forty_percent_share() {
        let e = engine();
        let profile = e.build_profile(&four_perfume_collection());
        let keys: Vec<&str> = profile
            .dominant_subcategories
            .iter()
            .map(|s| s.key.as_str())
            .collect();
        // Families iterate alphabetically, subcategory keys within them too.
        assert_eq!(keys, vec!["ROSY", "WHITE_FLORAL", "CITRUS", "WOODY"]);
        assert_eq!(profile.dominant_subcategories[2].count, 4);
    }

    #[test]
    fn signature_notes_meet_the_thirty_percent_share() {
        let e = engine();
        let profile = e.build_profile(&four_perfume_collection());
        assert_eq!(
            profile.signature_notes,
            vec!["bergamot", "cedar", "jasmine", "lemon", "rose"]
        );
    }

    #[test]
    fn intensity_and_distribution_pass_through() {
        let e = engine();
        let profile = e.build_profile(&four_perfume_collection());
        assert_eq!(profile.intensity_preference, "Medium");
        assert_eq!(profile.collection_size, 4);
        assert_eq!(profile.family_distribution.get("Woody"), Some(&2));
        assert_eq!(profile.family_distribution.get("Oriental"), Some(&1));
    }
}
