// tests/collection_recommendations.rs
//
// End-to-end collection-based recommendations: profile derivation from an
// in-memory collection, match scoring, and ranking.

use scent_recommender::{InMemoryCollection, Perfume, Recommender};

fn engine() -> Recommender<
    scent_recommender::CatalogNormalizer,
    scent_recommender::StaticNoteClassifier,
> {
    Recommender::with_defaults()
}

fn collection() -> InMemoryCollection<
    scent_recommender::CatalogNormalizer,
    scent_recommender::StaticNoteClassifier,
> {
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
    col
}

#[test]
fn profile_reflects_the_collection() {
    let e = engine();
    let profile = e.build_profile(&collection());

    assert_eq!(profile.collection_size, 3);
    assert_eq!(profile.intensity_preference, "Medium");
    // 40% of three perfumes, ceiled: present in at least two.
    let keys: Vec<&str> = profile
        .dominant_subcategories
        .iter()
        .map(|s| s.key.as_str())
        .collect();
    assert_eq!(keys, vec!["WHITE_FLORAL", "CITRUS", "WOODY"]);
}

#[test]
fn candidate_close_to_the_collection_scores_high() {
    let e = engine();
    let profile = e.build_profile(&collection());

    let candidate = Perfume::new("c", "Kindred")
        .family("Woody")
        .top(&["Bergamot", "Lemon"])
        .middle(&["Jasmine", "Tuberose"])
        .base(&["Cedar", "Sandalwood"]);
    let m = e.match_score(&candidate, &profile);

    assert!(m.score > 0.5, "expected a strong match, got {:?}", m);
    assert!(m
        .reasoning
        .iter()
        .any(|r| r == "Matches your Citrus preference"));
    assert!(m
        .reasoning
        .iter()
        .any(|r| r == "Matches your White Floral preference"));
}

#[test]
fn ranking_prefers_profile_aligned_candidates() {
    let e = engine();
    let col = collection();

    let aligned = Perfume::new("aligned", "Aligned")
        .family("Woody")
        .top(&["Bergamot", "Lemon"])
        .middle(&["Jasmine", "Tuberose"])
        .base(&["Cedar", "Sandalwood"]);
    let outsider = Perfume::new("outsider", "Outsider")
        .family("Oriental")
        .top(&["Cinnamon"])
        .base(&["Oud", "Amber"]);

    let hits = e.rank_by_collection(&col, &[outsider.clone(), aligned.clone()], 10);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].perfume.id, "aligned");
    assert!(hits[0].match_score > hits[1].match_score);

    let top_one = e.rank_by_collection(&col, &[outsider, aligned], 1);
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].perfume.id, "aligned");
}

#[test]
fn empty_collection_never_divides_by_zero() {
    let e = engine();
    let empty = InMemoryCollection::with_defaults();
    let profile = e.build_profile(&empty);
    assert_eq!(profile.intensity_preference, "Unknown");

    let candidate = Perfume::new("c", "Any")
        .family("Fresh")
        .top(&["bergamot", "lemon"]);
    let m = e.match_score(&candidate, &profile);
    // Only intensity (0.2) and complementary (0.1) are applicable; neither
    // fires against the sentinel profile.
    assert_eq!(m.score, 0.0);
    assert_eq!(
        m.reasoning,
        vec!["Different style - might offer nice variety!".to_string()]
    );

    let hits = e.rank_by_collection(&empty, &[candidate], 10);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].match_score, 0.0);
}

#[test]
fn normalized_wrapper_cleans_messy_candidates() {
    let e = engine();
    let col = collection();

    let messy = Perfume::new("m", "Messy")
        .family("Woody")
        .top(&["  BERGAMOT ", "Lemon"])
        .middle(&["Jasmine"])
        .base(&["Cedarwood", "Sandalwood"]);
    let clean = Perfume::new("m", "Clean")
        .family("Woody")
        .top(&["bergamot", "lemon"])
        .middle(&["jasmine"])
        .base(&["cedar", "sandalwood"]);

    let from_messy = e.rank_by_collection_normalized(&col, &[messy], 10);
    let from_clean = e.rank_by_collection(&col, &[clean], 10);
    assert_eq!(from_messy[0].match_score, from_clean[0].match_score);
    assert_eq!(from_messy[0].reasoning, from_clean[0].reasoning);
}
