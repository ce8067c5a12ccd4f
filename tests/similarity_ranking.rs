// tests/similarity_ranking.rs
//
// End-to-end similarity scoring and ranking through the public API, using
// the bundled taxonomy and default normalizer seed.

use scent_recommender::{Perfume, Recommender};

fn engine() -> Recommender<
    scent_recommender::CatalogNormalizer,
    scent_recommender::StaticNoteClassifier,
> {
    Recommender::with_defaults()
}

#[test]
fn oriental_pair_shares_notes_family_and_base() {
    let e = engine();
    let a = Perfume::new("a", "Amber Night")
        .family("Oriental")
        .top(&["Bergamot"])
        .base(&["Vanilla", "Musk"]);
    let b = Perfume::new("b", "Amber Dusk")
        .family("Oriental")
        .top(&["Bergamot"])
        .base(&["Vanilla"]);

    let s = e.similarity(&a, &b);

    // Shared notes: 2 of max(3, 2). Family: +0.5. Base: one match of two
    // slots. No dominant subcategories on either side.
    assert_eq!(s.shared_notes, vec!["bergamot", "vanilla"]);
    assert!(s.score > 0.5);
    assert_eq!(s.score, 0.64);
    assert_eq!(
        s.reasoning,
        vec![
            "2 shared notes: bergamot, vanilla",
            "Same fragrance family: Oriental",
            "Shared base notes: vanilla",
        ]
    );
}

#[test]
fn self_similarity_is_one_for_a_full_perfume() {
    let e = engine();
    let p = Perfume::new("p", "Signature")
        .family("Woody")
        .top(&["bergamot", "lemon"])
        .middle(&["jasmine"])
        .base(&["cedar", "sandalwood"]);
    assert_eq!(e.similarity(&p, &p).score, 1.0);
}

#[test]
fn ranking_sorts_descending_and_respects_limit() {
    let e = engine();
    let target = Perfume::new("t", "Target")
        .family("Fresh")
        .top(&["bergamot", "lemon"])
        .base(&["cedar"]);

    let candidates = vec![
        Perfume::new("far", "Far").family("Oriental").top(&["oud"]),
        Perfume::new("close", "Close")
            .family("Fresh")
            .top(&["bergamot", "lemon"])
            .base(&["cedar"]),
        Perfume::new("mid", "Mid")
            .family("Fresh")
            .top(&["bergamot"]),
    ];

    let hits = e.rank_by_similarity(&target, &candidates, 10);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].perfume.id, "close");
    assert_eq!(hits[1].perfume.id, "mid");
    assert_eq!(hits[2].perfume.id, "far");
    assert!(hits[0].similarity_score >= hits[1].similarity_score);
    assert!(hits[1].similarity_score >= hits[2].similarity_score);

    let top_one = e.rank_by_similarity(&target, &candidates, 1);
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].perfume.id, "close");
}

#[test]
fn normalized_wrapper_matches_clean_input_results() {
    let e = engine();

    let messy_target = Perfume::new("t", "Messy")
        .family("Oriental")
        .top(&["  Bergamot "])
        .base(&["VANILLA", "Musk"]);
    let messy_candidate = Perfume::new("c", "Messy Twin")
        .family("Oriental")
        .top(&["bergamot"])
        .base(&["Vanilla "]);

    let clean_target = Perfume::new("t", "Clean")
        .family("Oriental")
        .top(&["bergamot"])
        .base(&["vanilla", "musk"]);
    let clean_candidate = Perfume::new("c", "Clean Twin")
        .family("Oriental")
        .top(&["bergamot"])
        .base(&["vanilla"]);

    let messy = e.rank_by_similarity_normalized(&messy_target, &[messy_candidate], 10);
    let clean = e.rank_by_similarity(&clean_target, &[clean_candidate], 10);

    assert_eq!(messy[0].similarity_score, clean[0].similarity_score);
    assert_eq!(messy[0].shared_notes, clean[0].shared_notes);
}

#[test]
fn empty_candidate_list_yields_empty_ranking() {
    let e = engine();
    let target = Perfume::new("t", "Lonely").family("Fresh").top(&["lemon"]);
    assert!(e.rank_by_similarity(&target, &[], 10).is_empty());
}
