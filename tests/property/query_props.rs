//! Query property tests.
//!
//! Phrase and cover enumeration are compared against brute-force scans of
//! the token sequences; ranking is checked for ordering and determinism.

use fastsearch::{cover_score, Cursor, InvertedIndex, Position};
use proptest::prelude::*;

use crate::common::{
    brute_force_covers, brute_force_phrases, corpus_strategy, index_token_docs, query_strategy,
    TokenDoc,
};

// ============================================================================
// PHRASES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    /// Property: every phrase occurrence is found, in order, and nothing else.
    #[test]
    fn prop_phrases_match_oracle(docs in corpus_strategy(), phrase in query_strategy(3)) {
        let index = index_token_docs(&docs);
        let found = index.all_phrases(&phrase).unwrap();
        prop_assert_eq!(found, brute_force_phrases(&docs, &phrase));
    }

    /// Property: a match is consecutive offsets in one document and each
    /// position holds the matching term.
    #[test]
    fn prop_phrase_positions_hold_terms(docs in corpus_strategy(), phrase in query_strategy(3)) {
        let index = index_token_docs(&docs);
        let mut cursor = Cursor::Bof;
        loop {
            let found = index.next_phrase(&phrase, cursor).unwrap();
            let Some(&first) = found.first() else { break };
            prop_assert_eq!(found.len(), phrase.len());
            for (i, (p, term)) in found.iter().zip(&phrase).enumerate() {
                prop_assert_eq!(*p, Position::new(first.doc_id, first.offset + i as u32));
                prop_assert_eq!(index.find(term, *p).ok(), Some(*p));
            }
            // Matches advance strictly.
            prop_assert!(Cursor::At(first) > cursor);
            cursor = Cursor::At(first);
        }
    }
}

// ============================================================================
// COVERS
// ============================================================================

fn cover_bounds(covers: &[Vec<Position>]) -> Vec<(Position, Position)> {
    covers
        .iter()
        .map(|c| (c[0], *c.last().unwrap()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    /// Property: all_covers yields exactly the minimal windows.
    #[test]
    fn prop_covers_match_oracle(docs in corpus_strategy(), terms in query_strategy(3)) {
        let index = index_token_docs(&docs);
        let covers = index.all_covers(&terms).unwrap();
        prop_assert_eq!(cover_bounds(&covers), brute_force_covers(&docs, &terms));
    }

    /// Property: a cover has one position per distinct term, sorted, inside
    /// one document.
    #[test]
    fn prop_cover_shape(docs in corpus_strategy(), terms in query_strategy(4)) {
        let index = index_token_docs(&docs);
        let mut distinct = terms.clone();
        distinct.sort();
        distinct.dedup();

        for cover in index.all_covers(&terms).unwrap() {
            prop_assert_eq!(cover.len(), distinct.len());
            prop_assert!(cover.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(cover.iter().all(|p| p.same_doc(cover[0])));
            for term in &distinct {
                prop_assert!(cover.iter().any(|p| index.find(term, *p).is_ok()));
            }
        }
    }

    /// Property: query term order does not change covers.
    #[test]
    fn prop_cover_order_independent(docs in corpus_strategy(), terms in query_strategy(3)) {
        let index = index_token_docs(&docs);
        let mut reversed = terms.clone();
        reversed.reverse();
        prop_assert_eq!(index.all_covers(&terms).unwrap(), index.all_covers(&reversed).unwrap());
    }
}

// ============================================================================
// RANKING
// ============================================================================

fn query_text(terms: &[String]) -> String {
    terms.join(" ")
}

fn rebuild_shuffled(docs: &[TokenDoc]) -> InvertedIndex {
    let mut reversed = docs.to_vec();
    reversed.reverse();
    index_token_docs(&reversed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: scores are non-increasing, ties break by ascending doc id,
    /// and every score equals the sum over that document's covers.
    #[test]
    fn prop_ranking_consistent(docs in corpus_strategy(), terms in query_strategy(3)) {
        let index = index_token_docs(&docs);
        let scored = index.rank_proximity_scored(&query_text(&terms), usize::MAX).unwrap();
        let covers = index.all_covers(&terms).unwrap();

        for w in scored.windows(2) {
            prop_assert!(
                w[0].score > w[1].score || (w[0].score == w[1].score && w[0].doc_id < w[1].doc_id),
                "bad order: {:?}", w
            );
        }
        for doc in &scored {
            let expected: f64 = covers
                .iter()
                .filter(|c| c[0].doc_id == doc.doc_id)
                .map(|c| cover_score(c))
                .sum();
            prop_assert!((doc.score - expected).abs() < 1e-9);
        }
        let mut ranked_docs: Vec<u32> = scored.iter().map(|s| s.doc_id).collect();
        ranked_docs.sort_unstable();
        let mut cover_docs: Vec<u32> = covers.iter().map(|c| c[0].doc_id).collect();
        cover_docs.dedup();
        prop_assert_eq!(ranked_docs, cover_docs);
    }

    /// Property: ranking depends on content, not ingestion order, and a
    /// limit returns a prefix of the full ranking.
    #[test]
    fn prop_ranking_deterministic(
        docs in corpus_strategy(),
        terms in query_strategy(3),
        limit in 0usize..6,
    ) {
        let query = query_text(&terms);
        let a = index_token_docs(&docs).rank_proximity(&query, usize::MAX).unwrap();
        let b = rebuild_shuffled(&docs).rank_proximity(&query, usize::MAX).unwrap();
        prop_assert_eq!(&a, &b);

        let limited = index_token_docs(&docs).rank_proximity(&query, limit).unwrap();
        prop_assert_eq!(limited.as_slice(), &a[..limit.min(a.len())]);
    }
}
