//! Property tests for ranking order over arbitrary insert sequences

use std::sync::Arc;

use proptest::prelude::*;

use quizrank::{
    db::MemoryRankingStore, handlers::ranking::RankingQuery, models::RankingEntry,
    services::RankingService,
};

fn insert_all(scores: &[i64]) -> (Vec<i64>, Vec<RankingEntry>) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let service = RankingService::new(Arc::new(MemoryRankingStore::new()));
        let mut placed = Vec::with_capacity(scores.len());
        for (i, score) in scores.iter().enumerate() {
            let entry = service
                .insert(&format!("P{i}"), "1A", *score as f64)
                .await
                .unwrap();
            placed.push(entry.position);
        }
        let entries = service.get_range(&RankingQuery::default()).await.unwrap();
        (placed, entries)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn positions_stay_dense(scores in prop::collection::vec(0i64..20, 1..40)) {
        let (_, entries) = insert_all(&scores);

        prop_assert_eq!(entries.len(), scores.len());
        for (index, entry) in entries.iter().enumerate() {
            prop_assert_eq!(entry.position, index as i64 + 1);
        }
    }

    #[test]
    fn order_matches_stable_sort_by_score(scores in prop::collection::vec(0i64..10, 1..40)) {
        let (_, entries) = insert_all(&scores);

        let mut expected: Vec<usize> = (0..scores.len()).collect();
        expected.sort_by_key(|&i| std::cmp::Reverse(scores[i]));
        let expected: Vec<String> = expected.into_iter().map(|i| format!("P{i}")).collect();

        let actual: Vec<String> = entries.into_iter().map(|entry| entry.name).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn reported_position_is_rank_at_insert_time(scores in prop::collection::vec(0i64..10, 1..30)) {
        let (placed, _) = insert_all(&scores);

        for (i, position) in placed.iter().enumerate() {
            let ahead = scores[..i].iter().filter(|&&earlier| earlier >= scores[i]).count();
            prop_assert_eq!(*position, ahead as i64 + 1);
        }
    }
}
