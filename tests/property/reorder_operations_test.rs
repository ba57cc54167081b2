//! Property-based tests for reorder operations.
//!
//! For any subset of a section's links, submitted in any order, the listed
//! links take positions `0..k` in request order, unlisted links keep their
//! positions, and applying the same request twice changes nothing.

use std::collections::HashMap;
use std::sync::Arc;

use linkboard::database::Database;
use linkboard::services::board_service::{BoardService, BoardServiceTrait};
use linkboard::types::settings::BoardOptions;
use proptest::prelude::*;
use serde_json::{json, Value};

fn seeded(count: usize) -> (Arc<Database>, BoardService, i64, Vec<i64>) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let board = BoardService::new(db.clone(), BoardOptions::default()).expect("Failed to init board");
    let section = board.create_section("props", None).unwrap().id;
    let ids = (0..count)
        .map(|i| {
            board
                .add_link(section, &format!("t{}", i), &format!("https://example.com/{}", i), None)
                .unwrap()
                .id
        })
        .collect();
    (db, board, section, ids)
}

fn positions(db: &Database) -> HashMap<i64, i64> {
    db.transaction(|tx| {
        let mut stmt = tx.prepare("SELECT id, sort_order FROM links")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let map = rows.collect::<Result<HashMap<i64, i64>, rusqlite::Error>>()?;
        Ok::<_, rusqlite::Error>(map)
    })
    .unwrap()
}

/// Link count, then a shuffled subset of indices into the seeded links.
fn arb_request() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..8).prop_flat_map(|n| {
        let picks = proptest::sample::subsequence((0..n).collect::<Vec<_>>(), 0..=n)
            .prop_shuffle();
        (Just(n), picks)
    })
}

/// Noise a client might send next to real ids.
fn arb_noise() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(
        prop_oneof![
            Just(json!("undefined")),
            Just(json!("color")),
            Just(json!(null)),
            Just(json!(0)),
            Just(json!(-3)),
            Just(json!(1.5)),
        ],
        0..4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn reorder_assigns_request_indices((n, picks) in arb_request(), noise in arb_noise()) {
        let (db, board, section, ids) = seeded(n);
        let before = positions(&db);
        let chosen: Vec<i64> = picks.iter().map(|i| ids[*i]).collect();

        let mut request: Vec<Value> = chosen.iter().map(|id| json!(id)).collect();
        request.extend(noise);

        let result = board.reorder_links(section, &request);
        if chosen.is_empty() {
            prop_assert!(result.is_err());
            prop_assert_eq!(positions(&db), before);
            return Ok(());
        }
        prop_assert_eq!(result.unwrap(), chosen.len());

        let after = positions(&db);
        for (index, id) in chosen.iter().enumerate() {
            prop_assert_eq!(after[id], index as i64);
        }
        for id in ids.iter().filter(|id| !chosen.contains(id)) {
            prop_assert_eq!(after[id], before[id]);
        }
    }

    #[test]
    fn reorder_is_idempotent((n, picks) in arb_request()) {
        prop_assume!(!picks.is_empty());
        let (db, board, section, ids) = seeded(n);
        let request: Vec<Value> = picks.iter().map(|i| json!(ids[*i].to_string())).collect();

        board.reorder_links(section, &request).unwrap();
        let first = positions(&db);
        board.reorder_links(section, &request).unwrap();
        prop_assert_eq!(positions(&db), first);
    }

    #[test]
    fn repair_yields_dense_positions((n, picks) in arb_request()) {
        prop_assume!(!picks.is_empty());
        let (db, board, section, ids) = seeded(n);
        let request: Vec<Value> = picks.iter().map(|i| json!(ids[*i])).collect();
        board.reorder_links(section, &request).unwrap();

        let listed_before: Vec<i64> = board.get_section(section).unwrap().links.iter().map(|l| l.id).collect();
        board.repair_order().unwrap();
        let listed_after: Vec<i64> = board.get_section(section).unwrap().links.iter().map(|l| l.id).collect();
        prop_assert_eq!(&listed_before, &listed_after);

        let after = positions(&db);
        for (index, id) in listed_after.iter().enumerate() {
            prop_assert_eq!(after[id], index as i64);
        }
    }
}
