#![cfg(feature = "std")]

mod common;

use std::sync::Arc;
use std::thread;

use broadside::{
    FieldService, GameError, InMemoryMatchRepository, Match, MatchRepository, PlayerSlot,
    Transition,
};
use common::{coord, started_match, water_cells, ALICE, BOB};

#[test]
fn put_then_get_returns_a_copy() {
    let repo = InMemoryMatchRepository::new();
    assert!(repo.is_empty());
    repo.put(started_match(false));
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get("m1"), Some(started_match(false)));
    assert_eq!(repo.get("nope"), None);
}

#[test]
fn put_replaces_existing_match() {
    let repo = InMemoryMatchRepository::new();
    let Transition { outcome: fresh, .. } = Match::start("m1", ALICE, false, 0);
    repo.put(fresh);
    repo.put(started_match(false));
    assert_eq!(repo.len(), 1);
    assert!(repo.get("m1").unwrap().players_ready());
}

#[test]
fn update_of_unknown_match_fails() {
    let repo = InMemoryMatchRepository::new();
    let err = repo.update("ghost", |_| Ok(())).unwrap_err();
    assert_eq!(err, GameError::MatchNotFound("ghost".into()));
}

#[test]
fn failed_update_leaves_no_trace() {
    let repo = InMemoryMatchRepository::new();
    let Transition { outcome: game, .. } = Match::start("m1", ALICE, false, 0);
    repo.put(game.clone());

    let result: Result<(), GameError> = repo.update("m1", |game| {
        game.join(BOB)?;
        Err(GameError::MatchNotStarted)
    });
    assert_eq!(result, Err(GameError::MatchNotStarted));
    assert_eq!(repo.get("m1"), Some(game));
}

#[test]
fn concurrent_fires_on_one_turn_accept_exactly_one() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    repo.put(started_match(false));

    let handles: Vec<_> = water_cells()
        .into_iter()
        .take(16)
        .map(|target| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                repo.update("m1", |game| {
                    game.fire(ALICE, target, &FieldService::new(), 0)
                })
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == GameError::NotPlayersTurn(ALICE.into())));

    let game = repo.get("m1").unwrap();
    assert_eq!(game.turn(), PlayerSlot::Two);
    assert_eq!(game.board(PlayerSlot::Two).unwrap().hits().len(), 1);
}

#[test]
fn alternating_updates_from_many_threads_lose_nothing() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    repo.put(started_match(false));
    let targets = water_cells();

    let handles: Vec<_> = [ALICE, BOB]
        .into_iter()
        .map(|player| {
            let repo = Arc::clone(&repo);
            let targets = targets.clone();
            thread::spawn(move || {
                let mut next = 0;
                while next < 20 {
                    let target = targets[next];
                    match repo.update("m1", |game| {
                        game.fire(player, target, &FieldService::new(), 0)
                    }) {
                        Ok(_) => next += 1,
                        Err(GameError::NotPlayersTurn(_)) => thread::yield_now(),
                        Err(e) => panic!("unexpected error {e}"),
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let game = repo.get("m1").unwrap();
    assert_eq!(game.turn(), PlayerSlot::One);
    assert_eq!(game.board(PlayerSlot::One).unwrap().hits().len(), 20);
    assert_eq!(game.board(PlayerSlot::Two).unwrap().hits().len(), 20);
    assert!(game
        .board(PlayerSlot::Two)
        .unwrap()
        .cell_at(coord("B1"))
        .unwrap()
        .is_hit());
}
