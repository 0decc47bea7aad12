#![cfg(feature = "std")]

//! Keyed match storage with an atomic read-modify-write primitive.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::core::{GameError, Match, MatchId};

/// Storage for match aggregates.
///
/// [`MatchRepository::update`] is the only way callers should mutate a
/// stored match: a separate `get` then `put` lets two concurrent fires race
/// and silently drop one of them.
pub trait MatchRepository: Send + Sync {
    /// Copy of the stored match.
    fn get(&self, id: &str) -> Option<Match>;

    /// Insert or replace a match under its own id.
    fn put(&self, game: Match);

    /// Apply `f` to the stored match under that match's lock.
    ///
    /// `f` works on a copy which is written back only when it returns `Ok`,
    /// so a refused operation never leaves partial changes behind.
    fn update<T, F>(&self, id: &str, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Match) -> Result<T, GameError>;
}

/// Process-local repository: one mutex per match behind a shared index.
#[derive(Default)]
pub struct InMemoryMatchRepository {
    matches: RwLock<HashMap<MatchId, Arc<Mutex<Match>>>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: &str) -> Option<Arc<Mutex<Match>>> {
        self.matches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}

impl MatchRepository for InMemoryMatchRepository {
    fn get(&self, id: &str) -> Option<Match> {
        let slot = self.slot(id)?;
        let game = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Some(game.clone())
    }

    fn put(&self, game: Match) {
        if let Some(slot) = self.slot(game.id()) {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = game;
            return;
        }
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        match matches.get(game.id()) {
            Some(slot) => *slot.lock().unwrap_or_else(PoisonError::into_inner) = game,
            None => {
                matches.insert(game.id().to_owned(), Arc::new(Mutex::new(game)));
            }
        }
    }

    fn update<T, F>(&self, id: &str, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Match) -> Result<T, GameError>,
    {
        let slot = self
            .slot(id)
            .ok_or_else(|| GameError::MatchNotFound(id.to_owned()))?;
        let mut stored = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let mut working = stored.clone();
        let value = f(&mut working)?;
        *stored = working;
        Ok(value)
    }
}
