//! In-memory adapters for the repository ports.
//!
//! One [`InMemoryStore`] backs users, restaurants and votes together so that
//! reference checks, the one-vote-per-day rule and cascading user deletes
//! behave like the PostgreSQL schema. Each repository call holds the store
//! lock for its whole check-and-write, which keeps it atomic. Used when no
//! database is configured and throughout the test suites.

mod restaurants;
mod users;
mod votes;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Restaurant, User, Vote};

/// Shared state behind the in-memory repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i32, User>,
    restaurants: BTreeMap<i32, Restaurant>,
    votes: BTreeMap<i32, Vote>,
    user_seq: i32,
    restaurant_seq: i32,
    vote_seq: i32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state, recovering from poisoning; writes never leave it
    /// half-applied.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Advance a sequence and return the next identifier, starting at 1.
fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}
