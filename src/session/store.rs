//! In-memory visit registry
//!
//! Visits are keyed by an opaque random token carried in a cookie or
//! header. Nothing is persisted; a restart forgets every visit.

use super::machine::VisitMachine;
use rand::Rng;
use rand_distr::Alphanumeric;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct VisitToken(pub String);

impl VisitToken {
    pub fn generate() -> VisitToken {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        VisitToken(random_string)
    }
}

struct VisitEntry {
    machine: VisitMachine,
    last_seen: Instant,
}

#[derive(Default)]
pub struct VisitStore {
    visits: HashMap<VisitToken, VisitEntry>,
}

impl VisitStore {
    pub fn new() -> VisitStore {
        VisitStore::default()
    }

    /// Creates a fresh visit and returns its token.
    pub fn begin(&mut self) -> VisitToken {
        let token = VisitToken::generate();
        self.visits.insert(
            token.clone(),
            VisitEntry {
                machine: VisitMachine::new(),
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Looks up a visit and refreshes its idle timestamp.
    pub fn get_mut(&mut self, token: &VisitToken) -> Option<&mut VisitMachine> {
        self.visits.get_mut(token).map(|entry| {
            entry.last_seen = Instant::now();
            &mut entry.machine
        })
    }

    pub fn contains(&self, token: &VisitToken) -> bool {
        self.visits.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Drops visits idle for longer than `max_idle`, returning the
    /// removed count.
    pub fn prune_idle(&mut self, max_idle: Duration) -> usize {
        let before = self.visits.len();
        let now = Instant::now();
        self.visits
            .retain(|_, entry| now.duration_since(entry.last_seen) <= max_idle);
        before - self.visits.len()
    }
}
