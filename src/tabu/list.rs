//! Tabu list with per-move ban counters.

use std::collections::HashMap;
use std::hash::Hash;

/// Short-term memory of recently applied moves.
///
/// Each banned signature carries the number of iterations it stays
/// forbidden. Banning a new move ages every other entry by one and
/// evicts those that reach zero, so a move stays tabu for exactly
/// `tenure` following iterations.
///
/// # Examples
///
/// ```
/// use u_itinerary::tabu::TabuList;
///
/// let mut list = TabuList::new(2);
/// list.ban("a");
/// list.ban("b");
/// assert!(list.is_tabu(&"a"));
/// list.ban("c");
/// assert!(!list.is_tabu(&"a"));
/// assert!(list.is_tabu(&"b"));
/// ```
#[derive(Debug, Clone)]
pub struct TabuList<K> {
    tenure: usize,
    bans: HashMap<K, usize>,
}

impl<K: Eq + Hash> TabuList<K> {
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            bans: HashMap::new(),
        }
    }

    pub fn tenure(&self) -> usize {
        self.tenure
    }

    pub fn is_tabu(&self, key: &K) -> bool {
        self.bans.contains_key(key)
    }

    /// Iterations left before `key` is allowed again.
    pub fn remaining(&self, key: &K) -> Option<usize> {
        self.bans.get(key).copied()
    }

    /// Ages all other bans by one iteration, then bans `key` for `tenure`.
    pub fn ban(&mut self, key: K) {
        self.bans.retain(|_, left| {
            *left -= 1;
            *left > 0
        });
        if self.tenure > 0 {
            self.bans.insert(key, self.tenure);
        }
    }

    /// Number of active bans.
    pub fn len(&self) -> usize {
        self.bans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bans.is_empty()
    }
}
