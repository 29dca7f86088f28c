//! The virtual clock (C1) — a singleton "current day" set by an operator.
//! No history is kept; `get` always returns the last committed `set`, or
//! 0 if none has ever run (spec.md §3, §4.1).

use campaign_core::types::Day;
use std::sync::RwLock;

pub struct ClockStore {
    current_day: RwLock<Day>,
}

impl Default for ClockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockStore {
    pub fn new() -> Self {
        Self {
            current_day: RwLock::new(0),
        }
    }

    pub fn get(&self) -> Day {
        *self
            .current_day
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Overwrites the current day. Monotonicity is an operator contract,
    /// not enforced here (spec.md §4.1 only requires the overwrite to be
    /// globally visible after commit).
    pub fn set(&self, day: Day) {
        let mut guard = self
            .current_day
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = day;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_zero() {
        let clock = ClockStore::new();
        assert_eq!(clock.get(), 0);
    }

    #[test]
    fn set_overwrites() {
        let clock = ClockStore::new();
        clock.set(5);
        assert_eq!(clock.get(), 5);
        clock.set(3);
        assert_eq!(clock.get(), 3);
    }
}
