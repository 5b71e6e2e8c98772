use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh identifiers for meetings, users, messages and polls.
/// Injected wherever ids are minted so tests can run deterministically.
pub trait IdSource: Send + Sync {
    fn mint(&self) -> String;
}

/// Default collision-resistant source backed by random UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn mint(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic counter source for tests.
#[derive(Debug, Default)]
pub struct SequentialSource {
    next: AtomicU64,
}

impl SequentialSource {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdSource for SequentialSource {
    fn mint(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_source_mints_distinct_ids() {
        let ids = UuidSource;
        assert_ne!(ids.mint(), ids.mint());
    }

    #[test]
    fn sequential_source_counts_up() {
        let ids = SequentialSource::starting_at(7);
        assert_eq!(ids.mint(), "7");
        assert_eq!(ids.mint(), "8");
    }
}
