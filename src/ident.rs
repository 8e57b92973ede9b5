//! Instance identifiers for `SyncSet`.
//!
//! Every `SyncSet` draws an identifier from an [`InstanceCounter`] when it is
//! constructed, cloned included. Binary operations lock the operand with the
//! lower identifier first, so any two threads locking the same pair of sets
//! agree on the order and cannot wait on each other in a cycle.

use std::sync::atomic::{AtomicU64, Ordering};

/// The counter backing `SyncSet::new` and every set cloned from one.
pub static GLOBAL_COUNTER: InstanceCounter = InstanceCounter::starting_at(1);

/// The identifier of an individual `SyncSet`.
///
/// Identifiers taken from the same counter are unique for the lifetime of the
/// process. Their values carry no meaning beyond their relative order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A thread-safe source of strictly increasing instance identifiers.
///
/// `u64` identifiers do not wrap around in practice: a process handing out a
/// billion identifiers per second would need over 500 years.
#[derive(Debug)]
pub struct InstanceCounter {
    next: AtomicU64,
}

impl InstanceCounter {

    /// Creates a counter whose first identifier is `baseline`.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::InstanceCounter;
    ///
    /// static COUNTER: InstanceCounter = InstanceCounter::starting_at(100);
    ///
    /// assert_eq!(100, COUNTER.next_id().id());
    /// assert_eq!(101, COUNTER.next_id().id());
    /// ```
    pub const fn starting_at(baseline: u64) -> InstanceCounter {
        InstanceCounter { next: AtomicU64::new(baseline) }
    }

    /// Takes the next identifier; the counter is incremented exactly once.
    pub fn next_id(&self) -> InstanceId {
        // Only uniqueness is required; no other memory is published through
        // the counter.
        InstanceId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod test {

    use std::collections::HashSet;

    use crossbeam_utils::thread;

    use super::InstanceCounter;

    #[test]
    fn check_ids_increase() {
        let counter = InstanceCounter::starting_at(7);
        let first = counter.next_id();
        let second = counter.next_id();

        assert_eq!(7, first.id());
        assert!(first < second);
    }

    #[test]
    fn check_ids_unique_across_threads() {
        let counter = InstanceCounter::starting_at(0);

        let ids: Vec<Vec<u64>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|_| (0..1000).map(|_| counter.next_id().id()).collect()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        }).unwrap();

        let unique: HashSet<u64> = ids.iter().flatten().copied().collect();
        assert_eq!(8000, unique.len());
        assert_eq!(Some(&7999), unique.iter().max());
    }
}
