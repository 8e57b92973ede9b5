use std::collections::HashSet;
use std::fmt::{Debug, Formatter, Error};
use std::hash::Hash;
use std::ptr;

use parking_lot::{RwLock, RwLockReadGuard};

#[cfg(any(test, feature = "quickcheck_generators"))]
use quickcheck::{Arbitrary, Gen};

use crate::ident::{InstanceCounter, InstanceId, GLOBAL_COUNTER};
use crate::set::Set;
use crate::SetAlgebra;

/// A set which may be shared between threads.
///
/// Every instance owns a reader/writer lock over its elements: mutations take
/// the writer lock, queries the reader lock. Operations combining two
/// instances take both reader locks, lowest instance identifier first, so
/// `a.union(&b)` and `b.union(&a)` may run concurrently without deadlocking.
///
/// Elements are never lent out; listing returns an owned copy.
///
/// ### Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use ezset::{SetAlgebra, SyncSet};
///
/// let a = Arc::new(SyncSet::from(vec![1, 2, 3]));
/// let b = Arc::new(SyncSet::from(vec![3, 4]));
///
/// let (a2, b2) = (a.clone(), b.clone());
/// let handle = thread::spawn(move || b2.union(&a2).len());
///
/// assert_eq!(4, a.union(&b).len());
/// assert_eq!(4, handle.join().unwrap());
/// ```
pub struct SyncSet<T> {
    id: InstanceId,
    counter: &'static InstanceCounter,
    elements: RwLock<HashSet<T>>,
}

// Both reader guards of a binary operation.
//
// Fields drop in declaration order: the guard acquired last is released first.
struct ReadPair<'a, T> {
    higher: Option<RwLockReadGuard<'a, HashSet<T>>>,
    lower: RwLockReadGuard<'a, HashSet<T>>,
    // Whether `lower` guards the right-hand operand.
    swapped: bool,
}

impl <'a, T> ReadPair<'a, T> {
    fn lhs(&self) -> &HashSet<T> {
        match (self.swapped, &self.higher) {
            (true, Some(higher)) => &**higher,
            _ => &*self.lower,
        }
    }

    fn rhs(&self) -> &HashSet<T> {
        match (self.swapped, &self.higher) {
            (false, Some(higher)) => &**higher,
            _ => &*self.lower,
        }
    }
}

impl <T : Hash + Eq> SyncSet<T> {

    /// Create a new, empty set identified by the global counter.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::SyncSet;
    ///
    /// let set = SyncSet::<i32>::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> SyncSet<T> {
        SyncSet::with_counter(&GLOBAL_COUNTER)
    }

    /// Create a new, empty set identified by `counter`.
    ///
    /// Clones of the set are identified by the same counter.
    pub fn with_counter(counter: &'static InstanceCounter) -> SyncSet<T> {
        SyncSet::from_parts(counter, HashSet::new())
    }

    /// Create a new, empty set whose element type is that of `sample`.
    ///
    /// `sample` is not inserted.
    pub fn of(_sample: &T) -> SyncSet<T> {
        SyncSet::new()
    }

    /// Insert an element; returns false if it was already present.
    pub fn insert(&self, element: T) -> bool {
        self.elements.write().insert(element)
    }

    /// Insert every element of `elements` under a single writer lock.
    ///
    /// `elements` is drained before the lock is taken.
    pub fn insert_all<I>(&self, elements: I) where I: IntoIterator<Item = T> {
        let elements: Vec<T> = elements.into_iter().collect();
        self.elements.write().extend(elements);
    }

    /// Remove an element; returns false if it was absent.
    pub fn remove(&self, element: &T) -> bool {
        self.elements.write().remove(element)
    }

    /// Remove every element of `elements` under a single writer lock; absent
    /// elements are ignored.
    pub fn remove_all<'a, I>(&self, elements: I)
        where I: IntoIterator<Item = &'a T>, T: 'a
    {
        let elements: Vec<&T> = elements.into_iter().collect();
        let mut guard = self.elements.write();
        for element in elements {
            guard.remove(element);
        }
    }

    /// Returns true if the set contains the value.
    pub fn contains(&self, value: &T) -> bool {
        self.elements.read().contains(value)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Remove every element.
    pub fn clear(&self) {
        self.elements.write().clear()
    }

    /// Returns a copy of the elements, in no particular order.
    pub fn to_vec(&self) -> Vec<T> where T: Clone {
        self.elements.read().iter().cloned().collect()
    }

    /// Returns a copy of the elements as an unsynchronized `Set`.
    pub fn to_set(&self) -> Set<T> where T: Clone {
        Set::from(self.elements.read().clone())
    }

    /// Consumes the set, returning its elements as an unsynchronized `Set`.
    pub fn into_set(self) -> Set<T> {
        Set::from(self.elements.into_inner())
    }

    fn from_parts(counter: &'static InstanceCounter, elements: HashSet<T>) -> SyncSet<T> {
        let id = counter.next_id();
        tracing::trace!(id = id.id(), "new sync set");
        SyncSet { id, counter, elements: RwLock::new(elements) }
    }

    // Takes the reader locks of `self` and `other`, lowest identifier first.
    //
    // Identifiers drawn from distinct counters may collide; the address then
    // breaks the tie, and stays stable while both sets are borrowed. A set
    // combined with itself is locked once: a second shared acquisition may
    // queue behind a waiting writer and never be granted.
    fn read_pair<'a>(&'a self, other: &'a SyncSet<T>) -> ReadPair<'a, T> {
        if ptr::eq(self, other) {
            return ReadPair { higher: None, lower: self.elements.read(), swapped: false };
        }

        let swapped = other.lock_key() < self.lock_key();
        let (lower, higher) = if swapped { (other, self) } else { (self, other) };

        let lower = lower.elements.read();
        let higher = Some(higher.elements.read());
        ReadPair { higher, lower, swapped }
    }

    fn lock_key(&self) -> (InstanceId, usize) {
        (self.id, self as *const SyncSet<T> as usize)
    }
}

impl <T : Hash + Eq + Clone> SetAlgebra for SyncSet<T> {

    type Item = T;

    fn intersection(&self, other: &SyncSet<T>) -> SyncSet<T> {
        let pair = self.read_pair(other);
        let lhs = pair.lhs();
        let elements: HashSet<T> = pair.rhs().iter().filter(|e| lhs.contains(*e)).cloned().collect();
        drop(pair);
        SyncSet::from_parts(self.counter, elements)
    }

    fn union(&self, other: &SyncSet<T>) -> SyncSet<T> {
        let pair = self.read_pair(other);
        let mut elements = pair.lhs().clone();
        elements.extend(pair.rhs().iter().cloned());
        drop(pair);
        SyncSet::from_parts(self.counter, elements)
    }

    fn difference(&self, other: &SyncSet<T>) -> SyncSet<T> {
        let pair = self.read_pair(other);
        let rhs = pair.rhs();
        let elements: HashSet<T> = pair.lhs().iter().filter(|e| !rhs.contains(*e)).cloned().collect();
        drop(pair);
        SyncSet::from_parts(self.counter, elements)
    }

    /// Locks both operands like the other binary operations.
    fn complement(&self, other: &SyncSet<T>) -> SyncSet<T> {
        let pair = self.read_pair(other);
        let lhs = pair.lhs();
        let elements: HashSet<T> = pair.rhs().iter().filter(|e| !lhs.contains(*e)).cloned().collect();
        drop(pair);
        SyncSet::from_parts(self.counter, elements)
    }

    fn is_subset(&self, other: &SyncSet<T>) -> bool {
        let pair = self.read_pair(other);
        is_subset(pair.lhs(), pair.rhs())
    }

    fn is_superset(&self, other: &SyncSet<T>) -> bool {
        let pair = self.read_pair(other);
        is_subset(pair.rhs(), pair.lhs())
    }

    /// Both inclusions are checked against a single snapshot of each operand.
    fn is_equal(&self, other: &SyncSet<T>) -> bool {
        let pair = self.read_pair(other);
        is_subset(pair.lhs(), pair.rhs()) && is_subset(pair.rhs(), pair.lhs())
    }
}

fn is_subset<T : Hash + Eq>(lhs: &HashSet<T>, rhs: &HashSet<T>) -> bool {
    if lhs.len() > rhs.len() { return false; }
    lhs.iter().all(|e| rhs.contains(e))
}

impl <T : Hash + Eq> Default for SyncSet<T> {
    fn default() -> SyncSet<T> {
        SyncSet::new()
    }
}

impl <T : Hash + Eq> From<Vec<T>> for SyncSet<T> {
    fn from(elements: Vec<T>) -> SyncSet<T> {
        elements.into_iter().collect()
    }
}

impl <T : Hash + Eq> From<Set<T>> for SyncSet<T> {
    fn from(set: Set<T>) -> SyncSet<T> {
        SyncSet::from_parts(&GLOBAL_COUNTER, HashSet::from(set))
    }
}

impl <T : Hash + Eq> FromIterator<T> for SyncSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> SyncSet<T> {
        SyncSet::from_parts(&GLOBAL_COUNTER, iter.into_iter().collect())
    }
}

/// Exclusive access needs no locking.
impl <T : Hash + Eq> Extend<T> for SyncSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.get_mut().extend(iter)
    }
}

impl <T : Hash + Eq + Clone> PartialEq for SyncSet<T> {
    fn eq(&self, other: &SyncSet<T>) -> bool {
        self.is_equal(other)
    }
}

impl <T : Hash + Eq + Clone> Eq for SyncSet<T> {}

impl <T : Debug> Debug for SyncSet<T> {
     fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
         f.debug_set().entries(self.elements.read().iter()).finish()
     }
}

/// The clone holds a copy of the elements and a fresh identifier.
impl <T : Hash + Eq + Clone> Clone for SyncSet<T> {
    fn clone(&self) -> SyncSet<T> {
        let elements = self.elements.read().clone();
        SyncSet::from_parts(self.counter, elements)
    }
}

#[cfg(any(test, feature = "quickcheck_generators"))]
impl <T : Arbitrary + Eq + Hash> Arbitrary for SyncSet<T> {
    fn arbitrary(g: &mut Gen) -> SyncSet<T> {
        let elements: Vec<T> = Arbitrary::arbitrary(g);
        elements.into_iter().collect()
    }
    fn shrink(&self) -> Box<dyn Iterator<Item = SyncSet<T>>> {
        Box::new(self.to_vec().shrink().map(|es| es.into_iter().collect::<SyncSet<T>>()))
    }
}

#[cfg(test)]
mod test {

    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crossbeam_utils::thread;
    use quickcheck_macros::quickcheck;

    use crate::ident::InstanceCounter;
    use crate::set::Set;
    use crate::test::{sorted, PanickyHash};
    use crate::SetAlgebra;
    use super::SyncSet;

    #[test]
    fn check_construction_deduplicates() {
        let set = SyncSet::from(vec![1, 2, 3, 2, 1]);
        assert_eq!(3, set.len());
        assert_eq!(vec![1, 2, 3], sorted(set.to_vec()));
    }

    #[test]
    fn check_unary_operations() {
        let set = SyncSet::of(&0u32);
        assert!(set.insert(1));
        assert!(!set.insert(1));
        set.insert_all(vec![2, 3, 4]);
        assert!(set.remove(&2));
        assert!(!set.remove(&2));
        set.remove_all(&[3, 9]);
        assert_eq!(vec![1, 4], sorted(set.to_vec()));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn check_clone_takes_fresh_id() {
        let set = SyncSet::from(vec![1, 2]);
        let clone = set.clone();

        assert!(set.id < clone.id);
        assert!(set.is_equal(&clone));

        clone.insert(3);
        assert!(!set.contains(&3));
        assert!(ptr_counter_eq(&set, &clone));
    }

    fn ptr_counter_eq<T>(a: &SyncSet<T>, b: &SyncSet<T>) -> bool {
        std::ptr::eq(a.counter, b.counter)
    }

    #[test]
    fn check_results_use_receiver_counter() {
        static COUNTER: InstanceCounter = InstanceCounter::starting_at(1_000);

        let a = SyncSet::with_counter(&COUNTER);
        a.insert_all(vec![1, 2]);
        let b = SyncSet::from(vec![2, 3]);

        let result = a.union(&b);
        assert!(ptr_counter_eq(&a, &result));
        assert!(result.id.id() > 1_000);
        assert!(result.clone().id > result.id);
    }

    #[test]
    fn check_colliding_ids_are_ordered_by_address() {
        static LEFT: InstanceCounter = InstanceCounter::starting_at(5);
        static RIGHT: InstanceCounter = InstanceCounter::starting_at(5);

        let a = SyncSet::with_counter(&LEFT);
        let b = SyncSet::with_counter(&RIGHT);
        a.insert_all(vec![1, 2, 3]);
        b.insert_all(vec![2, 3, 4]);

        assert_eq!(a.id, b.id);
        assert_eq!(vec![2, 3], sorted(a.intersection(&b).to_vec()));
        assert_eq!(vec![2, 3], sorted(b.intersection(&a).to_vec()));
    }

    #[test]
    fn check_subset_examples() {
        let small = SyncSet::from(vec![1, 2, 3]);
        let large = SyncSet::from(vec![1, 2, 3, 4]);
        assert!(small.is_subset(&large));
        assert!(!large.is_subset(&small));
        assert!(large.is_superset(&small));
        assert!(!small.is_equal(&large));
    }

    #[test]
    fn check_self_operations() {
        let set = SyncSet::from(vec![1, 2, 3]);

        assert_eq!(vec![1, 2, 3], sorted(set.intersection(&set).to_vec()));
        assert_eq!(vec![1, 2, 3], sorted(set.union(&set).to_vec()));
        assert!(set.difference(&set).is_empty());
        assert!(set.complement(&set).is_empty());
        assert!(set.is_subset(&set));
        assert!(set.is_equal(&set));
    }

    #[test]
    fn check_lock_released_after_panicking_hash() {
        let set = SyncSet::new();
        set.insert(PanickyHash::new(1));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            set.insert(PanickyHash::panicky(2));
        }));
        assert!(result.is_err());

        // Both the reader and the writer lock are still available.
        assert!(set.contains(&PanickyHash::new(1)));
        assert!(set.insert(PanickyHash::new(3)));
        assert_eq!(2, set.len());
    }

    #[test]
    fn check_mirrored_operations_terminate() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 500;

        let sets: Vec<SyncSet<usize>> = (0..4)
            .map(|i| (i * 10..i * 10 + 20).collect())
            .collect();
        let completed = AtomicUsize::new(0);

        thread::scope(|s| {
            for t in 0..THREADS {
                let sets = &sets;
                let completed = &completed;
                s.spawn(move |_| {
                    for round in 0..ROUNDS {
                        let a = &sets[(t + round) % sets.len()];
                        let b = &sets[(t + round + 1) % sets.len()];
                        let (a, b) = if t % 2 == 0 { (a, b) } else { (b, a) };

                        a.intersection(b);
                        b.union(a);
                        a.difference(b);
                        b.complement(a);
                        a.is_subset(b);
                        b.is_equal(a);
                        if round % 50 == 0 {
                            a.insert(round);
                            b.remove(&round);
                        }
                    }
                    completed.fetch_add(1, Ordering::SeqCst);
                });
            }
        }).unwrap();

        assert_eq!(THREADS, completed.load(Ordering::SeqCst));
    }

    #[test]
    fn check_concurrent_writers() {
        let set = SyncSet::new();

        thread::scope(|s| {
            for t in 0..4u32 {
                let set = &set;
                s.spawn(move |_| {
                    for i in 0..250 {
                        set.insert(t * 1000 + i);
                    }
                });
            }
        }).unwrap();

        assert_eq!(1000, set.len());
    }

    #[quickcheck]
    fn check_agrees_with_set(a: Vec<u8>, b: Vec<u8>) -> bool {
        let (plain_a, plain_b) = (Set::from(a.clone()), Set::from(b.clone()));
        let (sync_a, sync_b) = (SyncSet::from(a), SyncSet::from(b));

        sync_a.intersection(&sync_b).into_set() == plain_a.intersection(&plain_b)
            && sync_a.union(&sync_b).into_set() == plain_a.union(&plain_b)
            && sync_a.difference(&sync_b).into_set() == plain_a.difference(&plain_b)
            && sync_a.complement(&sync_b).into_set() == plain_a.complement(&plain_b)
            && sync_a.is_subset(&sync_b) == plain_a.is_subset(&plain_b)
            && sync_a.is_superset(&sync_b) == plain_a.is_superset(&plain_b)
    }

    #[quickcheck]
    fn check_equality_laws(a: SyncSet<u8>, b: SyncSet<u8>) -> bool {
        let both = a.is_subset(&b) && a.is_superset(&b);
        both == a.is_equal(&b) && both == (a.to_set() == b.to_set())
    }
}
