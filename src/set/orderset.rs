use std::collections::HashSet;
use std::fmt::{Debug, Formatter, Error};
use std::hash::Hash;
use std::slice;
use std::vec;

#[cfg(any(test, feature = "quickcheck_generators"))]
use quickcheck::{Arbitrary, Gen};

use crate::policy::RemovalPolicy;
use crate::SetAlgebra;

/// A set which remembers the order in which elements were first inserted.
///
/// Membership is held in a hash set, and order in a parallel sequence. Both
/// always hold exactly the same elements, each element appearing once in the
/// sequence.
pub struct OrderSet<T> {
    members: HashSet<T>,
    order: Vec<T>,
    policy: RemovalPolicy,
}

impl <T : Hash + Eq + Clone> OrderSet<T> {

    /// Create a new, empty set with the default removal policy.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::OrderSet;
    ///
    /// let set = OrderSet::<i32>::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> OrderSet<T> {
        OrderSet::with_policy(RemovalPolicy::default())
    }

    /// Create a new, empty set with the given removal policy.
    pub fn with_policy(policy: RemovalPolicy) -> OrderSet<T> {
        OrderSet { members: HashSet::new(), order: Vec::new(), policy }
    }

    /// Create a new, empty set whose element type is that of `sample`.
    ///
    /// `sample` is not inserted.
    pub fn of(_sample: &T) -> OrderSet<T> {
        OrderSet::new()
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RemovalPolicy) {
        self.policy = policy;
    }

    /// Append an element; returns false, leaving its position unchanged, if it
    /// was already present.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::OrderSet;
    ///
    /// let mut set = OrderSet::new();
    /// set.insert('b');
    /// set.insert('a');
    /// assert!(!set.insert('b'));
    /// assert_eq!(&['b', 'a'], set.as_slice());
    /// ```
    pub fn insert(&mut self, element: T) -> bool {
        if self.members.contains(&element) {
            return false;
        }
        self.members.insert(element.clone());
        self.order.push(element);
        true
    }

    /// Append every element of `elements` not yet present, in iteration order.
    pub fn insert_all<I>(&mut self, elements: I) where I: IntoIterator<Item = T> {
        for element in elements {
            self.insert(element);
        }
    }

    /// Remove an element; returns false if it was absent.
    pub fn remove(&mut self, element: &T) -> bool {
        if !self.members.contains(element) {
            return false;
        }
        self.remove_all(Some(element));
        true
    }

    /// Remove every element of `elements`; absent elements are ignored.
    ///
    /// The removal algorithm is chosen by the set's [`RemovalPolicy`] from the
    /// length of the set and of the batch.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::OrderSet;
    ///
    /// let mut set = OrderSet::from(vec![1, 2, 3, 4, 5]);
    /// set.remove_all(&[4, 2, 9]);
    /// assert_eq!(&[1, 3, 5], set.as_slice());
    /// ```
    pub fn remove_all<'a, I>(&mut self, elements: I)
        where I: IntoIterator<Item = &'a T>, T: 'a
    {
        let batch: Vec<&T> = elements.into_iter().collect();
        if self.policy.prefers_bulk(self.len(), batch.len()) {
            tracing::trace!(len = self.len(), batch = batch.len(), "bulk removal");
            self.remove_bulk_batch(batch);
        } else {
            tracing::trace!(len = self.len(), batch = batch.len(), "single-pass removal");
            for element in batch {
                self.remove_single(element);
            }
        }
    }

    /// Remove every element of `elements` with the bulk algorithm, whatever
    /// the policy.
    pub fn remove_bulk<'a, I>(&mut self, elements: I)
        where I: IntoIterator<Item = &'a T>, T: 'a
    {
        self.remove_bulk_batch(elements.into_iter().collect());
    }

    /// Returns true if the set contains the value.
    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Remove every element, keeping the policy.
    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }

    /// Iterate over the elements in insertion order.
    pub fn iter(&self) -> slice::Iter<T> {
        self.order.iter()
    }

    /// Returns the elements in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.order
    }

    /// Returns a copy of the elements in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.order.clone()
    }

    // Linear scan for the index, then shift the tail left over it.
    fn remove_single(&mut self, element: &T) {
        if !self.members.remove(element) {
            return;
        }
        if let Some(index) = self.order.iter().position(|e| e == element) {
            self.order.remove(index);
        }
        debug_assert_eq!(self.members.len(), self.order.len());
    }

    // Filters the order sequence in place, reusing its buffer.
    fn remove_bulk_batch(&mut self, batch: Vec<&T>) {
        let doomed: HashSet<&T> = batch.into_iter()
                                       .filter(|e| self.members.contains(*e))
                                       .collect();
        if doomed.is_empty() {
            return;
        }
        for element in doomed.iter() {
            self.members.remove(*element);
        }
        self.order.retain(|e| !doomed.contains(e));
        debug_assert_eq!(self.members.len(), self.order.len());
    }

    // A new, empty set sharing this set's policy.
    fn sibling(&self) -> OrderSet<T> {
        OrderSet::with_policy(self.policy)
    }
}

/// Results keep insertion order: `intersection` and `difference` follow the
/// order of `self`, `complement` that of `other`, and `union` lists the
/// elements of `self` followed by the new elements of `other`. Results carry
/// the removal policy of `self`.
impl <T : Hash + Eq + Clone> SetAlgebra for OrderSet<T> {

    type Item = T;

    fn intersection(&self, other: &OrderSet<T>) -> OrderSet<T> {
        let mut result = self.sibling();
        result.insert_all(self.order.iter().filter(|e| other.contains(e)).cloned());
        result
    }

    /// ### Example
    ///
    /// ```
    /// use ezset::{OrderSet, SetAlgebra};
    ///
    /// let a = OrderSet::from(vec![3, 1]);
    /// let b = OrderSet::from(vec![2, 1, 4]);
    ///
    /// assert_eq!(&[3, 1, 2, 4], a.union(&b).as_slice());
    /// ```
    fn union(&self, other: &OrderSet<T>) -> OrderSet<T> {
        let mut result = self.clone();
        result.insert_all(other.order.iter().cloned());
        result
    }

    fn difference(&self, other: &OrderSet<T>) -> OrderSet<T> {
        let mut result = self.sibling();
        result.insert_all(self.order.iter().filter(|e| !other.contains(e)).cloned());
        result
    }

    fn complement(&self, other: &OrderSet<T>) -> OrderSet<T> {
        let mut result = self.sibling();
        result.insert_all(other.order.iter().filter(|e| !self.contains(e)).cloned());
        result
    }

    fn is_subset(&self, other: &OrderSet<T>) -> bool {
        if self.len() > other.len() { return false; }
        self.members.iter().all(|e| other.contains(e))
    }

    fn is_superset(&self, other: &OrderSet<T>) -> bool {
        other.is_subset(self)
    }
}

impl <T : Hash + Eq + Clone> Default for OrderSet<T> {
    fn default() -> OrderSet<T> {
        OrderSet::new()
    }
}

/// Keeps the first occurrence of each element.
///
/// ### Example
///
/// ```
/// use ezset::OrderSet;
///
/// let set = OrderSet::from(vec![1, 2, 3, 2, 1]);
/// assert_eq!(vec![1, 2, 3], set.to_vec());
/// assert_eq!(3, set.len());
/// ```
impl <T : Hash + Eq + Clone> From<Vec<T>> for OrderSet<T> {
    fn from(elements: Vec<T>) -> OrderSet<T> {
        let mut set = OrderSet::new();
        set.order.reserve(elements.len());
        set.insert_all(elements);
        set
    }
}

impl <T : Hash + Eq + Clone> FromIterator<T> for OrderSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> OrderSet<T> {
        let mut set = OrderSet::new();
        set.insert_all(iter);
        set
    }
}

impl <T : Hash + Eq + Clone> Extend<T> for OrderSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter)
    }
}

impl <T> IntoIterator for OrderSet<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> vec::IntoIter<T> {
        self.order.into_iter()
    }
}

impl <'a, T> IntoIterator for &'a OrderSet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.order.iter()
    }
}

/// Sets are equal when they hold the same elements, in any order.
impl <T : Eq + Hash> PartialEq for OrderSet<T> {
    fn eq(&self, other: &OrderSet<T>) -> bool {
        self.members == other.members
    }
}

impl <T : Eq + Hash> Eq for OrderSet<T> {}

impl <T : Debug> Debug for OrderSet<T> {
     fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
         f.debug_set().entries(self.order.iter()).finish()
     }
}

/// The clone owns a copy of the order sequence.
impl <T : Clone> Clone for OrderSet<T> {
    fn clone(&self) -> OrderSet<T> {
        OrderSet {
            members: self.members.clone(),
            order: self.order.clone(),
            policy: self.policy,
        }
    }
}

#[cfg(any(test, feature = "quickcheck_generators"))]
impl <T : Arbitrary + Eq + Hash> Arbitrary for OrderSet<T> {
    fn arbitrary(g: &mut Gen) -> OrderSet<T> {
        let elements: Vec<T> = Arbitrary::arbitrary(g);
        elements.into_iter().collect()
    }
    fn shrink(&self) -> Box<dyn Iterator<Item = OrderSet<T>>> {
        let policy = self.policy;
        Box::new(self.order.shrink().map(move |es| {
            let mut set = OrderSet::with_policy(policy);
            set.insert_all(es);
            set
        }))
    }
}
