use std::collections::hash_set::{self, HashSet};
use std::fmt::{Debug, Formatter, Error};
use std::hash::Hash;

#[cfg(any(test, feature = "quickcheck_generators"))]
use quickcheck::{Arbitrary, Gen};

use crate::SetAlgebra;

/// An unordered set.
pub struct Set<T> {
    elements: HashSet<T>
}

impl <T : Hash + Eq> Set<T> {

    /// Create a new, empty set.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::Set;
    ///
    /// let set = Set::<i32>::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Set<T> {
        Set { elements: HashSet::new() }
    }

    /// Create a new, empty set whose element type is that of `sample`.
    ///
    /// `sample` is not inserted.
    pub fn of(_sample: &T) -> Set<T> {
        Set::new()
    }

    /// Insert an element; returns false if it was already present.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::Set;
    ///
    /// let mut set = Set::new();
    /// assert!(set.insert("first-element"));
    /// assert!(!set.insert("first-element"));
    /// assert!(set.contains(&"first-element"));
    /// ```
    pub fn insert(&mut self, element: T) -> bool {
        self.elements.insert(element)
    }

    /// Insert every element of `elements`.
    pub fn insert_all<I>(&mut self, elements: I) where I: IntoIterator<Item = T> {
        self.elements.extend(elements)
    }

    /// Remove an element; returns false if it was absent.
    pub fn remove(&mut self, element: &T) -> bool {
        self.elements.remove(element)
    }

    /// Remove every element of `elements`; absent elements are ignored.
    pub fn remove_all<'a, I>(&mut self, elements: I)
        where I: IntoIterator<Item = &'a T>, T: 'a
    {
        for element in elements {
            self.elements.remove(element);
        }
    }

    /// Returns true if the set contains the value.
    pub fn contains(&self, value: &T) -> bool {
        self.elements.contains(value)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear()
    }

    /// Iterate over the elements, in no particular order.
    pub fn iter(&self) -> hash_set::Iter<T> {
        self.elements.iter()
    }

    /// Returns the elements, in no particular order.
    pub fn to_vec(&self) -> Vec<T> where T: Clone {
        self.elements.iter().cloned().collect()
    }
}

impl <T : Hash + Eq + Clone> SetAlgebra for Set<T> {

    type Item = T;

    /// ### Example
    ///
    /// ```
    /// use ezset::{Set, SetAlgebra};
    ///
    /// let a: Set<i32> = vec![1, 2, 3].into();
    /// let b: Set<i32> = vec![2, 3, 4].into();
    ///
    /// let mut both = a.intersection(&b).to_vec();
    /// both.sort();
    /// assert_eq!(vec![2, 3], both);
    /// ```
    fn intersection(&self, other: &Set<T>) -> Set<T> {
        Set { elements: other.elements.iter().filter(|e| self.contains(e)).cloned().collect() }
    }

    fn union(&self, other: &Set<T>) -> Set<T> {
        let mut union = self.clone();
        union.insert_all(other.elements.iter().cloned());
        union
    }

    fn difference(&self, other: &Set<T>) -> Set<T> {
        Set { elements: self.elements.iter().filter(|e| !other.contains(e)).cloned().collect() }
    }

    fn complement(&self, other: &Set<T>) -> Set<T> {
        other.difference(self)
    }

    /// ### Example
    ///
    /// ```
    /// use ezset::{Set, SetAlgebra};
    ///
    /// let small: Set<i32> = vec![1, 2, 3].into();
    /// let large: Set<i32> = vec![1, 2, 3, 4].into();
    ///
    /// assert!(small.is_subset(&large));
    /// assert!(!large.is_subset(&small));
    /// ```
    fn is_subset(&self, other: &Set<T>) -> bool {
        if self.len() > other.len() { return false; }
        self.elements.iter().all(|e| other.contains(e))
    }

    fn is_superset(&self, other: &Set<T>) -> bool {
        other.is_subset(self)
    }
}

impl <T : Hash + Eq> Default for Set<T> {
    fn default() -> Set<T> {
        Set::new()
    }
}

impl <T : Hash + Eq> From<Vec<T>> for Set<T> {
    fn from(elements: Vec<T>) -> Set<T> {
        elements.into_iter().collect()
    }
}

impl <T : Hash + Eq> From<HashSet<T>> for Set<T> {
    fn from(elements: HashSet<T>) -> Set<T> {
        Set { elements }
    }
}

impl <T : Hash + Eq> From<Set<T>> for HashSet<T> {
    fn from(set: Set<T>) -> HashSet<T> {
        set.elements
    }
}

impl <T : Hash + Eq> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Set<T> {
        Set { elements: iter.into_iter().collect() }
    }
}

impl <T : Hash + Eq> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter)
    }
}

impl <T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> hash_set::IntoIter<T> {
        self.elements.into_iter()
    }
}

impl <'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = hash_set::Iter<'a, T>;

    fn into_iter(self) -> hash_set::Iter<'a, T> {
        self.elements.iter()
    }
}

impl <T : Eq + Hash> PartialEq for Set<T> {
    fn eq(&self, other: &Set<T>) -> bool {
        self.elements == other.elements
    }
}

impl <T : Eq + Hash> Eq for Set<T> {}

impl <T : Debug> Debug for Set<T> {
     fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
         f.debug_set().entries(self.elements.iter()).finish()
     }
}

impl <T : Clone> Clone for Set<T> {
    fn clone(&self) -> Set<T> {
        Set { elements: self.elements.clone() }
    }
}

#[cfg(any(test, feature = "quickcheck_generators"))]
impl <T : Arbitrary + Eq + Hash> Arbitrary for Set<T> {
    fn arbitrary(g: &mut Gen) -> Set<T> {
        let elements: Vec<T> = Arbitrary::arbitrary(g);
        elements.into_iter().collect()
    }
    fn shrink(&self) -> Box<dyn Iterator<Item = Set<T>>> {
        let elements: Vec<T> = self.elements.iter().cloned().collect();
        Box::new(elements.shrink().map(|es| es.into_iter().collect::<Set<T>>()))
    }
}
