//! A library of set containers over values with total equality.
//!
//! Three containers share the [`SetAlgebra`] contract:
//!
//! - [`Set`]: an unordered hash set.
//! - [`OrderSet`]: a set which remembers the order in which its elements were
//!   first inserted.
//! - [`SyncSet`]: a set which may be shared between threads, including as
//!   both operands of a binary operation running concurrently with its
//!   mirror image.
//!
//! ###### Naming
//!
//! Earlier versions of this library exposed an operation named `Union` which
//! computed the intersection of two sets, and an operation named `Intersect`
//! which computed their union. The behaviours are kept, under names that say
//! what they compute:
//!
//! | Method                              | Former name    |
//! |-------------------------------------|----------------|
//! | [`intersection`](SetAlgebra::intersection) | `Union`     |
//! | [`union`](SetAlgebra::union)        | `Intersect`    |
//! | [`difference`](SetAlgebra::difference) | `Difference` |
//! | [`complement`](SetAlgebra::complement) | `Complement` |
//!
//! ###### Element equality
//!
//! Membership is decided by the element type's own `Eq` and `Hash`. The
//! containers never look behind them: an element holding a reference type
//! compares however that reference type compares. Use [`Handle`] to store
//! shared values by identity rather than by value.

pub mod error;
pub mod handle;
pub mod ident;
pub mod policy;
pub mod set;


pub use error::{Error, Result};
pub use handle::Handle;
pub use ident::{InstanceCounter, GLOBAL_COUNTER};
pub use policy::RemovalPolicy;
pub use set::{OrderSet, Set, SyncSet};

/// The algebra shared by every set in this library.
///
/// All operations are total. Operating a set against itself is well-defined
/// and yields the identity result of the operation.
///
/// ###### Equality
///
/// Two sets are equal when they hold the same elements. Insertion order, the
/// removal policy of an `OrderSet`, and the identity of a `SyncSet` are not
/// taken into account.
pub trait SetAlgebra: Sized {

    type Item;

    /// Returns the elements present in both `self` and `other`.
    fn intersection(&self, other: &Self) -> Self;

    /// Returns a copy of `self` with every element of `other` merged in.
    fn union(&self, other: &Self) -> Self;

    /// Returns the elements of `self` which are not in `other`.
    fn difference(&self, other: &Self) -> Self;

    /// Returns the elements of `other` which are not in `self`.
    fn complement(&self, other: &Self) -> Self;

    /// Returns true if every element of `self` is in `other`.
    ///
    /// Returns false without comparing elements when `self` is the larger set.
    fn is_subset(&self, other: &Self) -> bool;

    /// Returns true if every element of `other` is in `self`.
    ///
    /// Returns false without comparing elements when `self` is the smaller set.
    fn is_superset(&self, other: &Self) -> bool;

    /// Returns true if `self` and `other` hold the same elements.
    fn is_equal(&self, other: &Self) -> bool {
        self.is_subset(other) && self.is_superset(other)
    }
}
