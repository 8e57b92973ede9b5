use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// A shared value which takes part in set membership by identity.
///
/// Two handles are equal only if they point at the same allocation; handles
/// to distinct but equal values are distinct elements. Cloning a handle
/// shares the allocation, so the clone is equal to the original.
///
/// ### Example
///
/// ```
/// use ezset::{Handle, Set};
///
/// let a = Handle::new(1);
/// let b = Handle::new(1);
///
/// let set: Set<_> = vec![a.clone(), b.clone(), a.clone()].into_iter().collect();
/// assert_eq!(2, set.len());
/// assert_eq!(*a, *b);
/// assert_ne!(a, b);
/// ```
pub struct Handle<T>(Arc<T>);

impl <T> Handle<T> {

    pub fn new(value: T) -> Handle<T> {
        Handle(Arc::new(value))
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(this: &Handle<T>, other: &Handle<T>) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl <T> From<Arc<T>> for Handle<T> {
    fn from(shared: Arc<T>) -> Handle<T> {
        Handle(shared)
    }
}

impl <T> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl <T> Clone for Handle<T> {
    fn clone(&self) -> Handle<T> {
        Handle(Arc::clone(&self.0))
    }
}

impl <T> PartialEq for Handle<T> {
    fn eq(&self, other: &Handle<T>) -> bool {
        Handle::ptr_eq(self, other)
    }
}

impl <T> Eq for Handle<T> {}

impl <T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state)
    }
}

impl <T: Debug> Debug for Handle<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Handle({:?} @ {:p})", *self.0, Arc::as_ptr(&self.0))
    }
}
