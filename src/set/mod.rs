//! Set containers.
//!
//! All sets implement [`SetAlgebra`](crate::SetAlgebra), and differ by how
//! they order their elements and whether they may be shared across threads.
//!
//! ##### Set Types
//!
//! ###### `Set`
//!
//! An unordered hash set. `Set` should be preferred when neither ordering nor
//! sharing between threads is needed.
//!
//! ###### `OrderSet`
//!
//! A set which lists its elements in the order they were first inserted.
//! Removal picks between a per-element scan and a single filtering pass
//! according to its [`RemovalPolicy`](crate::RemovalPolicy). `OrderSet` is
//! not thread-safe.
//!
//! ###### `SyncSet`
//!
//! A set guarded by a reader/writer lock. Binary operations lock both
//! operands in the order of their instance identifiers, so any two sets may
//! be combined from any number of threads, in either operand order, without
//! deadlocking.

pub use self::hashset::Set;
pub use self::orderset::OrderSet;
pub use self::syncset::SyncSet;

mod hashset;
mod orderset;
mod syncset;
