//! Removal policy for `OrderSet`.
//!
//! An `OrderSet` removes elements with one of two algorithms:
//!
//! - **single-pass**: each element is located by a linear scan of the order
//!   sequence, and the tail is shifted left over it. `O(k * n)` for `k`
//!   removals from a set of `n` elements, with good locality for small `k`.
//! - **bulk**: the elements are collected into a lookup, and the order
//!   sequence is filtered in place in a single pass. `O(n + k)`, with a higher
//!   constant factor.
//!
//! The policy picks bulk removal when the set is large or the batch is long.
//! Both algorithms leave the set in the same state.

use std::env;

use crate::error::{Error, Result};

/// Variable overriding [`RemovalPolicy::len_threshold`] in [`RemovalPolicy::from_env`].
pub const LEN_THRESHOLD_VAR: &str = "EZSET_BULK_LEN_THRESHOLD";

/// Variable overriding [`RemovalPolicy::batch_threshold`] in [`RemovalPolicy::from_env`].
pub const BATCH_THRESHOLD_VAR: &str = "EZSET_BULK_BATCH_THRESHOLD";

/// Selects between single-pass and bulk removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RemovalPolicy {
    len_threshold: usize,
    batch_threshold: usize,
}

impl RemovalPolicy {

    pub const DEFAULT_LEN_THRESHOLD: usize = 10_000;

    pub const DEFAULT_BATCH_THRESHOLD: usize = 50;

    /// Creates a policy choosing bulk removal for sets longer than
    /// `len_threshold`, or batches longer than `batch_threshold`.
    pub const fn new(len_threshold: usize, batch_threshold: usize) -> RemovalPolicy {
        RemovalPolicy { len_threshold, batch_threshold }
    }

    /// Creates a policy which always chooses bulk removal.
    pub const fn always_bulk() -> RemovalPolicy {
        RemovalPolicy::new(0, 0)
    }

    /// Creates a policy which never chooses bulk removal.
    pub const fn never_bulk() -> RemovalPolicy {
        RemovalPolicy::new(usize::MAX, usize::MAX)
    }

    pub fn with_len_threshold(self, len_threshold: usize) -> RemovalPolicy {
        RemovalPolicy { len_threshold, ..self }
    }

    pub fn with_batch_threshold(self, batch_threshold: usize) -> RemovalPolicy {
        RemovalPolicy { batch_threshold, ..self }
    }

    pub fn len_threshold(&self) -> usize {
        self.len_threshold
    }

    pub fn batch_threshold(&self) -> usize {
        self.batch_threshold
    }

    /// Returns true if removing `batch_len` elements from a set of `set_len`
    /// elements should use bulk removal.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::RemovalPolicy;
    ///
    /// let policy = RemovalPolicy::default();
    /// assert!(!policy.prefers_bulk(10_000, 50));
    /// assert!(policy.prefers_bulk(10_001, 1));
    /// assert!(policy.prefers_bulk(3, 51));
    /// ```
    pub fn prefers_bulk(&self, set_len: usize, batch_len: usize) -> bool {
        set_len > self.len_threshold || batch_len > self.batch_threshold
    }

    /// Loads a policy from the process environment.
    ///
    /// `EZSET_BULK_LEN_THRESHOLD` and `EZSET_BULK_BATCH_THRESHOLD` override the
    /// defaults when set.
    pub fn from_env() -> Result<RemovalPolicy> {
        RemovalPolicy::from_lookup(|var| env::var(var).ok())
    }

    /// Loads a policy from an arbitrary source of variables.
    ///
    /// Variables for which `lookup` returns `None` keep their default value.
    /// Surrounding whitespace is ignored.
    ///
    /// ### Example
    ///
    /// ```
    /// use ezset::RemovalPolicy;
    ///
    /// let policy = RemovalPolicy::from_lookup(|var| match var {
    ///     "EZSET_BULK_BATCH_THRESHOLD" => Some("8".to_string()),
    ///     _ => None,
    /// }).unwrap();
    ///
    /// assert_eq!(8, policy.batch_threshold());
    /// assert_eq!(RemovalPolicy::DEFAULT_LEN_THRESHOLD, policy.len_threshold());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<RemovalPolicy>
        where F: Fn(&'static str) -> Option<String>
    {
        let mut policy = RemovalPolicy::default();
        if let Some(len) = parse_threshold(&lookup, LEN_THRESHOLD_VAR)? {
            policy.len_threshold = len;
        }
        if let Some(batch) = parse_threshold(&lookup, BATCH_THRESHOLD_VAR)? {
            policy.batch_threshold = batch;
        }
        Ok(policy)
    }
}

impl Default for RemovalPolicy {
    fn default() -> RemovalPolicy {
        RemovalPolicy::new(RemovalPolicy::DEFAULT_LEN_THRESHOLD,
                           RemovalPolicy::DEFAULT_BATCH_THRESHOLD)
    }
}

fn parse_threshold<F>(lookup: &F, var: &'static str) -> Result<Option<usize>>
    where F: Fn(&'static str) -> Option<String>
{
    let value = match lookup(var) {
        Some(value) => value,
        None => return Ok(None),
    };
    let threshold = value.trim().parse::<usize>().map_err(|source| {
        Error::InvalidThreshold { var, value: value.clone(), source }
    })?;
    tracing::debug!(var, threshold, "overriding removal threshold");
    Ok(Some(threshold))
}
