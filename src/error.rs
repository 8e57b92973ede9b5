//! The Error and Result types of this library.
//!
//! None of the containers can fail: removing an absent element, combining
//! empty sets and operating a set against itself are all well-defined. The
//! only fallible surface is loading a [`RemovalPolicy`](crate::RemovalPolicy)
//! from configuration.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while loading configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A threshold variable was set to something other than an unsigned integer.
    #[error("invalid value '{value}' for {var}: {source}")]
    InvalidThreshold {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Error {
    /// Returns the name of the configuration variable at fault.
    pub fn var(&self) -> &'static str {
        match self {
            Error::InvalidThreshold { var, .. } => *var,
        }
    }
}

/// Result type of this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {

    use super::Error;

    #[test]
    fn invalid_threshold_display() {
        let source = "ten".parse::<usize>().unwrap_err();
        let error = Error::InvalidThreshold {
            var: "EZSET_BULK_LEN_THRESHOLD",
            value: "ten".to_string(),
            source,
        };

        assert_eq!("EZSET_BULK_LEN_THRESHOLD", error.var());
        assert_eq!(
            "invalid value 'ten' for EZSET_BULK_LEN_THRESHOLD: invalid digit found in string",
            error.to_string()
        );
    }
}
