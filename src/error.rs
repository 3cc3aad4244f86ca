//! Error taxonomy shared by every primitive.
//!
//! Failures fall into four groups:
//!
//! - [`Error::InvalidArgument`]: a malformed parameter, reported eagerly when the
//!   adapter is constructed and before any item is pulled from the source.
//! - [`Error::Callback`]: a user-supplied function (predicate, key function,
//!   mapper) failed while the sequence was being driven. It is yielded at the pull
//!   that triggered it and the adapter ends afterwards.
//! - [`Error::Worker`]: a function running inside the [`parallelize`](crate::parallelize)
//!   worker pool failed or panicked. The whole parallel operation stops.
//! - [`Error::Cache`]: the value cache could not read, write or remove an entry.
//!
//! Nothing in the crate retries or swallows a failure; every error is an ordinary
//! value the caller can inspect per pipeline.

use std::borrow::Cow;

/// The main error type for sequence primitives and their services.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter was outside its accepted range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: Cow<'static, str>,
    },

    /// A user callback failed during traversal.
    #[error("callback failed: {0:#}")]
    Callback(#[source] anyhow::Error),

    /// A function failed (or panicked) inside the worker pool.
    #[error("worker failed: {0:#}")]
    Worker(#[source] anyhow::Error),

    /// The value cache could not read or write an entry.
    #[error("cache error: {0:#}")]
    Cache(#[source] anyhow::Error),
}

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Wrap any callback error.
    pub fn callback<E: Into<anyhow::Error>>(error: E) -> Self {
        Self::Callback(error.into())
    }

    /// Wrap any worker error.
    pub fn worker<E: Into<anyhow::Error>>(error: E) -> Self {
        Self::Worker(error.into())
    }

    /// `true` for [`Error::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// `true` for [`Error::Callback`].
    #[must_use]
    pub const fn is_callback(&self) -> bool {
        matches!(self, Self::Callback(_))
    }

    /// `true` for [`Error::Worker`].
    #[must_use]
    pub const fn is_worker(&self) -> bool {
        matches!(self, Self::Worker(_))
    }
}

/// Fail with [`Error::InvalidArgument`] unless `ok` holds.
pub(crate) fn ensure_arg(
    ok: bool,
    name: &'static str,
    reason: impl FnOnce() -> String,
) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_argument(name, reason()))
    }
}
