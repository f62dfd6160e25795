//! Error taxonomy for generator initialization.
//!
//! Only the entropy path can fail at runtime. Invalid arguments to the
//! sampling and stream functions are programming errors and fail fast via
//! contract assertions at the call site, not through this type.

use thiserror::Error;

/// Failure surfaced by [`GeneratorState::new`](crate::GeneratorState::new)
/// and [`VectorState::new`](crate::VectorState::new) when seeding from the
/// hardware entropy source.
///
/// An exhausted retry budget is never converted into an all-zero state: a
/// zeroed generator is statistically degenerate and must not be mistaken
/// for a valid stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The OS entropy source failed every attempt within the retry budget.
    #[error("entropy source unavailable after {attempts} attempts")]
    EntropyUnavailable {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
}
