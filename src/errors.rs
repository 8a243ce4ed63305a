//! Error Types
//!
//! This module defines the error type used throughout the animator.
//!
//! # Overview
//!
//! Only genuinely exceptional conditions become an [`AnimatorError`]:
//! - The skeleton asset failed to load (fatal for that animator)
//! - The skeleton was not ready yet (transient, absorbed by the retry loop)
//! - Misuse of the timeline API (bootstrapping twice, bad loop period)
//!
//! A joint missing from the skeleton or from a keyframe, and a zero-length
//! segment between two keyframes, are *not* errors and never surface here.
//!
//! ```rust,ignore
//! use skelanim::errors::{AnimatorError, Result};
//!
//! fn bootstrap() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the animator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimatorError {
    // ========================================================================
    // Skeleton Availability
    // ========================================================================
    /// The skeleton exists but its joints are not wired up yet.
    ///
    /// Transient: the driver retries bootstrap after a fixed delay.
    #[error("Skeleton is not ready yet")]
    SkeletonNotReady,

    /// The skeleton asset failed to load. No retry is attempted.
    #[error("Skeleton asset failed to load: {0}")]
    AssetLoad(String),

    /// The skeleton handle no longer refers to a live skeleton.
    #[error("Skeleton is not attached to the scene")]
    SkeletonMissing,

    /// Bootstrap kept hitting [`AnimatorError::SkeletonNotReady`] until the
    /// retry budget ran out.
    #[error("Skeleton did not become ready after {attempts} attempts")]
    RetryExhausted {
        /// Number of bootstrap attempts performed
        attempts: u32,
    },

    // ========================================================================
    // Timeline Errors
    // ========================================================================
    /// The bootstrap pose has already been captured for this timeline.
    #[error("Timeline bootstrap pose was already captured")]
    AlreadyBootstrapped,

    /// Loop period must be finite and strictly positive.
    #[error("Invalid loop period: {0}")]
    InvalidLoopPeriod(f32),
}

/// Alias for `Result<T, AnimatorError>`.
pub type Result<T> = std::result::Result<T, AnimatorError>;
