//! Common error infrastructure for boss-core.
//!
//! Command-specific errors live next to the commands they guard. This module
//! only provides the shared severity classification and the [`GameError`]
//! trait every error enum in the crate implements.
//!
//! Expected rejections (engaging a dead boss, a locked-out player, a split that
//! already happened) are *not* errors. They come back as values so the hot path
//! never has to unwind.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same command may succeed later (no eligible room yet)
/// - **Validation**: invalid input, should not be retried unchanged
/// - **Internal**: invariant violated inside the engine, needs investigation
/// - **Fatal**: a required collaborator is missing, the encounter cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an engine bug or broken wiring.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all boss-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by recoverability, not impact
/// - Keep `error_code` stable; the runtime logs and tests match on it
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
