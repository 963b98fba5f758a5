//! # Session Error Types
//!
//! Only the launch path is fallible. Runtime degradation - a contended
//! render lock, a full input queue - is recovered locally and never
//! surfaces here.

use thiserror::Error;

/// Errors reported by a host platform during callback registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host could not allocate a resource backing the callback.
    #[error("host allocation failed: {0}")]
    AllocationFailed(String),

    /// The host refused the registration (slot taken, host shutting down).
    #[error("host refused registration: {0}")]
    Refused(String),
}

/// Errors that abort a session launch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The display host rejected the render callback.
    #[error("render callback registration failed")]
    RenderRegistration(#[source] HostError),

    /// The input host rejected the input callback.
    #[error("input callback registration failed")]
    InputRegistration(#[source] HostError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
