//! Channel-plumbing errors shared by the controller handles.

/// Errors raised by a handle when its controller task is gone.
///
/// These are wiring failures, not domain failures: domain outcomes
/// (fetch/mutation errors) are reconciled inside the controllers and
/// surfaced as notifications instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Controller closed")]
    Closed,
    #[error("Controller dropped response channel")]
    Dropped,
}
