//! Error types for the controller core and its hardware collaborators.

use thiserror::Error;

/// Failure reported by a hardware collaborator (panel, ADC, GPIO).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// The device did not answer during bring-up
    #[error("{0} did not respond during init")]
    InitFailed(&'static str),
    /// A synchronous channel read returned an error
    #[error("reading {channel} failed: {reason}")]
    ReadFailed { channel: String, reason: String },
}

/// Errors that stop the controller.
///
/// Everything here is fatal: the paint loop never retries a failed peripheral,
/// since continuing on garbage input is worse than halting.
#[derive(Debug, Error)]
pub enum Error {
    #[error("display initialization failed: {0}")]
    DisplayInit(#[source] HalError),

    #[error("input peripheral failure: {0}")]
    Peripheral(#[from] HalError),

    #[error("canvas {width}x{height} is too small for a {overlay}px cursor overlay")]
    CanvasTooSmall {
        width: usize,
        height: usize,
        overlay: usize,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
