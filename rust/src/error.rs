//! Crate-level error type.

use thiserror::Error;

use crate::calendar::CalendarError;
use crate::critical_path::NetworkError;
use crate::layout::LayoutError;
use crate::registry::ValidationError;

/// Any failure surfaced by a network operation.
///
/// Failures are scoped to the operation that raised them; the network keeps
/// its previous state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Task input was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Timing calculation failed
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Diagram layering failed
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Date projection overflowed
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl Error {
    /// Whether the failure came from a dependency cycle, wherever detected.
    pub fn is_cycle(&self) -> bool {
        matches!(
            self,
            Error::Network(NetworkError::CycleDetected { .. })
                | Error::Layout(LayoutError::CycleDetected { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
