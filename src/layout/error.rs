//! Error types for placement resolution

use thiserror::Error;

use super::engine::Resolution;

/// Errors that can occur while resolving a placement
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The flip search kept restarting past the configured bound
    #[error("placement did not converge after {resets} flip restarts")]
    NonConvergent {
        resets: usize,
        /// Placement reached when the bound was hit
        best_effort: Box<Resolution>,
    },
}

impl PlacementError {
    /// The resolution that was in hand when the error was raised
    pub fn best_effort(&self) -> &Resolution {
        match self {
            Self::NonConvergent { best_effort, .. } => best_effort,
        }
    }
}
