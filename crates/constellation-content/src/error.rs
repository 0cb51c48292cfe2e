use constellation_core::ApiError;
use constellation_state::SettingsError;
use thiserror::Error;

use crate::MoveError;

/// Errors from listing or reordering content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[allow(missing_docs)]
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The ordered list could not be read or written.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[allow(missing_docs)]
    #[error(transparent)]
    Move(#[from] MoveError),
}
