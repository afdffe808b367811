//! Player-side failures. All of them are recovered locally.

use thiserror::Error;
use void_core::{Classify, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("animation '{0}' is not loaded")]
    MissingAnimation(String),

    #[error("audio cue {0} has not finished loading")]
    AudioNotLoaded(String),

    #[error("seat {0} no longer exists")]
    SeatGone(String),
}

impl Classify for PlayerError {
    fn kind(&self) -> ErrorKind {
        match self {
            PlayerError::MissingAnimation(_) | PlayerError::AudioNotLoaded(_) => ErrorKind::ExternalResource,
            PlayerError::SeatGone(_) => ErrorKind::Lookup,
        }
    }
}
