//! Timeline errors.

use thiserror::Error;
use uuid::Uuid;

use crate::element::ElementKind;
use crate::track::TrackKind;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("{element:?} elements cannot be placed on a {track:?} track")]
    IncompatibleTrack { element: ElementKind, track: TrackKind },
    #[error("track not found: {0}")]
    TrackNotFound(Uuid),
    #[error("element not found: {0}")]
    ElementNotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
