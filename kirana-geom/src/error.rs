//! Error types for detector construction.

use thiserror::Error;

use crate::surface::SurfaceId;
use crate::volume::VolumeIndex;

/// Detector construction error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    #[error("surface {surface} attached to unknown volume {volume}")]
    UnknownVolume {
        surface: SurfaceId,
        volume: VolumeIndex,
    },

    #[error("portal {surface} links to unknown volume {target}")]
    DanglingPortalLink {
        surface: SurfaceId,
        target: VolumeIndex,
    },

    #[error("volume {volume} is not closed by any portal")]
    UnclosedVolume { volume: VolumeIndex },

    #[error("telescope needs at least one layer position")]
    EmptyTelescope,
}

pub type Result<T> = std::result::Result<T, GeometryError>;
