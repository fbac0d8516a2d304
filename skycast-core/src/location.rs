//! Seam for the host's position sensor. The sensor itself lives outside
//! this crate; callers hand the pipeline a [`LocationSource`] and the
//! pipeline never talks to hardware.

use crate::model::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("unable to get your location")]
    PermissionDenied,

    #[error("geolocation is not supported on this host")]
    Unsupported,
}

pub trait LocationSource {
    fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A position known up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl LocationSource for FixedPosition {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}
