//! Material

use std::fmt;

/// Light transport mode. Radiance transport follows light from the camera;
/// importance transport follows it from a light source. The two differ in
/// how refraction scales carried energy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportMode {
    /// Indicates the incident ray that intersected a point started at the
    /// camera.
    Radiance,

    /// Indicates the incident ray that intersected a point started at a
    /// light source.
    Importance,
}

impl fmt::Display for TransportMode {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radiance => write!(f, "Radiance"),
            Self::Importance => write!(f, "Importance"),
        }
    }
}
