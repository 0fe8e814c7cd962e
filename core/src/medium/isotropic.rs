//! Isotropic Phase Function

use super::PhaseFunction;
use crate::base::*;
use crate::geometry::*;
use crate::sampling::{uniform_sample_sphere, uniform_sphere_pdf};

/// The isotropic phase function: scattering with no directional preference,
/// constant `1/4π` over the sphere.
#[derive(Clone, Debug, Default)]
pub struct Isotropic {}

impl Isotropic {
    /// Create a new `Isotropic` phase function.
    pub fn new() -> PhaseFunction {
        PhaseFunction::Isotropic(Self {})
    }

    /// Returns the value of the phase function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn p(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        INV_FOUR_PI
    }

    /// Samples an incident direction uniformly over the sphere.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Sample value in `[0, 1)^2`.
    pub fn sample_p(&self, _wo: &Vector3f, u: &Point2f) -> (Float, Vector3f) {
        (uniform_sphere_pdf(), uniform_sample_sphere(u))
    }
}

impl std::fmt::Display for Isotropic {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Isotropic {{ }}")
    }
}
