//! Henyey-Greenstein

use super::PhaseFunction;
use crate::base::*;
use crate::geometry::*;

/// The Henyey-Greenstein phase function. A single asymmetry parameter `g`
/// in (-1, 1) controls how strongly scattering favours the forward or
/// backward direction; `g = 0` recovers isotropic scattering.
#[derive(Clone, Debug)]
pub struct HenyeyGreenstein {
    /// The asymmetry parameter: the average value of the product of the
    /// phase function being approximated and the cosine of the angle
    /// between the two directions.
    g: Float,
}

impl HenyeyGreenstein {
    /// Create a new `HenyeyGreenstein` phase function.
    ///
    /// * `g` - The asymmetry parameter in (-1, 1).
    pub fn new(g: Float) -> PhaseFunction {
        PhaseFunction::HenyeyGreenstein(Self { g })
    }

    /// Returns the value of the phase function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn p(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        phase_hg(wo.dot(wi), self.g)
    }

    /// Samples an incident direction by analytically inverting the
    /// distribution; the returned density equals `p` at the sampled
    /// direction exactly.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Sample value in `[0, 1)^2`.
    pub fn sample_p(&self, wo: &Vector3f, u: &Point2f) -> (Float, Vector3f) {
        // Compute cosθ for the Henyey-Greenstein sample. The inversion is
        // singular as g -> 0; fall back to the uniform-sphere limit there.
        let cos_theta = if abs(self.g) < 1e-3 {
            1.0 - 2.0 * u[0]
        } else {
            let sqr_term = (1.0 - self.g * self.g) / (1.0 + self.g - 2.0 * self.g * u[0]);
            -(1.0 + self.g * self.g - sqr_term * sqr_term) / (2.0 * self.g)
        };

        // Build the direction around wo.
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = TWO_PI * u[1];
        let (v1, v2) = coordinate_system(wo);
        let wi = spherical_direction_in_coord_frame(sin_theta, cos_theta, phi, &v1, &v2, wo);

        (phase_hg(cos_theta, self.g), wi)
    }

    /// Returns the asymmetry parameter.
    pub fn g(&self) -> Float {
        self.g
    }
}

impl std::fmt::Display for HenyeyGreenstein {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HenyeyGreenstein {{ g: {} }}", self.g)
    }
}

/// Computes the Henyey-Greenstein phase function value for the cosine of
/// the angle between two directions:
///
/// p(cosθ) = (1/4π) (1 - g²) / (1 + g² + 2g cosθ)^(3/2)
///
/// * `cos_theta` - Cosine of the angle between the two directions.
/// * `g`         - The asymmetry parameter.
#[inline]
pub fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let denom = 1.0 + g * g + 2.0 * g * cos_theta;
    INV_FOUR_PI * (1.0 - g * g) / (denom * denom.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn zero_asymmetry_recovers_isotropic() {
        for cos_theta in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            assert!(approx_eq!(
                f32,
                phase_hg(cos_theta, 0.0),
                INV_FOUR_PI,
                epsilon = 1e-7
            ));
        }
    }

    #[test]
    fn positive_asymmetry_peaks_forward() {
        // Forward scattering: wi opposite wo, cosθ = -1.
        let g = 0.6;
        assert!(phase_hg(-1.0, g) > phase_hg(0.0, g));
        assert!(phase_hg(0.0, g) > phase_hg(1.0, g));

        let g = -0.6;
        assert!(phase_hg(1.0, g) > phase_hg(-1.0, g));
    }
}
