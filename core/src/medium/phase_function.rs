//! Phase Function

use super::{HenyeyGreenstein, Isotropic};
use crate::base::Float;
use crate::geometry::{Point2f, Vector3f};
use std::fmt;

/// Models the directional distribution of scattering in participating
/// media, the volumetric analogue of a BxDF defined over the full sphere of
/// directions and normalized so its integral over the sphere is 1.
///
/// Instances are immutable and carry no per-call state.
#[derive(Clone, Debug)]
pub enum PhaseFunction {
    Isotropic(Isotropic),
    HenyeyGreenstein(HenyeyGreenstein),
}

impl PhaseFunction {
    /// Returns the value of the phase function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn p(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            PhaseFunction::Isotropic(f) => f.p(wo, wi),
            PhaseFunction::HenyeyGreenstein(f) => f.p(wo, wi),
        }
    }

    /// Samples an incident direction given the outgoing direction and a
    /// sample value in `[0, 1)^2`, returning the phase function value at
    /// the sampled direction and the direction itself. Sampling is exact:
    /// the returned value equals the sampled direction's density.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Sample value in `[0, 1)^2`.
    pub fn sample_p(&self, wo: &Vector3f, u: &Point2f) -> (Float, Vector3f) {
        match self {
            PhaseFunction::Isotropic(f) => f.sample_p(wo, u),
            PhaseFunction::HenyeyGreenstein(f) => f.sample_p(wo, u),
        }
    }
}

impl fmt::Display for PhaseFunction {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[PhaseFunction ")?;
        match self {
            Self::Isotropic(p) => write!(f, "{}", p)?,
            Self::HenyeyGreenstein(p) => write!(f, "{}", p)?,
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Float, INV_FOUR_PI, TWO_PI};
    use crate::geometry::Dot;
    use crate::rng::RNG;
    use crate::sampling::{stratified_sample_2d, uniform_sample_sphere, uniform_sphere_pdf};
    use float_cmp::approx_eq;

    fn sphere_integral(phase: &PhaseFunction, wo: &Vector3f) -> Float {
        // Deterministic quadrature over the sphere. Both variants are
        // azimuthally symmetric about wo, so integrate in cosθ only and
        // weight by 2π. A fine grid keeps the strongly peaked g = ±0.9
        // cases accurate; accumulate in f64.
        let n = 65_536;
        let d_cos = 2.0 / n as f64;

        let mut sum = 0.0f64;
        for i in 0..n {
            let cos_theta = (-1.0 + (i as f64 + 0.5) * d_cos) as Float;
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            let wi = Vector3f::new(sin_theta, 0.0, cos_theta);
            sum += phase.p(wo, &wi) as f64 * d_cos;
        }
        (sum * TWO_PI as f64) as Float
    }

    #[test]
    fn isotropic_is_constant_inverse_sphere_area() {
        let phase = Isotropic::new();
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.6, 0.0, -0.8);
        assert_eq!(phase.p(&wo, &wi), INV_FOUR_PI);
        assert!(approx_eq!(
            f32,
            sphere_integral(&phase, &wo),
            1.0,
            epsilon = 1e-4
        ));
    }

    #[test]
    fn henyey_greenstein_is_normalized_over_the_sphere() {
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        for g in [-0.9, -0.5, 0.0, 0.5, 0.9] {
            let phase = HenyeyGreenstein::new(g);
            let integral = sphere_integral(&phase, &wo);
            assert!(
                approx_eq!(f32, integral, 1.0, epsilon = 2e-3),
                "∫p dω = {} for g = {}",
                integral,
                g
            );
        }
    }

    #[test]
    fn sampled_density_equals_evaluated_density() {
        let wo = Vector3f::new(0.48, -0.6, 0.64);
        for g in [-0.9, -0.5, 0.0, 0.5, 0.9] {
            let phase = HenyeyGreenstein::new(g);
            let mut rng = RNG::new(g.to_bits() as u64);
            for u in stratified_sample_2d(&mut rng, 16, 16, true) {
                let (p, wi) = phase.sample_p(&wo, &u);
                assert!(approx_eq!(
                    f32,
                    p,
                    phase.p(&wo, &wi),
                    epsilon = 1e-3 * (1.0 + p)
                ));
                assert!(approx_eq!(f32, wi.length(), 1.0, epsilon = 1e-3));
            }
        }
    }

    #[test]
    fn asymmetry_biases_the_sampled_directions() {
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let mut rng = RNG::new(23);
        let samples = stratified_sample_2d(&mut rng, 32, 32, true);

        let mean_cos = |g: Float| -> Float {
            let phase = HenyeyGreenstein::new(g);
            let mut sum = 0.0;
            for u in &samples {
                let (_, wi) = phase.sample_p(&wo, u);
                sum += wo.dot(&wi);
            }
            sum / samples.len() as Float
        };

        // Forward scattering concentrates around wo; backward away from it.
        assert!(mean_cos(0.8) < -0.5);
        assert!(mean_cos(-0.8) > 0.5);
        assert!(mean_cos(0.0).abs() < 0.1);
    }

    #[test]
    fn isotropic_sampling_matches_uniform_sphere() {
        let phase = Isotropic::new();
        let wo = Vector3f::new(0.0, 1.0, 0.0);
        let u = Point2f::new(0.3, 0.7);
        let (p, wi) = phase.sample_p(&wo, &u);
        assert_eq!(p, uniform_sphere_pdf());
        assert_eq!(wi, uniform_sample_sphere(&u));
    }
}
