//! Reflection and surface scattering models.
//!
//! Concrete lobes form a closed set of tagged variants dispatched through
//! `BxDF`; the `BSDF` aggregate composes up to [`MAX_BXDFS`] of them in a
//! shared shading frame.

use crate::base::*;
use crate::geometry::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::fmt;

mod bsdf;
mod bxdf_sample;
mod bxdf_type;
mod common;
mod fresnel;
mod fresnel_specular;
mod lambertian_reflection;
mod microfacet_reflection;
mod scaled_bxdf;
mod specular_reflection;
mod specular_transmission;

// Re-export
pub use bsdf::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use fresnel::*;
pub use fresnel_specular::*;
pub use lambertian_reflection::*;
pub use microfacet_reflection::*;
pub use scaled_bxdf::*;
pub use specular_reflection::*;
pub use specular_transmission::*;

/// The closed set of scattering lobes: BRDFs, BTDFs and the scaling
/// decorator, held by value so an aggregate needs no per-lobe heap
/// allocation.
///
/// Every lobe is immutable once constructed and carries no per-call state;
/// concurrent evaluation from multiple rendering threads is safe.
#[derive(Clone)]
pub enum BxDF {
    FresnelSpecular(FresnelSpecular),
    LambertianReflection(LambertianReflection),
    MicrofacetReflection(MicrofacetReflection),
    Scaled(ScaledBxDF),
    SpecularReflection(SpecularReflection),
    SpecularTransmission(SpecularTransmission),
}

impl BxDF {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::FresnelSpecular(bxdf) => bxdf.get_type(),
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::MicrofacetReflection(bxdf) => bxdf.get_type(),
            BxDF::Scaled(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularTransmission(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns true if this lobe's flags are fully contained in the
    /// requested flag set.
    ///
    /// * `t` - The requested flags.
    pub fn matches_flags(&self, t: BxDFType) -> bool {
        self.get_type().matches(t)
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions. Dirac delta lobes return black; they contribute only
    /// through `sample_f`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            BxDF::FresnelSpecular(bxdf) => bxdf.f(wo, wi),
            BxDF::LambertianReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::Scaled(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.f(wo, wi),
        }
    }

    /// Samples an incident direction for the given outgoing direction,
    /// returning the scattering value, direction, density and sampled lobe
    /// flags. Continuous lobes without their own strategy use
    /// cosine-weighted hemisphere sampling flipped into `wo`'s hemisphere.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values in `[0, 1)^2`.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        match self {
            BxDF::FresnelSpecular(bxdf) => bxdf.sample_f(wo, u),
            BxDF::MicrofacetReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::Scaled(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularTransmission(bxdf) => bxdf.sample_f(wo, u),
            _ => {
                // Cosine-sample the hemisphere, flipping the direction if
                // necessary.
                let mut wi = cosine_sample_hemisphere(u);
                if wo.z < 0.0 {
                    wi.z = -wi.z;
                }
                let pdf = self.pdf(wo, &wi);
                BxDFSample::new(self.f(wo, &wi), pdf, wi, self.get_type())
            }
        }
    }

    /// Evaluates the PDF for the sampling method. The default matches the
    /// cosine-weighted strategy in the `sample_f` default.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            BxDF::FresnelSpecular(bxdf) => bxdf.pdf(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::Scaled(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.pdf(wo, wi),
            _ => {
                if same_hemisphere(wo, wi) {
                    abs_cos_theta(wi) * INV_PI
                } else {
                    0.0
                }
            }
        }
    }

    /// Computes the hemispherical-directional reflectance function ρhd, the
    /// integral of `f * |cosθi|` over the hemisphere, estimated with the
    /// lobe's own sampling strategy.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by the Monte Carlo estimator.
    pub fn rho_hd(&self, wo: &Vector3f, u: &[Point2f]) -> Spectrum {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.rho_hd(wo, u),
            BxDF::Scaled(bxdf) => bxdf.rho_hd(wo, u),
            _ => {
                if u.is_empty() {
                    return Spectrum::ZERO;
                }
                let mut r = Spectrum::ZERO;
                for s in u {
                    // Estimate one term of ρhd, skipping zero-density
                    // samples.
                    let sample = self.sample_f(wo, s);
                    if sample.pdf > 0.0 {
                        r += sample.f * abs_cos_theta(&sample.wi) / sample.pdf;
                    }
                }
                r / u.len() as Float
            }
        }
    }

    /// Computes the hemispherical-hemispherical reflectance function ρhh,
    /// the average reflectance over all direction pairs, by jointly sampling
    /// the outgoing direction uniformly over the hemisphere.
    ///
    /// * `u1` - Samples used by the Monte Carlo estimator.
    /// * `u2` - Samples used by the Monte Carlo estimator.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.rho_hh(u1, u2),
            BxDF::Scaled(bxdf) => bxdf.rho_hh(u1, u2),
            _ => {
                assert!(u1.len() == u2.len());
                if u1.is_empty() {
                    return Spectrum::ZERO;
                }

                let mut r = Spectrum::ZERO;
                for (s1, s2) in u1.iter().zip(u2.iter()) {
                    // Estimate one term of ρhh.
                    let wo = uniform_sample_hemisphere(s1);
                    let pdf_o = uniform_hemisphere_pdf();
                    let sample = self.sample_f(&wo, s2);
                    if sample.pdf > 0.0 {
                        r += sample.f * abs_cos_theta(&sample.wi) * abs_cos_theta(&wo)
                            / (pdf_o * sample.pdf);
                    }
                }
                r / (PI * u1.len() as Float)
            }
        }
    }
}

impl fmt::Display for BxDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BxDF::FresnelSpecular(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::LambertianReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::MicrofacetReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::Scaled(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::SpecularReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::SpecularTransmission(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::TransportMode;
    use crate::microfacet::TrowbridgeReitzDistribution;
    use crate::rng::RNG;
    use crate::sampling::stratified_sample_2d;
    use float_cmp::approx_eq;

    fn sample_set(seed: u64, n: usize) -> Vec<Point2f> {
        let mut rng = RNG::new(seed);
        stratified_sample_2d(&mut rng, n, n, true)
    }

    #[test]
    fn lambertian_f_is_albedo_over_pi() {
        let albedo = Spectrum::from([0.25, 0.5, 0.75]);
        let bxdf = LambertianReflection::new(albedo);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.3, 0.3, 0.9055).normalize();
        assert_eq!(bxdf.f(&wo, &wi), albedo * INV_PI);
        assert_eq!(bxdf.rho_hd(&wo, &sample_set(1, 4)), albedo);
    }

    #[test]
    fn default_pdf_integrates_to_one_over_hemisphere() {
        // MC estimate of ∫ pdf dω over the sphere with uniform directions.
        let bxdf = LambertianReflection::new(Spectrum::new(0.8));
        let wo = Vector3f::new(0.2, -0.1, 0.97).normalize();

        let samples = sample_set(2, 128);
        let mut estimate = 0.0;
        for u in &samples {
            let wi = crate::sampling::uniform_sample_sphere(u);
            estimate += bxdf.pdf(&wo, &wi) / crate::sampling::uniform_sphere_pdf();
        }
        estimate /= samples.len() as Float;
        assert!(approx_eq!(f32, estimate, 1.0, epsilon = 0.02));
    }

    #[test]
    fn importance_sampled_rho_hd_recovers_albedo() {
        // MC estimate of ∫ f |cosθi| dωi for a diffuse lobe must equal the
        // albedo when sample_f and pdf agree.
        let albedo = Spectrum::from([0.2, 0.4, 0.6]);
        let bxdf = LambertianReflection::new(albedo);
        let wo = Vector3f::new(0.0, 0.0, 1.0);

        let samples = sample_set(3, 100);
        let mut r = Spectrum::ZERO;
        for u in &samples {
            let sample = bxdf.sample_f(&wo, u);
            if sample.pdf > 0.0 {
                r += sample.f * abs_cos_theta(&sample.wi) / sample.pdf;
            }
        }
        r /= samples.len() as Float;

        for ch in 0..3 {
            assert!(approx_eq!(f32, r[ch], albedo[ch], epsilon = 0.01));
        }
    }

    #[test]
    fn default_rho_hd_estimator_handles_dirac_lobes() {
        // A perfect mirror reflects everything; the default estimator must
        // recover its reflectance exactly from pdf-1 samples.
        let r = Spectrum::from([0.9, 0.8, 0.7]);
        let bxdf = SpecularReflection::new(r, FresnelNoOp::new());
        let wo = Vector3f::new(0.3, 0.1, 0.95).normalize();
        let rho = bxdf.rho_hd(&wo, &sample_set(9, 8));
        for ch in 0..3 {
            assert!(approx_eq!(f32, rho[ch], r[ch], epsilon = 1e-5));
        }
    }

    #[test]
    fn default_sampling_flips_into_outgoing_hemisphere() {
        let bxdf = LambertianReflection::new(Spectrum::new(0.5));
        let below = Vector3f::new(0.1, 0.2, -0.97).normalize();
        for u in sample_set(4, 8) {
            let sample = bxdf.sample_f(&below, &u);
            assert!(sample.wi.z <= 0.0);
            assert!(same_hemisphere(&below, &sample.wi) || sample.pdf == 0.0);
        }
    }

    #[test]
    fn specular_reflection_is_dirac() {
        let bxdf = SpecularReflection::new(Spectrum::ONE, FresnelNoOp::new());
        let wo = Vector3f::new(0.4, -0.3, 0.866).normalize();
        let wi = Vector3f::new(-0.4, 0.3, 0.866).normalize();
        assert!(bxdf.f(&wo, &wi).is_black());
        assert_eq!(bxdf.pdf(&wo, &wi), 0.0);

        let sample = bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(sample.pdf, 1.0);
        assert!(approx_eq!(f32, sample.wi.x, -wo.x, epsilon = 1e-6));
        assert!(approx_eq!(f32, sample.wi.y, -wo.y, epsilon = 1e-6));
        assert!(approx_eq!(f32, sample.wi.z, wo.z, epsilon = 1e-6));
    }

    #[test]
    fn specular_transmission_reports_total_internal_reflection() {
        // Dense-to-thin interface beyond the critical angle.
        let bxdf = SpecularTransmission::new(
            Spectrum::ONE,
            1.0,
            1.5,
            TransportMode::Radiance,
        );

        // wo below the surface (inside the dense medium), grazing.
        let wo = Vector3f::new(0.9, 0.0, -(1.0f32 - 0.81).sqrt());
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(sample.pdf, 0.0);
        assert!(sample.f.is_black());

        // Near-normal incidence transmits with pdf 1.
        let wo = Vector3f::new(0.1, 0.0, (1.0f32 - 0.01).sqrt());
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(sample.pdf, 1.0);
        assert!(!sample.f.is_black());
        assert!(sample.wi.z < 0.0);
    }

    #[test]
    fn fresnel_specular_splits_by_reflectance() {
        let bxdf = FresnelSpecular::new(
            Spectrum::ONE,
            Spectrum::ONE,
            1.0,
            1.5,
            TransportMode::Radiance,
        );
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let fr = fr_dielectric(1.0, 1.0, 1.5);

        // First sample dimension below the reflectance picks reflection.
        let sample = bxdf.sample_f(&wo, &Point2f::new(fr * 0.5, 0.5));
        assert!(sample.bxdf_type.contains(BxDFType::REFLECTION));
        assert!(approx_eq!(f32, sample.pdf, fr, epsilon = 1e-6));

        // Above it picks transmission.
        let sample = bxdf.sample_f(&wo, &Point2f::new(fr + (1.0 - fr) * 0.5, 0.5));
        assert!(sample.bxdf_type.contains(BxDFType::TRANSMISSION));
        assert!(approx_eq!(f32, sample.pdf, 1.0 - fr, epsilon = 1e-6));
    }

    #[test]
    fn scaled_bxdf_scales_spectra_only() {
        let albedo = Spectrum::from([0.3, 0.6, 0.9]);
        let scale = Spectrum::from([0.5, 0.25, 1.0]);
        let inner = LambertianReflection::new(albedo);
        let scaled = ScaledBxDF::new(inner.clone(), scale);

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.3, -0.4, 0.866).normalize();

        assert_eq!(scaled.f(&wo, &wi), scale * inner.f(&wo, &wi));
        assert_eq!(scaled.pdf(&wo, &wi), inner.pdf(&wo, &wi));
        assert_eq!(scaled.get_type(), inner.get_type());
        assert_eq!(scaled.rho_hd(&wo, &sample_set(5, 4)), scale * albedo);

        let u = Point2f::new(0.7, 0.3);
        let s0 = inner.sample_f(&wo, &u);
        let s1 = scaled.sample_f(&wo, &u);
        assert_eq!(s1.f, scale * s0.f);
        assert_eq!(s1.pdf, s0.pdf);
        assert_eq!(s1.wi, s0.wi);
    }

    #[test]
    fn microfacet_sample_and_pdf_agree() {
        let distrib = TrowbridgeReitzDistribution::new(0.3, 0.3, true);
        let bxdf = MicrofacetReflection::new(
            Spectrum::new(1.0),
            distrib,
            FresnelDielectric::new(1.0, 1.5),
        );
        let wo = Vector3f::new(0.25, -0.1, 0.96).normalize();

        for u in sample_set(6, 12) {
            let sample = bxdf.sample_f(&wo, &u);
            if sample.pdf > 0.0 {
                let pdf = bxdf.pdf(&wo, &sample.wi);
                assert!(approx_eq!(
                    f32,
                    pdf,
                    sample.pdf,
                    epsilon = 1e-3 * (1.0 + sample.pdf)
                ));
            }
        }
    }

    #[test]
    fn rho_hh_of_diffuse_lobe_is_albedo() {
        let albedo = Spectrum::new(0.66);
        let bxdf = LambertianReflection::new(albedo);
        assert_eq!(bxdf.rho_hh(&sample_set(7, 4), &sample_set(8, 4)), albedo);
    }
}
