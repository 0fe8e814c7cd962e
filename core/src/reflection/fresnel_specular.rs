//! Fresnel-Modulated Specular Reflection and Transmission

use super::*;
use crate::material::TransportMode;
use std::fmt;

/// BxDF combining specular reflection and specular transmission at a
/// dielectric boundary, choosing between them with probability equal to the
/// Fresnel reflectance of the sampled configuration.
#[derive(Clone)]
pub struct FresnelSpecular {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Spectrum used to scale the reflected colour.
    r: Spectrum,

    /// Spectrum used to scale the transmitted colour.
    t: Spectrum,

    /// Index of refraction above the surface (same side as surface normal).
    eta_a: Float,

    /// Index of refraction below the surface (opposite side as surface
    /// normal).
    eta_b: Float,

    /// Indicates whether the incident ray started from a light source or
    /// from the camera.
    mode: TransportMode,
}

impl FresnelSpecular {
    /// Create a new `FresnelSpecular` lobe.
    ///
    /// * `r`     - Spectrum used to scale the reflected colour.
    /// * `t`     - Spectrum used to scale the transmitted colour.
    /// * `eta_a` - Index of refraction above the surface.
    /// * `eta_b` - Index of refraction below the surface.
    /// * `mode`  - Indicates whether the incident ray started from a light
    ///             source or from the camera.
    pub fn new(r: Spectrum, t: Spectrum, eta_a: Float, eta_b: Float, mode: TransportMode) -> BxDF {
        BxDF::FresnelSpecular(Self {
            bxdf_type: BxDFType::REFLECTION | BxDFType::TRANSMISSION | BxDFType::SPECULAR,
            r,
            t,
            eta_a,
            eta_b,
            mode,
        })
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        // Dirac delta in both lobes.
        Spectrum::ZERO
    }

    /// Samples either the reflected or the transmitted direction, weighting
    /// the choice by the Fresnel reflectance so the estimator stays
    /// unbiased with a single sample.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let fr = fr_dielectric(cos_theta(wo), self.eta_a, self.eta_b);

        if u[0] < fr {
            // Specular reflection, chosen with probability fr.
            let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
            let sampled_type = BxDFType::REFLECTION | BxDFType::SPECULAR;
            BxDFSample::new(fr * self.r / abs_cos_theta(&wi), fr, wi, sampled_type)
        } else {
            // Specular transmission, chosen with probability 1 - fr.
            let entering = cos_theta(wo) > 0.0;
            let eta_i = if entering { self.eta_a } else { self.eta_b };
            let eta_t = if entering { self.eta_b } else { self.eta_a };

            let sampled_type = BxDFType::TRANSMISSION | BxDFType::SPECULAR;
            let n = Normal3f::new(0.0, 0.0, 1.0).face_forward(wo);
            if let Some(wi) = refract(wo, &n, eta_i / eta_t) {
                let mut ft = self.t * (1.0 - fr);

                // Account for non-symmetry with transmission to a different
                // medium.
                if self.mode == TransportMode::Radiance {
                    ft *= (eta_i * eta_i) / (eta_t * eta_t);
                }

                BxDFSample::new(ft / abs_cos_theta(&wi), 1.0 - fr, wi, sampled_type)
            } else {
                BxDFSample::from(sampled_type)
            }
        }
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}

impl fmt::Display for FresnelSpecular {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FresnelSpecular {{ bxdf_type: {}, r: {}, t: {}, eta_a: {}, eta_b: {}, mode: {} }}",
            self.bxdf_type, self.r, self.t, self.eta_a, self.eta_b, self.mode
        )
    }
}
