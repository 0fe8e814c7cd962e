//! Lambertian Reflection

use super::*;
use std::fmt;

/// BRDF for the Lambertian model of perfect diffuse surfaces that scatter
/// incident illumination equally in all directions.
#[derive(Clone)]
pub struct LambertianReflection {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Create a new `LambertianReflection` lobe.
    ///
    /// * `r` - Reflectance spectrum which gives the fraction of incident
    ///         light that is scattered.
    pub fn new(r: Spectrum) -> BxDF {
        BxDF::LambertianReflection(Self {
            bxdf_type: BxDFType::REFLECTION | BxDFType::DIFFUSE,
            r,
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
        self.r * INV_PI
    }

    /// Computes the hemispherical-directional reflectance function ρhd. For
    /// the Lambertian model this is the reflectance itself, exactly.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by the Monte Carlo estimator.
    pub fn rho_hd(&self, _wo: &Vector3f, _u: &[Point2f]) -> Spectrum {
        self.r
    }

    /// Computes the hemispherical-hemispherical reflectance function ρhh.
    ///
    /// * `u1` - Samples used by the Monte Carlo estimator.
    /// * `u2` - Samples used by the Monte Carlo estimator.
    pub fn rho_hh(&self, _u1: &[Point2f], _u2: &[Point2f]) -> Spectrum {
        self.r
    }
}

impl fmt::Display for LambertianReflection {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LambertianReflection {{ bxdf_type: {}, r: {} }}",
            self.bxdf_type, self.r
        )
    }
}
