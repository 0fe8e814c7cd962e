//! Scaled BxDF

use super::*;
use std::fmt;

/// Adapter that scales another lobe's spectral contribution by a constant
/// factor. Probability densities, sampled directions and flags pass through
/// unmodified; the wrapped lobe's capability flags are inherited. Commonly
/// used when one physical lobe is reused at different intensities in mixed
/// materials.
#[derive(Clone)]
pub struct ScaledBxDF {
    /// BxDF type, inherited from the wrapped lobe.
    bxdf_type: BxDFType,

    /// The wrapped lobe.
    bxdf: Box<BxDF>,

    /// Scaling value.
    scale: Spectrum,
}

impl ScaledBxDF {
    /// Create a new `ScaledBxDF` around an existing lobe.
    ///
    /// * `bxdf`  - The lobe to scale.
    /// * `scale` - Scaling value.
    pub fn new(bxdf: BxDF, scale: Spectrum) -> BxDF {
        BxDF::Scaled(Self {
            bxdf_type: bxdf.get_type(),
            bxdf: Box::new(bxdf),
            scale,
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
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        self.scale * self.bxdf.f(wo, wi)
    }

    /// Forwards sampling to the wrapped lobe, scaling the returned value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let mut sample = self.bxdf.sample_f(wo, u);
        sample.f = self.scale * sample.f;
        sample
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.bxdf.pdf(wo, wi)
    }

    /// Computes the hemispherical-directional reflectance function ρhd.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Samples used by the Monte Carlo estimator.
    pub fn rho_hd(&self, wo: &Vector3f, u: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hd(wo, u)
    }

    /// Computes the hemispherical-hemispherical reflectance function ρhh.
    ///
    /// * `u1` - Samples used by the Monte Carlo estimator.
    /// * `u2` - Samples used by the Monte Carlo estimator.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hh(u1, u2)
    }
}

impl fmt::Display for ScaledBxDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScaledBxDF {{ bxdf: {}, scale: {} }}",
            self.bxdf, self.scale
        )
    }
}
