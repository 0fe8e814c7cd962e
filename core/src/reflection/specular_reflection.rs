//! Specular Reflection

use super::*;
use std::fmt;

/// BRDF for physically plausible specular reflection using a Fresnel
/// interface. A Dirac delta lobe: `f` is black everywhere and all
/// contribution arrives through sampling.
#[derive(Clone)]
pub struct SpecularReflection {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Fresnel interface for dielectrics and conductors.
    fresnel: Fresnel,

    /// Spectrum used to scale the reflected colour.
    r: Spectrum,
}

impl SpecularReflection {
    /// Create a new `SpecularReflection` lobe.
    ///
    /// * `r`       - Spectrum used to scale the reflected colour.
    /// * `fresnel` - Fresnel interface for dielectrics and conductors.
    pub fn new(r: Spectrum, fresnel: Fresnel) -> BxDF {
        BxDF::SpecularReflection(Self {
            bxdf_type: BxDFType::REFLECTION | BxDFType::SPECULAR,
            fresnel,
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
        // Dirac delta; no scattering is returned for arbitrary pairs.
        Spectrum::ZERO
    }

    /// Samples the single direction with non-zero contribution.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        // Compute perfect specular reflection direction.
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let pdf = 1.0;
        let s = self.fresnel.evaluate(cos_theta(&wi)) * self.r / abs_cos_theta(&wi);
        BxDFSample::new(s, pdf, wi, self.bxdf_type)
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}

impl fmt::Display for SpecularReflection {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpecularReflection {{ bxdf_type: {}, fresnel: {}, r: {} }}",
            self.bxdf_type, self.fresnel, self.r
        )
    }
}
