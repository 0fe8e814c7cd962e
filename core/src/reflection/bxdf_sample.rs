//! BxDF Sample

use super::BxDFType;
use crate::base::Float;
use crate::geometry::Vector3f;
use crate::spectrum::Spectrum;

/// Result of importance-sampling a scattering model: the sampled incident
/// direction, its solid-angle probability density, the scattering value for
/// the pair of directions and the flags of the lobe that produced it.
///
/// A `pdf` of 0 means "no contribution"; callers must not divide by it.
#[derive(Copy, Clone, Default)]
pub struct BxDFSample {
    /// The sample value.
    pub f: Spectrum,

    /// The value of the PDF.
    pub pdf: Float,

    /// The sampled incident direction.
    pub wi: Vector3f,

    /// The type of the lobe that was sampled.
    pub bxdf_type: BxDFType,
}

impl BxDFSample {
    /// Create a new `BxDFSample`.
    ///
    /// * `f`         - The sample value.
    /// * `pdf`       - The value of the PDF.
    /// * `wi`        - The sampled incident direction.
    /// * `bxdf_type` - The type of the lobe that was sampled.
    pub fn new(f: Spectrum, pdf: Float, wi: Vector3f, bxdf_type: BxDFType) -> Self {
        Self {
            f,
            pdf,
            wi,
            bxdf_type,
        }
    }
}

impl From<BxDFType> for BxDFSample {
    /// Create a zero-contribution `BxDFSample` carrying just the lobe type.
    ///
    /// * `bxdf_type` - The type of the lobe that was sampled.
    fn from(bxdf_type: BxDFType) -> Self {
        Self::new(Spectrum::ZERO, 0.0, Vector3f::zero(), bxdf_type)
    }
}
