//! BSDF

use super::*;
use crate::rng::ONE_MINUS_EPSILON;
use std::fmt;

/// Maximum number of lobes that can be stored in a `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// A collection of BRDFs and BTDFs sharing one local shading frame. Built
/// once per shading point and dropped with it; lobes are held by value in a
/// fixed-capacity inline array.
#[derive(Clone)]
pub struct BSDF {
    /// The shading normal given by per-vertex normals and/or bump mapping.
    /// It is the z-axis of the orthonormal shading frame and defines the
    /// hemispheres used for integrating incident illumination.
    pub ns: Normal3f,

    /// The geometric normal defined by the surface geometry. Used only to
    /// decide whether a direction pair reflects or transmits; never for
    /// frame construction.
    pub ng: Normal3f,

    /// Primary tangent, the x-axis of the shading frame.
    pub ss: Vector3f,

    /// Bitangent, the y-axis of the shading frame.
    pub ts: Vector3f,

    /// Relative index of refraction over the surface boundary.
    pub eta: Float,

    /// The lobes.
    bxdfs: [Option<BxDF>; MAX_BXDFS],

    /// Number of occupied lobe slots.
    n_bxdfs: usize,
}

impl BSDF {
    /// Creates a new `BSDF` for a shading point.
    ///
    /// `ns` and `dpdu` must be consistent: the frame is built from the
    /// shading normal and the normalized primary tangent.
    ///
    /// * `ns`   - The shading normal.
    /// * `ng`   - The geometric normal.
    /// * `dpdu` - The surface partial derivative along u; primary tangent.
    /// * `eta`  - Optional relative index of refraction over the surface
    ///            boundary. Defaults to 1.0, used for opaque surfaces.
    pub fn new(ns: Normal3f, ng: Normal3f, dpdu: &Vector3f, eta: Option<Float>) -> Self {
        let eta = eta.unwrap_or(1.0);
        let ss = dpdu.normalize();

        Self {
            eta,
            ns,
            ng,
            ss,
            ts: Vector3f::from(ns).cross(&ss),
            bxdfs: Default::default(),
            n_bxdfs: 0,
        }
    }

    /// Add a lobe.
    ///
    /// Exceeding [`MAX_BXDFS`] is a precondition violation in the calling
    /// material system, not a runtime condition; it panics.
    ///
    /// * `bxdf` - The lobe.
    pub fn add(&mut self, bxdf: BxDF) {
        assert!(
            self.n_bxdfs < MAX_BXDFS,
            "Cannot add BxDF. BSDF maximum limit {} reached.",
            MAX_BXDFS
        );
        self.bxdfs[self.n_bxdfs] = Some(bxdf);
        self.n_bxdfs += 1;
    }

    /// Returns the number of stored lobes.
    pub fn num_bxdfs(&self) -> usize {
        self.n_bxdfs
    }

    /// Returns the number of lobes that match the given flags.
    ///
    /// * `bxdf_type` - The flags to match.
    pub fn num_components(&self, bxdf_type: BxDFType) -> usize {
        self.bxdfs().filter(|b| b.matches_flags(bxdf_type)).count()
    }

    /// Transforms a vector from world space to the local shading frame.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Transforms a vector from the local shading frame to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        )
    }

    /// Returns the BSDF evaluated for a pair of world-space directions,
    /// summing the matching lobes. Requesting flags that match no lobe
    /// yields black; that is tolerated, not an error.
    ///
    /// * `wo_w`      - Outgoing direction in world space.
    /// * `wi_w`      - Incident direction in world space.
    /// * `bxdf_type` - The flags to match.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let wi = self.world_to_local(wi_w);
        let wo = self.world_to_local(wo_w);

        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }

        // The geometric normal decides whether the pair reflects or
        // transmits; shading-frame hemispheres can disagree near silhouettes.
        let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
        let mut l = Spectrum::ZERO;
        for bxdf in self.bxdfs() {
            if bxdf.matches_flags(bxdf_type)
                && ((reflect && bxdf.get_type().contains(BxDFType::REFLECTION))
                    || (!reflect && bxdf.get_type().contains(BxDFType::TRANSMISSION)))
            {
                l += bxdf.f(&wo, &wi);
            }
        }
        l
    }

    /// Samples an incident direction for the given world-space outgoing
    /// direction by choosing one matching lobe from the first sample
    /// dimension and accumulating value and density over the others.
    ///
    /// * `wo_w`      - Outgoing direction in world space.
    /// * `u`         - The 2D uniform random values.
    /// * `bxdf_type` - The flags to match.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f, bxdf_type: BxDFType) -> BxDFSample {
        // Choose which lobe to sample.
        let matching_comps = self.num_components(bxdf_type);
        if matching_comps == 0 {
            return BxDFSample::default();
        }
        let comp = min(
            (u[0] * matching_comps as Float).floor() as usize,
            matching_comps - 1,
        );

        // Get the lobe for the chosen component.
        let (chosen_index, bxdf) = match self
            .bxdfs()
            .enumerate()
            .filter(|(_, b)| b.matches_flags(bxdf_type))
            .nth(comp)
        {
            Some(found) => found,
            None => {
                error!("BSDF::sample_f() did not find matching BxDF");
                return BxDFSample::default();
            }
        };

        // Remap the sample to [0,1)^2 so the chosen dimension stays usable.
        let u_remapped = Point2f::new(
            min(
                u[0] * matching_comps as Float - comp as Float,
                ONE_MINUS_EPSILON,
            ),
            u[1],
        );

        // Sample the chosen lobe.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return BxDFSample::default();
        }

        let sample = bxdf.sample_f(&wo, &u_remapped);
        if sample.pdf == 0.0 {
            return BxDFSample::from(sample.bxdf_type);
        }
        let wi = sample.wi;
        let wi_w = self.local_to_world(&wi);

        // Compute the overall PDF with all matching lobes.
        let mut pdf = sample.pdf;
        if !bxdf.get_type().contains(BxDFType::SPECULAR) && matching_comps > 1 {
            for (i, b) in self.bxdfs().enumerate() {
                if i != chosen_index && b.matches_flags(bxdf_type) {
                    pdf += b.pdf(&wo, &wi);
                }
            }
        }
        if matching_comps > 1 {
            pdf /= matching_comps as Float;
        }

        // Compute the value of the BSDF for the sampled direction.
        let mut f = sample.f;
        if !bxdf.get_type().contains(BxDFType::SPECULAR) {
            let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
            f = Spectrum::ZERO;
            for b in self.bxdfs() {
                if b.matches_flags(bxdf_type)
                    && ((reflect && b.get_type().contains(BxDFType::REFLECTION))
                        || (!reflect && b.get_type().contains(BxDFType::TRANSMISSION)))
                {
                    f += b.f(&wo, &wi);
                }
            }
        }
        BxDFSample::new(f, pdf, wi_w, sample.bxdf_type)
    }

    /// Evaluates the PDF for a pair of world-space directions, averaged
    /// over the matching lobes.
    ///
    /// * `wo_w`      - Outgoing direction in world space.
    /// * `wi_w`      - Incident direction in world space.
    /// * `bxdf_type` - The flags to match.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Float {
        if self.n_bxdfs == 0 {
            return 0.0;
        }

        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);

        if wo.z == 0.0 {
            return 0.0;
        }

        let mut matching_comps = 0;
        let mut pdf = 0.0;
        for bxdf in self.bxdfs() {
            if bxdf.matches_flags(bxdf_type) {
                matching_comps += 1;
                pdf += bxdf.pdf(&wo, &wi);
            }
        }
        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }

    /// Computes the hemispherical-directional reflectance function ρhd over
    /// the matching lobes.
    ///
    /// * `wo_w`      - Outgoing direction in world space.
    /// * `u`         - Samples used by the Monte Carlo estimator.
    /// * `bxdf_type` - The flags to match.
    pub fn rho_hd(&self, wo_w: &Vector3f, u: &[Point2f], bxdf_type: BxDFType) -> Spectrum {
        let wo = self.world_to_local(wo_w);

        let mut l = Spectrum::ZERO;
        for bxdf in self.bxdfs() {
            if bxdf.matches_flags(bxdf_type) {
                l += bxdf.rho_hd(&wo, u);
            }
        }
        l
    }

    /// Computes the hemispherical-hemispherical reflectance function ρhh
    /// over the matching lobes.
    ///
    /// * `u1`        - Samples used by the Monte Carlo estimator.
    /// * `u2`        - Samples used by the Monte Carlo estimator.
    /// * `bxdf_type` - The flags to match.
    pub fn rho_hh(&self, u1: &[Point2f], u2: &[Point2f], bxdf_type: BxDFType) -> Spectrum {
        let mut l = Spectrum::ZERO;
        for bxdf in self.bxdfs() {
            if bxdf.matches_flags(bxdf_type) {
                l += bxdf.rho_hh(u1, u2);
            }
        }
        l
    }

    /// Iterates the occupied lobe slots.
    fn bxdfs(&self) -> impl Iterator<Item = &BxDF> {
        self.bxdfs[..self.n_bxdfs].iter().flatten()
    }
}

impl fmt::Display for BSDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BSDF {{ ns: ({}, {}, {}), ng: ({}, {}, {}), eta: {}, bxdfs: [",
            self.ns.x, self.ns.y, self.ns.z, self.ng.x, self.ng.y, self.ng.z, self.eta
        )?;
        for (i, bxdf) in self.bxdfs().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", bxdf)?;
        }
        write!(f, "] }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::TransportMode;
    use crate::rng::RNG;
    use crate::sampling::stratified_sample_2d;
    use float_cmp::approx_eq;

    fn shading_frame() -> BSDF {
        let n = Normal3f::new(0.0, 0.0, 1.0);
        BSDF::new(n, n, &Vector3f::new(1.0, 0.0, 0.0), None)
    }

    fn tilted_frame() -> BSDF {
        // Shading normal along +x in world space.
        let n = Normal3f::new(1.0, 0.0, 0.0);
        BSDF::new(n, n, &Vector3f::new(0.0, 1.0, 0.0), None)
    }

    #[test]
    fn frame_round_trips_directions() {
        let bsdf = tilted_frame();
        let v = Vector3f::new(0.36, 0.48, 0.8);
        let local = bsdf.world_to_local(&v);
        let back = bsdf.local_to_world(&local);
        assert!(approx_eq!(f32, back.x, v.x, epsilon = 1e-6));
        assert!(approx_eq!(f32, back.y, v.y, epsilon = 1e-6));
        assert!(approx_eq!(f32, back.z, v.z, epsilon = 1e-6));

        // The shading normal maps to +z in local space.
        let local_n = bsdf.world_to_local(&Vector3f::from(bsdf.ns));
        assert!(approx_eq!(f32, local_n.z, 1.0, epsilon = 1e-6));
    }

    #[test]
    fn f_filters_by_flags() {
        let mut bsdf = shading_frame();
        bsdf.add(LambertianReflection::new(Spectrum::new(0.5)));

        let wo = Vector3f::new(0.0, 0.3, 0.954).normalize();
        let wi = Vector3f::new(0.3, 0.0, 0.954).normalize();

        let full = bsdf.f(&wo, &wi, BxDFType::ALL);
        assert!(approx_eq!(f32, full[0], 0.5 * INV_PI, epsilon = 1e-6));

        // A transmission-only query matches nothing and is tolerated.
        let none = bsdf.f(&wo, &wi, BxDFType::TRANSMISSION | BxDFType::DIFFUSE);
        assert!(none.is_black());
    }

    #[test]
    fn sample_f_of_single_diffuse_lobe_matches_lobe_pdf() {
        let mut bsdf = shading_frame();
        bsdf.add(LambertianReflection::new(Spectrum::new(0.8)));

        let wo = Vector3f::new(0.1, -0.2, 0.97).normalize();
        let mut rng = RNG::new(3);
        for u in stratified_sample_2d(&mut rng, 8, 8, true) {
            let sample = bsdf.sample_f(&wo, &u, BxDFType::ALL);
            if sample.pdf > 0.0 {
                let pdf = bsdf.pdf(&wo, &sample.wi, BxDFType::ALL);
                assert!(approx_eq!(f32, pdf, sample.pdf, epsilon = 1e-4));
            }
        }
    }

    #[test]
    fn sample_f_averages_pdf_over_matching_lobes() {
        let mut bsdf = shading_frame();
        bsdf.add(LambertianReflection::new(Spectrum::new(0.4)));
        bsdf.add(LambertianReflection::new(Spectrum::new(0.2)));

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let sample = bsdf.sample_f(&wo, &Point2f::new(0.3, 0.4), BxDFType::ALL);
        assert!(sample.pdf > 0.0);

        // Two identical cosine-weighted lobes: the mixture pdf equals the
        // single-lobe pdf.
        let expected = abs_cos_theta(&bsdf.world_to_local(&sample.wi)) * INV_PI;
        assert!(approx_eq!(f32, sample.pdf, expected, epsilon = 1e-5));

        // And f sums both lobes.
        let f = bsdf.f(&wo, &sample.wi, BxDFType::ALL);
        assert!(approx_eq!(f32, f[0], 0.6 * INV_PI, epsilon = 1e-6));
        assert!(approx_eq!(f32, sample.f[0], f[0], epsilon = 1e-6));
    }

    #[test]
    fn sample_f_with_no_matching_lobe_is_tolerated() {
        let mut bsdf = shading_frame();
        bsdf.add(LambertianReflection::new(Spectrum::new(0.4)));

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let sample = bsdf.sample_f(
            &wo,
            &Point2f::new(0.5, 0.5),
            BxDFType::TRANSMISSION | BxDFType::SPECULAR,
        );
        assert_eq!(sample.pdf, 0.0);
        assert!(sample.f.is_black());
    }

    #[test]
    fn specular_lobe_samples_through_aggregate() {
        let mut bsdf = shading_frame();
        bsdf.add(SpecularReflection::new(Spectrum::ONE, FresnelNoOp::new()));

        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let sample = bsdf.sample_f(&wo, &Point2f::new(0.5, 0.5), BxDFType::ALL);
        assert_eq!(sample.pdf, 1.0);
        assert!(sample.bxdf_type.contains(BxDFType::SPECULAR));

        // Mirror direction about the shading normal in world space.
        assert!(approx_eq!(f32, sample.wi.x, -0.6, epsilon = 1e-5));
        assert!(approx_eq!(f32, sample.wi.z, 0.8, epsilon = 1e-5));

        // f and pdf queries on a Dirac lobe stay zero.
        assert!(bsdf.f(&wo, &sample.wi, BxDFType::ALL).is_black());
        assert_eq!(bsdf.pdf(&wo, &sample.wi, BxDFType::ALL), 0.0);
    }

    #[test]
    fn mixed_specular_and_diffuse_split() {
        let mut bsdf = shading_frame();
        bsdf.add(LambertianReflection::new(Spectrum::new(0.5)));
        bsdf.add(FresnelSpecular::new(
            Spectrum::ONE,
            Spectrum::ONE,
            1.0,
            1.5,
            TransportMode::Radiance,
        ));
        assert_eq!(bsdf.num_components(BxDFType::ALL), 2);
        assert_eq!(
            bsdf.num_components(BxDFType::REFLECTION | BxDFType::DIFFUSE),
            1
        );

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        // First dimension in [0, 0.5) picks the diffuse lobe.
        let sample = bsdf.sample_f(&wo, &Point2f::new(0.25, 0.7), BxDFType::ALL);
        assert!(sample.bxdf_type.contains(BxDFType::DIFFUSE));
        // The mixture average halves the diffuse pdf.
        let lobe_pdf = abs_cos_theta(&bsdf.world_to_local(&sample.wi)) * INV_PI;
        assert!(approx_eq!(f32, sample.pdf, 0.5 * lobe_pdf, epsilon = 1e-5));
    }

    #[test]
    fn rho_sums_matching_lobes() {
        let mut bsdf = shading_frame();
        bsdf.add(LambertianReflection::new(Spectrum::new(0.25)));
        bsdf.add(LambertianReflection::new(Spectrum::new(0.5)));

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let mut rng = RNG::new(17);
        let u1 = stratified_sample_2d(&mut rng, 4, 4, true);
        let u2 = stratified_sample_2d(&mut rng, 4, 4, true);

        let rho = bsdf.rho_hd(&wo, &u1, BxDFType::ALL);
        assert!(approx_eq!(f32, rho[0], 0.75, epsilon = 1e-6));

        let rho = bsdf.rho_hh(&u1, &u2, BxDFType::ALL);
        assert!(approx_eq!(f32, rho[0], 0.75, epsilon = 1e-6));
    }

    #[test]
    #[should_panic(expected = "maximum limit")]
    fn capacity_overflow_is_a_precondition_violation() {
        let mut bsdf = shading_frame();
        for _ in 0..=MAX_BXDFS {
            bsdf.add(LambertianReflection::new(Spectrum::new(0.1)));
        }
    }
}
