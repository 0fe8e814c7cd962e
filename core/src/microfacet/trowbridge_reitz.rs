//! Trowbridge-Reitz Distribution

#![allow(dead_code)]

use crate::base::*;
use crate::geometry::*;
use crate::reflection::{
    abs_cos_theta, cos_2_phi, cos_2_theta, cos_phi, cos_theta, same_hemisphere, sin_2_phi,
    sin_phi, tan_2_theta, tan_theta,
};
use std::fmt;

/// The anisotropic Trowbridge-Reitz (GGX) microfacet distribution. Describes
/// the differential area of microfacets as a function of their orientation
/// and drives the glossy reflection lobe.
#[derive(Copy, Clone, Default)]
pub struct TrowbridgeReitzDistribution {
    /// Indicates whether only the visible area of microfacets is sampled.
    sample_visible_area: bool,

    /// Roughness in the tangent direction, where α = sqrt(2) * σ and σ is
    /// the RMS slope of microfacets.
    alpha_x: Float,

    /// Roughness in the bitangent direction.
    alpha_y: Float,
}

impl TrowbridgeReitzDistribution {
    /// Create a new `TrowbridgeReitzDistribution`.
    ///
    /// * `alpha_x`             - Roughness in the tangent direction.
    /// * `alpha_y`             - Roughness in the bitangent direction.
    /// * `sample_visible_area` - Sample only the visible area of microfacets.
    pub fn new(alpha_x: Float, alpha_y: Float, sample_visible_area: bool) -> Self {
        Self {
            sample_visible_area,
            alpha_x: max(0.001, alpha_x),
            alpha_y: max(0.001, alpha_y),
        }
    }

    /// Maps a scalar roughness parameter in [0, 1] to alpha values where
    /// values close to 0 are near-perfect specular reflection.
    ///
    /// * `roughness` - Roughness parameter value.
    pub fn roughness_to_alpha(roughness: Float) -> Float {
        let roughness = max(roughness, 1e-3);
        let x = roughness.ln();
        1.62142
            + 0.819955 * x
            + 0.1734 * x * x
            + 0.0171201 * x * x * x
            + 0.000640711 * x * x * x * x
    }

    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distribution of normal vectors.
    pub fn d(&self, wh: &Vector3f) -> Float {
        let tan2_theta = tan_2_theta(wh);
        if tan2_theta.is_infinite() {
            0.0
        } else {
            let cos4_theta = cos_2_theta(wh) * cos_2_theta(wh);
            let e = (cos_2_phi(wh) / (self.alpha_x * self.alpha_x)
                + sin_2_phi(wh) / (self.alpha_y * self.alpha_y))
                * tan2_theta;
            1.0 / (PI * self.alpha_x * self.alpha_y * cos4_theta * (1.0 + e) * (1.0 + e))
        }
    }

    /// Returns the invisible masked microfacet area per visible microfacet
    /// area.
    ///
    /// * `w` - The direction from camera/viewer.
    pub fn lambda(&self, w: &Vector3f) -> Float {
        let abs_tan_theta = abs(tan_theta(w));
        if abs_tan_theta.is_infinite() {
            0.0
        } else {
            let alpha = (cos_2_phi(w) * self.alpha_x * self.alpha_x
                + sin_2_phi(w) * self.alpha_y * self.alpha_y)
                .sqrt();
            let alpha2_tan2_theta = (alpha * abs_tan_theta) * (alpha * abs_tan_theta);
            (-1.0 + (1.0 + alpha2_tan2_theta).sqrt()) / 2.0
        }
    }

    /// Evaluates Smith's masking-shadowing function, the fraction of
    /// microfacets visible from a given direction.
    ///
    /// * `w` - The direction from camera/viewer.
    pub fn g1(&self, w: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(w))
    }

    /// Returns the fraction of microfacets in a differential area that are
    /// visible from both directions `wo` and `wi`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn g(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(wo) + self.lambda(wi))
    }

    /// Returns a sample from the distribution of normal vectors.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        if !self.sample_visible_area {
            let mut phi = TWO_PI * u[1];
            let cos_theta = if self.alpha_x == self.alpha_y {
                let tan_theta2 = self.alpha_x * self.alpha_x * u[0] / (1.0 - u[0]);
                1.0 / (1.0 + tan_theta2).sqrt()
            } else {
                phi = atan(self.alpha_y / self.alpha_x * tan(TWO_PI * u[1] + 0.5 * PI));
                if u[1] > 0.5 {
                    phi += PI;
                }
                let sin_phi = sin(phi);
                let cos_phi = cos(phi);
                let alpha_x2 = self.alpha_x * self.alpha_x;
                let alpha_y2 = self.alpha_y * self.alpha_y;
                let alpha2 = 1.0 / (cos_phi * cos_phi / alpha_x2 + sin_phi * sin_phi / alpha_y2);
                let tan_theta2 = alpha2 * u[0] / (1.0 - u[0]);
                1.0 / (1.0 + tan_theta2).sqrt()
            };
            let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
            let wh = spherical_direction(sin_theta, cos_theta, phi);
            if !same_hemisphere(wo, &wh) {
                -wh
            } else {
                wh
            }
        } else {
            let flip = wo.z < 0.0;
            let wo = if flip { -(*wo) } else { *wo };
            let wh = trowbridge_reitz_sample(&wo, self.alpha_x, self.alpha_y, u[0], u[1]);
            if flip {
                -wh
            } else {
                wh
            }
        }
    }

    /// Evaluates the PDF for the given outgoing direction and sampled
    /// surface normal.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wh` - A sample normal from the distribution of normal vectors.
    pub fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        if self.sample_visible_area {
            self.d(wh) * self.g1(wo) * wo.abs_dot(wh) / abs_cos_theta(wo)
        } else {
            self.d(wh) * abs_cos_theta(wh)
        }
    }
}

impl fmt::Display for TrowbridgeReitzDistribution {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrowbridgeReitzDistribution {{ alpha_x: {}, alpha_y: {}, sample_visible_area: {} }}",
            self.alpha_x, self.alpha_y, self.sample_visible_area
        )
    }
}

/// Helper for sampling the visible area of normals; samples the slope
/// distribution at normal incidence.
///
/// * `cos_theta` - Cosine of the angle θ between the incident direction and
///                 the z-axis.
/// * `u1`        - The uniform random value.
/// * `u2`        - The uniform random value.
fn trowbridge_reitz_sample_11(cos_theta: Float, u1: Float, u2: Float) -> (Float, Float) {
    // Special case (normal incidence).
    if cos_theta > 0.9999 {
        let r = (u1 / (1.0 - u1)).sqrt();
        let phi = TWO_PI * u2;
        return (r * cos(phi), r * sin(phi));
    }

    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let tan_theta = sin_theta / cos_theta;
    let a = 1.0 / tan_theta;
    let g1 = 2.0 / (1.0 + (1.0 + 1.0 / (a * a)).sqrt());

    // Sample slope_x.
    let a = 2.0 * u1 / g1 - 1.0;
    let mut tmp = 1.0 / (a * a - 1.0);
    if tmp > 1e10 {
        tmp = 1e10;
    }

    let b = tan_theta;
    let d = max(b * b * tmp * tmp - (a * a - b * b) * tmp, 0.0).sqrt();
    let slope_x_1 = b * tmp - d;
    let slope_x_2 = b * tmp + d;
    let slope_x = if a < 0.0 || slope_x_2 > 1.0 / tan_theta {
        slope_x_1
    } else {
        slope_x_2
    };

    // Sample slope_y.
    let (s, u2) = if u2 > 0.5 {
        (1.0, 2.0 * (u2 - 0.5))
    } else {
        (-1.0, 2.0 * (0.5 - u2))
    };
    let z = (u2 * (u2 * (u2 * 0.27385 - 0.73369) + 0.46341))
        / (u2 * (u2 * (u2 * 0.093073 + 0.309420) - 1.000000) + 0.597999);
    let slope_y = s * z * (1.0 + slope_x * slope_x).sqrt();

    debug_assert!(slope_y.is_finite());
    (slope_x, slope_y)
}

/// Helper for sampling the visible area of normals from an arbitrary
/// incident direction.
///
/// * `wi`      - Incident direction.
/// * `alpha_x` - Roughness in the tangent direction.
/// * `alpha_y` - Roughness in the bitangent direction.
/// * `u1`      - The uniform random value.
/// * `u2`      - The uniform random value.
fn trowbridge_reitz_sample(
    wi: &Vector3f,
    alpha_x: Float,
    alpha_y: Float,
    u1: Float,
    u2: Float,
) -> Vector3f {
    // 1. Stretch wi.
    let wi_stretched = Vector3f::new(alpha_x * wi.x, alpha_y * wi.y, wi.z).normalize();

    // 2. Sample the slope distribution with the stretched direction.
    let (mut slope_x, mut slope_y) = trowbridge_reitz_sample_11(cos_theta(&wi_stretched), u1, u2);

    // 3. Rotate.
    let tmp = cos_phi(&wi_stretched) * slope_x - sin_phi(&wi_stretched) * slope_y;
    slope_y = sin_phi(&wi_stretched) * slope_x + cos_phi(&wi_stretched) * slope_y;
    slope_x = tmp;

    // 4. Unstretch.
    slope_x = alpha_x * slope_x;
    slope_y = alpha_y * slope_y;

    // 5. Compute normal.
    Vector3f::new(-slope_x, -slope_y, 1.0).normalize()
}
