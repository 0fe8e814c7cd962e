//! Shading frame trigonometry and specular direction transforms.
//!
//! All functions here take unit directions expressed in the local shading
//! frame where the z-axis is the shading normal, x the primary tangent and
//! y the bitangent. Callers own normalization.

#![allow(dead_code)]

use crate::base::*;
use crate::geometry::*;

/// Returns the cosine of the angle θ between the direction and the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns the square of the cosine of the angle θ between the direction and
/// the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_2_theta(w: &Vector3f) -> Float {
    w.z * w.z
}

/// Returns the absolute value of the cosine of the angle θ between the
/// direction and the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns the square of the sine of the angle θ between the direction and
/// the z-axis. Clamped to zero to absorb floating point overshoot from
/// nearly-axial directions.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_2_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - cos_2_theta(w))
}

/// Returns the sine of the angle θ between the direction and the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_theta(w: &Vector3f) -> Float {
    sin_2_theta(w).sqrt()
}

/// Returns the tangent of the angle θ between the direction and the z-axis.
/// Yields ±∞ at cosθ = 0 by IEEE semantics; callers guard the grazing
/// configuration.
///
/// * `w` - The direction vector.
#[inline]
pub fn tan_theta(w: &Vector3f) -> Float {
    sin_theta(w) / cos_theta(w)
}

/// Returns the square of the tangent of the angle θ between the direction
/// and the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn tan_2_theta(w: &Vector3f) -> Float {
    sin_2_theta(w) / cos_2_theta(w)
}

/// Returns the cosine of the azimuthal angle Ø of the direction projected to
/// the xy-plane. At the poles (sinθ = 0) the azimuth is degenerate and the
/// value is 1 by convention.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_phi(w: &Vector3f) -> Float {
    let s = sin_theta(w);
    if s == 0.0 {
        1.0
    } else {
        clamp(w.x / s, -1.0, 1.0)
    }
}

/// Returns the sine of the azimuthal angle Ø of the direction projected to
/// the xy-plane, 0 by convention at the poles.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_phi(w: &Vector3f) -> Float {
    let s = sin_theta(w);
    if s == 0.0 {
        0.0
    } else {
        clamp(w.y / s, -1.0, 1.0)
    }
}

/// Returns the square of the cosine of the azimuthal angle Ø.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_2_phi(w: &Vector3f) -> Float {
    let c = cos_phi(w);
    c * c
}

/// Returns the square of the sine of the azimuthal angle Ø.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_2_phi(w: &Vector3f) -> Float {
    let s = sin_phi(w);
    s * s
}

/// Returns the cosine of the angle ΔØ between two directions' azimuths,
/// normalized by the product of their projected lengths and clamped to
/// [-1, 1]. Degenerate projections resolve to 1.
///
/// * `wa` - First direction vector.
/// * `wb` - Second direction vector.
pub fn cos_d_phi(wa: &Vector3f, wb: &Vector3f) -> Float {
    let waxy = wa.x * wa.x + wa.y * wa.y;
    let wbxy = wb.x * wb.x + wb.y * wb.y;
    if waxy == 0.0 || wbxy == 0.0 {
        1.0
    } else {
        clamp(
            (wa.x * wb.x + wa.y * wb.y) / (waxy * wbxy).sqrt(),
            -1.0,
            1.0,
        )
    }
}

/// Computes the mirror reflection of a direction around a normal. The
/// returned direction is antiparallel to the true incident ray.
///
/// * `wo` - Direction to reflect.
/// * `n`  - Unit normal; any hemisphere of `wo` is valid.
#[inline]
pub fn reflect(wo: &Vector3f, n: &Vector3f) -> Vector3f {
    -(*wo) + 2.0 * wo.dot(n) * n
}

/// Computes the refracted direction via Snell's law, given the incident
/// direction `wi` pointing away from the surface, the surface normal `n` in
/// the same hemisphere as `wi`, and `eta`, the ratio of the indices of
/// refraction of the incident and transmitted media.
///
/// Returns `None` under total internal reflection. That is an expected
/// outcome, not an error; callers fall back to reflection-only sampling.
///
/// * `wi`  - Incident direction.
/// * `n`   - Surface normal.
/// * `eta` - Ratio of indices of refraction in the incident and transmitted
///           media.
pub fn refract(wi: &Vector3f, n: &Normal3f, eta: Float) -> Option<Vector3f> {
    // Compute cos(θt) using Snell's law.
    let cos_theta_i = n.dot(wi);
    let sin_2_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i);
    let sin_2_theta_t = eta * eta * sin_2_theta_i;

    // Handle total internal reflection for transmission.
    if sin_2_theta_t >= 1.0 {
        None
    } else {
        let cos_theta_t = (1.0 - sin_2_theta_t).sqrt();
        Some(eta * -(*wi) + (eta * cos_theta_i - cos_theta_t) * Vector3f::from(*n))
    }
}

/// Returns `true` if two directions lie in the same hemisphere of the
/// shading frame. A z-component of exactly zero is grazing and counted as
/// not-same-hemisphere.
///
/// * `w`  - First direction.
/// * `wp` - Second direction.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}
