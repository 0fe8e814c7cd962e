//! Local light-scattering core of an offline physically based renderer:
//! shading-frame trigonometry, Fresnel reflectance, the BxDF contract with
//! its concrete lobes, the per-point BSDF aggregate, phase functions for
//! participating media and the medium-boundary descriptor.

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

pub mod base;
pub mod geometry;
pub mod material;
pub mod medium;
pub mod microfacet;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod spectrum;
