//! BxDF Type

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Capability flags for scattering models. Every concrete lobe carries
    /// exactly one of DIFFUSE, GLOSSY or SPECULAR combined with one or both
    /// of REFLECTION and TRANSMISSION, fixed at construction.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BxDFType: u8 {
        const REFLECTION = 1 << 0;
        const TRANSMISSION = 1 << 1;
        const DIFFUSE = 1 << 2;
        const GLOSSY = 1 << 3;
        const SPECULAR = 1 << 4;
        const ALL = Self::REFLECTION.bits()
            | Self::TRANSMISSION.bits()
            | Self::DIFFUSE.bits()
            | Self::GLOSSY.bits()
            | Self::SPECULAR.bits();
    }
}

impl BxDFType {
    /// Returns true when this lobe's flags are fully contained in the
    /// requested flag set `t`.
    ///
    /// * `t` - The requested flags.
    pub fn matches(&self, t: BxDFType) -> bool {
        t.contains(*self)
    }
}

impl fmt::Display for BxDFType {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_subset_containment() {
        let lobe = BxDFType::REFLECTION | BxDFType::DIFFUSE;
        assert!(lobe.matches(BxDFType::ALL));
        assert!(lobe.matches(lobe));
        assert!(!lobe.matches(BxDFType::REFLECTION));
        assert!(!lobe.matches(BxDFType::TRANSMISSION | BxDFType::DIFFUSE));
        assert!(lobe.matches(lobe | BxDFType::SPECULAR));
    }
}
