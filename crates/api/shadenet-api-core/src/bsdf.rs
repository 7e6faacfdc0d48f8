//! Runtime BSDF: an ordered list of weighted scattering lobes.
//!
//! A `Bsdf` is built fresh for every shading query and owned by the calling
//! thread. Sampling and evaluation of individual lobes belong to the
//! light-transport integrator and are not implemented here.

use serde::{Deserialize, Serialize};

use crate::Spectrum;

/// Scattering model of a single lobe together with its resolved parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobeKind {
    Lambert {
        reflectance: Spectrum,
    },
    OrenNayar {
        reflectance: Spectrum,
        sigma: f32,
    },
    MicrofacetReflection {
        base_color: Spectrum,
        roughness: f32,
    },
    MicrofacetRefraction {
        transmittance: Spectrum,
        roughness: f32,
        ior: f32,
    },
}

impl LobeKind {
    pub fn name(&self) -> &'static str {
        match self {
            LobeKind::Lambert { .. } => "lambert",
            LobeKind::OrenNayar { .. } => "oren_nayar",
            LobeKind::MicrofacetReflection { .. } => "microfacet_reflection",
            LobeKind::MicrofacetRefraction { .. } => "microfacet_refraction",
        }
    }
}

/// A lobe and the weight it contributes with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lobe {
    pub kind: LobeKind,
    pub weight: Spectrum,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bsdf {
    lobes: Vec<Lobe>,
}

impl Bsdf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lobe. Lobes keep insertion order.
    pub fn add_lobe(&mut self, kind: LobeKind, weight: Spectrum) {
        self.lobes.push(Lobe { kind, weight });
    }

    pub fn lobes(&self) -> &[Lobe] {
        &self.lobes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lobe> {
        self.lobes.iter()
    }

    pub fn len(&self) -> usize {
        self.lobes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobes.is_empty()
    }

    /// Sum of every lobe weight.
    pub fn total_weight(&self) -> Spectrum {
        self.lobes
            .iter()
            .fold(Spectrum::BLACK, |acc, lobe| acc + lobe.weight)
    }

    /// Drop every lobe while keeping the allocation for the next query.
    pub fn clear(&mut self) {
        self.lobes.clear();
    }
}
