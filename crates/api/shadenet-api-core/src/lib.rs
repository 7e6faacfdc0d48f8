//! shadenet-api-core: value, spectrum and BSDF types shared by every shadenet crate.

pub mod bsdf;
pub mod coercion;
pub mod json;
pub mod value;

pub use bsdf::{Bsdf, Lobe, LobeKind};
pub use coercion::{parse_tuple, ParsedTuple};
pub use value::{Spectrum, Value};
