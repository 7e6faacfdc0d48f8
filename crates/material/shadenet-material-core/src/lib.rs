//! shadenet-material-core: named materials and the library they are imported into.
//!
//! A [`MaterialLibrary`] owns every material of a scene in a
//! [`ResourceManager`](shadenet_resources_core::ResourceManager); shading code
//! looks materials up by name and holds the returned handle for as long as it
//! shades with it.

pub mod library;
pub mod material;

pub use library::{ImportReport, MaterialLibrary};
pub use material::Material;
