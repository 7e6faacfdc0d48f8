//! shadenet-resources-core: named resource pools with counted handles.
//!
//! Managers own their resources outright. Anything that needs one holds a
//! [`Handle`], which counts as a reference until it is released or dropped.
//! Tearing a manager down while handles are still alive is fatal.

pub mod handle;
pub mod manager;
pub mod texture;

pub use handle::Handle;
pub use manager::{ResourceError, ResourceManager};
pub use texture::{ImageData, TextureError, TextureManager};
