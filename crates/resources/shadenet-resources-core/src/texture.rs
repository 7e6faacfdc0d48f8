//! In-memory texel storage shared by image texture nodes.

use shadenet_api_core::Value;
use thiserror::Error;

use crate::ResourceManager;

/// Texture pool keyed by image name.
pub type TextureManager = ResourceManager<ImageData>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("image is {width}x{height} but {texels} texels were supplied")]
    SizeMismatch {
        width: u32,
        height: u32,
        texels: usize,
    },
    #[error("image dimensions must be non-zero")]
    Empty,
}

/// Decoded image, row-major from the top-left texel.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    texels: Vec<Value>,
}

impl ImageData {
    pub fn new(width: u32, height: u32, texels: Vec<Value>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if (width as usize) * (height as usize) != texels.len() {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                texels: texels.len(),
            });
        }
        Ok(ImageData {
            width,
            height,
            texels,
        })
    }

    /// 1x1 image holding `color`.
    pub fn solid(color: Value) -> Self {
        ImageData {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texel(&self, x: u32, y: u32) -> Value {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.texels[y * self.width as usize + x]
    }

    /// Nearest-neighbour lookup with repeat wrapping. `v = 0` is the top row.
    pub fn sample_nearest(&self, uv: [f32; 2]) -> Value {
        let wrap = |t: f32| {
            let f = t - t.floor();
            if f.is_finite() {
                f
            } else {
                0.0
            }
        };
        let x = (wrap(uv[0]) * self.width as f32) as u32;
        let y = (wrap(uv[1]) * self.height as f32) as u32;
        self.texel(x, y)
    }
}
