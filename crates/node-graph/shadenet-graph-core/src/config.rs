//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Knobs shared by parsing, preparation and evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reflectance of the diffuse lobe emitted for materials that fail validation.
    pub fallback_color: [f32; 3],
    /// Deepest node nesting the parser follows, template references included.
    pub max_depth: usize,
    /// Collapse value subtrees that do not depend on the shading point during post-processing.
    pub fold_constants: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_color: [0.3, 0.0, 0.0],
            max_depth: 64,
            fold_constants: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(text)?)
    }
}
