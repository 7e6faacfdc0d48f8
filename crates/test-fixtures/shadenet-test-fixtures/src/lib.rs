use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    materials: HashMap<String, MaterialEntry>,
    libraries: HashMap<String, String>,
    #[serde(default)]
    configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaterialEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        warnings: usize,
    },
}

impl MaterialEntry {
    fn as_path(&self) -> &str {
        match self {
            MaterialEntry::Path(path) => path,
            MaterialEntry::Detailed { path, .. } => path,
        }
    }

    fn warnings(&self) -> usize {
        match self {
            MaterialEntry::Path(_) => 0,
            MaterialEntry::Detailed { warnings, .. } => *warnings,
        }
    }
}

/// Encoding of a description fixture, taken from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn format_of(rel: &str) -> Result<Format> {
    match Path::new(rel).extension().and_then(|e| e.to_str()) {
        Some("xml") => Ok(Format::Xml),
        Some("json") => Ok(Format::Json),
        _ => bail!("fixture '{rel}' has no recognised extension"),
    }
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

fn sorted_keys<T>(map: &HashMap<String, T>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

pub mod materials {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.materials)
    }

    pub fn text(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.materials, "material", name)?;
        read_to_string(entry.as_path())
    }

    pub fn format(name: &str) -> Result<Format> {
        let entry = lookup(&MANIFEST.materials, "material", name)?;
        format_of(entry.as_path())
    }

    /// Number of parse warnings the fixture is known to produce.
    pub fn expected_warnings(name: &str) -> Result<usize> {
        let entry = lookup(&MANIFEST.materials, "material", name)?;
        Ok(entry.warnings())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.materials, "material", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}

pub mod libraries {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.libraries)
    }

    pub fn text(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.libraries, "library", name)?;
        read_to_string(rel)
    }

    pub fn format(name: &str) -> Result<Format> {
        let rel = lookup(&MANIFEST.libraries, "library", name)?;
        format_of(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.libraries, "library", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.configs)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }
}
