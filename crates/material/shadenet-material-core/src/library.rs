//! Bulk material import.
//!
//! A library document holds any number of materials. Each one is parsed,
//! prepared and registered under its name; a name that is already taken is
//! skipped with a warning and the first definition wins.

use serde::Serialize;
use shadenet_graph_core::desc::{json, xml};
use shadenet_graph_core::{
    GraphContext, GraphDesc, GraphError, LibraryDesc, MaterialGraph, Report, Warning,
};
use shadenet_resources_core::{Handle, ResourceManager};

use crate::material::Material;

/// Name of the material handed out when a lookup misses.
pub const DEFAULT_MATERIAL: &str = "default";

/// What a bulk import did, in document order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub imported: Vec<String>,
    /// Names skipped because a material with that name was already registered.
    pub duplicates: Vec<String>,
    /// Problems in shared templates, parse and preparation warnings of every
    /// imported material, and one entry per unnamed or duplicate material.
    pub warnings: Report,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub struct MaterialLibrary {
    materials: ResourceManager<Material>,
    default: Material,
}

impl MaterialLibrary {
    /// An empty library. Its default material has no surface, so it shades
    /// with the fallback lobe configured in `ctx`.
    pub fn new(ctx: &GraphContext<'_>) -> Self {
        let (default, _) = Material::prepared(DEFAULT_MATERIAL, MaterialGraph::new(), ctx);
        MaterialLibrary {
            materials: ResourceManager::new("material"),
            default,
        }
    }

    /// Import a `<Materials>` document.
    pub fn import_xml(
        &mut self,
        text: &str,
        ctx: &GraphContext<'_>,
    ) -> Result<ImportReport, GraphError> {
        let library = xml::library_from_xml(text)?;
        Ok(self.import_library(library, ctx))
    }

    /// Import a `{ "templates": .., "materials": [..] }` document.
    pub fn import_json(
        &mut self,
        text: &str,
        ctx: &GraphContext<'_>,
    ) -> Result<ImportReport, GraphError> {
        let library = json::library_from_json(text)?;
        Ok(self.import_library(library, ctx))
    }

    /// Parse, prepare and register every description.
    pub fn import(&mut self, descs: Vec<GraphDesc>, ctx: &GraphContext<'_>) -> ImportReport {
        let mut report = ImportReport::default();
        self.import_into(&mut report, &descs, ctx);
        report
    }

    fn import_library(&mut self, library: LibraryDesc, ctx: &GraphContext<'_>) -> ImportReport {
        let mut report = ImportReport::default();
        for warning in library.warnings {
            report.warnings.warn(warning);
        }
        self.import_into(&mut report, &library.materials, ctx);
        report
    }

    fn import_into(
        &mut self,
        report: &mut ImportReport,
        descs: &[GraphDesc],
        ctx: &GraphContext<'_>,
    ) {
        for (index, desc) in descs.iter().enumerate() {
            let Some(name) = desc.name.as_deref() else {
                report.warnings.warn(Warning::MissingAttribute {
                    path: format!("Materials[{index}]"),
                    attribute: "name".to_string(),
                });
                continue;
            };
            if self.materials.contains(name) {
                report.warnings.warn(Warning::DuplicateMaterial {
                    path: format!("Materials[{index}]"),
                    name: name.to_string(),
                });
                report.duplicates.push(name.to_string());
                continue;
            }

            let (graph, parsed) = MaterialGraph::parse(desc, *ctx);
            let (material, prepared) = Material::prepared(name, graph, ctx);
            report.warnings.merge(parsed);
            report.warnings.merge(prepared);
            if !material.is_valid() {
                log::debug!("material \"{name}\" is invalid and shades with the fallback lobe");
            }
            match self.materials.create_and_register(name, material) {
                Ok(()) => report.imported.push(name.to_string()),
                Err(err) => {
                    log::warn!("{err}");
                    report.duplicates.push(name.to_string());
                }
            }
        }
        log::debug!(
            "imported {} material(s), {} duplicate(s), {} warning(s)",
            report.imported.len(),
            report.duplicates.len(),
            report.warnings.len()
        );
    }

    /// Look `name` up, acquiring a reference that lasts as long as the handle.
    pub fn find(&self, name: &str) -> Option<Handle<Material>> {
        self.materials.find_by_name(name)
    }

    /// Material used for surfaces whose material could not be found.
    pub fn default_material(&self) -> &Material {
        &self.default
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.materials.names()
    }

    pub fn ref_count(&self, name: &str) -> Option<usize> {
        self.materials.ref_count(name)
    }

    /// Tear the library down. Panics if any material handle is still alive.
    pub fn shutdown(self) {
        self.materials.shutdown();
    }
}

impl std::fmt::Debug for MaterialLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialLibrary")
            .field("materials", &self.materials.names())
            .finish()
    }
}
