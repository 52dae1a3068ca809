//! Export entry point and document assembly

use std::path::PathBuf;

use sceneforge_scene::SceneDescription;
use thiserror::Error;
use tracing::info;

use crate::textures::FileMaterializer;
use crate::traits::{AssetMaterializer, NullProgress, ProgressSink, TextSink};

use super::geometry::GeometryError;
use super::materials::MaterialError;
use super::walker::SceneWalker;
use super::Document;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("mesh handle {index} is not in the scene's mesh table")]
    UnknownMesh { index: usize },

    #[error("geometry encoding failed: {0}")]
    Geometry(#[from] GeometryError),

    #[error("material resolution failed: {0}")]
    Material(#[from] MaterialError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Export inclusion toggles
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Export renderable nodes as meshes
    pub export_meshes: bool,
    /// Export light nodes
    pub export_lights: bool,
    /// Export camera nodes
    pub export_cameras: bool,
    /// Visit inactive nodes instead of skipping their subtrees
    pub export_disabled: bool,
    /// Allow shadow-casting flags through to the output
    pub cast_shadows: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_meshes: true,
            export_lights: true,
            export_cameras: true,
            export_disabled: false,
            cast_shadows: true,
        }
    }
}

/// Scene exporter
///
/// One exporter serves one output directory; each [`Exporter::export`]
/// call is an independent run with its own cache and identifier space.
pub struct Exporter {
    options: ExportOptions,
    out_dir: PathBuf,
    materializer: Box<dyn AssetMaterializer>,
    progress: Box<dyn ProgressSink>,
}

impl Exporter {
    /// Create an exporter with default options, writing texture assets
    /// under `out_dir`
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(out_dir, ExportOptions::default())
    }

    /// Create an exporter with custom options
    pub fn with_options(out_dir: impl Into<PathBuf>, options: ExportOptions) -> Self {
        Self {
            options,
            out_dir: out_dir.into(),
            materializer: Box::new(FileMaterializer::new()),
            progress: Box::new(NullProgress),
        }
    }

    /// Replace the asset materializer collaborator
    pub fn with_materializer(mut self, materializer: Box<dyn AssetMaterializer>) -> Self {
        self.materializer = materializer;
        self
    }

    /// Replace the progress collaborator
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Run one export: walk the scene, dedup resources, assemble the
    /// document.
    pub fn export(&mut self, scene: &SceneDescription) -> ExportResult<Document> {
        info!(scene = %scene.name, nodes = scene.node_count(), "starting scene export");

        let walker = SceneWalker::new(
            scene,
            &self.options,
            &self.out_dir,
            &mut *self.materializer,
            &mut *self.progress,
        );
        let walked = walker.walk();
        self.progress.clear();
        let (cache, object) = walked?;

        let document = cache.into_document(object);
        info!(
            scene = %scene.name,
            geometries = document.geometries.len(),
            materials = document.materials.len(),
            textures = document.textures.len(),
            "scene export complete"
        );
        Ok(document)
    }

    /// Export and hand the serialized document to the writer collaborator
    /// as `<scene name>.json` in the output directory.
    pub fn write(
        &mut self,
        scene: &SceneDescription,
        sink: &mut dyn TextSink,
    ) -> ExportResult<Document> {
        let document = self.export(scene)?;
        let json = serde_json::to_string_pretty(&document)?;
        let path = self.out_dir.join(format!("{}.json", scene.name));
        sink.write_text(&path, &json)?;
        info!(path = %path.display(), bytes = json.len(), "export document written");
        Ok(document)
    }
}
