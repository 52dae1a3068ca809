//! Scene traversal
//!
//! Depth-first, pre-order descent over the source hierarchy. Each node is
//! classified against the export toggles (first enabled capability wins,
//! excluded capabilities demote the node to a plain group), resources are
//! resolved through the cache at the point of first use, and the progress
//! collaborator is notified once per visited node against a node total
//! counted up front.

use std::path::Path;

use sceneforge_core::IdAllocator;
use sceneforge_scene::{
    CameraSource, FogMode, FogSettings, LightKind, LightSource, Projection, Renderable,
    SceneDescription, SceneNode,
};
use tracing::{debug, warn};

use crate::convert::{identity_matrix_array, matrix_array, pack_color};
use crate::traits::{AssetMaterializer, ProgressSink};

use super::cache::ResourceCache;
use super::exporter::{ExportError, ExportOptions};
use super::geometry::encode_geometry;
use super::materials::MaterialResolver;
use super::{Fog, ObjectKind, ObjectNode};

/// One traversal over a source scene
pub struct SceneWalker<'a> {
    scene: &'a SceneDescription,
    options: &'a ExportOptions,
    progress: &'a mut dyn ProgressSink,
    resolver: MaterialResolver<'a>,
    cache: ResourceCache,
    ids: IdAllocator,
    total: usize,
    parsed: usize,
}

impl<'a> SceneWalker<'a> {
    pub fn new(
        scene: &'a SceneDescription,
        options: &'a ExportOptions,
        out_dir: &'a Path,
        materializer: &'a mut dyn AssetMaterializer,
        progress: &'a mut dyn ProgressSink,
    ) -> Self {
        Self {
            scene,
            options,
            progress,
            resolver: MaterialResolver::new(scene, out_dir, materializer),
            cache: ResourceCache::new(),
            ids: IdAllocator::new(),
            total: 0,
            parsed: 0,
        }
    }

    /// Walk the whole scene.
    ///
    /// Returns the cache with every accumulated resource record plus the
    /// finished root Scene node.
    pub fn walk(mut self) -> Result<(ResourceCache, ObjectNode), ExportError> {
        let scene = self.scene;
        self.total = scene.node_count();

        // Scene-level synthesis happens before any root is visited
        let fog = scene.fog.as_ref().map(fog_descriptor);
        let ambient = self.ambient_light();

        let mut children = vec![ambient];
        for root in &scene.roots {
            if let Some(object) = self.visit(root)? {
                children.push(object);
            }
        }

        let object = ObjectNode {
            uuid: self.ids.mint(),
            name: scene.name.clone(),
            matrix: identity_matrix_array(),
            kind: ObjectKind::Scene { fog },
            children,
        };

        debug!(
            nodes = self.parsed,
            identifiers = self.ids.minted(),
            "scene traversal finished"
        );
        Ok((self.cache, object))
    }

    /// Visit one node and, recursively, its subtree.
    fn visit(&mut self, node: &SceneNode) -> Result<Option<ObjectNode>, ExportError> {
        if !node.active && !self.options.export_disabled {
            // Inactive subtrees are dropped wholesale; the node itself
            // still counts one tick so the fraction stays meaningful.
            self.tick();
            return Ok(None);
        }

        let kind = self.classify(node)?;
        self.tick();

        let mut object = ObjectNode {
            uuid: self.ids.mint(),
            name: node.name.clone(),
            matrix: matrix_array(&node.transform),
            kind,
            children: Vec::new(),
        };

        for child in &node.children {
            if let Some(child_object) = self.visit(child)? {
                object.children.push(child_object);
            }
        }
        Ok(Some(object))
    }

    /// First enabled capability wins; everything else falls through to a
    /// plain group.
    fn classify(&mut self, node: &SceneNode) -> Result<ObjectKind, ExportError> {
        if self.options.export_meshes {
            if let Some(renderable) = &node.renderable {
                return self.mesh_kind(renderable);
            }
        }
        if self.options.export_lights {
            if let Some(light) = &node.light {
                return Ok(self.light_kind(light));
            }
        }
        if self.options.export_cameras {
            if let Some(camera) = &node.camera {
                return Ok(camera_kind(camera));
            }
        }
        Ok(ObjectKind::Group)
    }

    fn mesh_kind(&mut self, renderable: &Renderable) -> Result<ObjectKind, ExportError> {
        let geometry = self.resolve_geometry(renderable.mesh)?;
        let material =
            self.resolver
                .resolve_renderer(renderable, &mut self.cache, &mut self.ids)?;
        Ok(ObjectKind::Mesh {
            geometry,
            material,
            cast_shadow: self.options.cast_shadows && renderable.cast_shadows,
            receive_shadow: renderable.receive_shadows,
        })
    }

    /// Identifier of the node's mesh, encoding it on first sight.
    fn resolve_geometry(
        &mut self,
        handle: sceneforge_scene::MeshHandle,
    ) -> Result<String, ExportError> {
        if let Some(uuid) = self.cache.geometry_id(handle) {
            debug!(mesh = handle.0, "geometry cache hit");
            return Ok(uuid.to_string());
        }
        let mesh = self
            .scene
            .mesh(handle)
            .ok_or(ExportError::UnknownMesh { index: handle.0 })?;
        let record = encode_geometry(mesh, self.ids.mint())?;
        let uuid = record.uuid.clone();
        self.cache.insert_geometry(handle, record);
        Ok(uuid)
    }

    fn light_kind(&self, light: &LightSource) -> ObjectKind {
        let color = pack_color(light.color);
        let intensity = light.intensity;
        match light.kind {
            LightKind::Directional => ObjectKind::DirectionalLight {
                color,
                intensity,
                cast_shadow: self.options.cast_shadows && light.cast_shadows,
            },
            LightKind::Point => ObjectKind::PointLight {
                color,
                intensity,
                distance: light.range,
                decay: 1.0,
            },
            LightKind::Spot => ObjectKind::SpotLight {
                color,
                intensity,
                distance: light.range,
                // half the source cone, in radians
                angle: (light.spot_angle_deg * 0.5).to_radians(),
                penumbra: 0.0,
                decay: 1.0,
                cast_shadow: self.options.cast_shadows && light.cast_shadows,
            },
            LightKind::Area => {
                warn!("area light has no target counterpart, emitting generic light record");
                ObjectKind::Light { color, intensity }
            }
        }
    }

    /// The synthesized ambient light on the scene root
    fn ambient_light(&mut self) -> ObjectNode {
        let ambient = &self.scene.ambient;
        ObjectNode {
            uuid: self.ids.mint(),
            name: "AmbientLight".to_string(),
            matrix: identity_matrix_array(),
            kind: ObjectKind::AmbientLight {
                color: pack_color(ambient.color),
                intensity: ambient.intensity,
            },
            children: Vec::new(),
        }
    }

    fn tick(&mut self) {
        self.parsed += 1;
        if self.total > 0 {
            self.progress
                .report(self.parsed as f32 / self.total as f32);
        }
    }
}

fn camera_kind(camera: &CameraSource) -> ObjectKind {
    match camera.projection {
        Projection::Perspective { fov_deg, aspect } => ObjectKind::PerspectiveCamera {
            fov: fov_deg,
            aspect,
            near: camera.near,
            far: camera.far,
        },
        Projection::Orthographic { size, aspect } => ObjectKind::OrthographicCamera {
            left: -size * aspect,
            right: size * aspect,
            top: size,
            bottom: -size,
            near: camera.near,
            far: camera.far,
        },
    }
}

fn fog_descriptor(fog: &FogSettings) -> Fog {
    let color = pack_color(fog.color);
    match fog.mode {
        FogMode::Linear { near, far } => Fog::Linear { color, near, far },
        FogMode::Exponential { density } => Fog::Exponential { color, density },
    }
}
