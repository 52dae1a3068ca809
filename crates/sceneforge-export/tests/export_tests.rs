//! Integration tests for the scene export engine
//!
//! These cover the whole pipeline through the public `Exporter` surface:
//! - the end-to-end export scenario (mesh + light under one group)
//! - identifier uniqueness and referential integrity of the document
//! - deduplication of shared geometries and materials
//! - progress reporting across a full run
//! - the serialized wire shape

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use sceneforge_core::LinearRgba;
use sceneforge_export::three::{MaterialKind, ObjectKind};
use sceneforge_export::{Document, ExportOptions, Exporter, ProgressSink};
use sceneforge_scene::{
    LightKind, LightSource, MaterialData, MeshData, Renderable, SceneDescription, SceneNode,
};

/// Helper to create a plain quad mesh with no optional attributes
fn make_quad_mesh(name: &str) -> MeshData {
    let mut mesh = MeshData::new(name);
    mesh.vertices = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ];
    mesh.submeshes = vec![vec![0, 1, 2, 1, 3, 2]];
    mesh
}

/// Helper building the reference scenario: one root group holding a
/// single-material mesh node and a point light
fn make_reference_scene() -> SceneDescription {
    let mut scene = SceneDescription::new("reference");
    let mesh = scene.add_mesh(make_quad_mesh("quad"));
    let material = scene.add_material(MaterialData::new("paint", LinearRgba::rgb(0.8, 0.2, 0.2)));

    let mut mesh_node = SceneNode::new("crate");
    mesh_node.renderable = Some(Renderable::new(mesh, material));

    let mut light_node = SceneNode::new("bulb");
    light_node.light = Some(LightSource::new(LightKind::Point));

    let mut group = SceneNode::new("room");
    group.children.push(mesh_node);
    group.children.push(light_node);
    scene.roots.push(group);
    scene
}

fn export(scene: &SceneDescription) -> Document {
    Exporter::new("out").export(scene).unwrap()
}

/// Collect every identifier in the document, nested materials included
fn collect_uuids(document: &Document) -> Vec<String> {
    let mut uuids = Vec::new();
    for geometry in &document.geometries {
        uuids.push(geometry.uuid.clone());
    }
    for material in &document.materials {
        uuids.push(material.uuid.clone());
        if let Some(nested) = material.nested() {
            for constituent in nested {
                uuids.push(constituent.uuid.clone());
            }
        }
    }
    for texture in &document.textures {
        uuids.push(texture.uuid.clone());
    }
    for image in &document.images {
        uuids.push(image.uuid.clone());
    }
    collect_node_uuids(&document.object, &mut uuids);
    uuids
}

fn collect_node_uuids(node: &sceneforge_export::three::ObjectNode, out: &mut Vec<String>) {
    out.push(node.uuid.clone());
    for child in &node.children {
        collect_node_uuids(child, out);
    }
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_end_to_end_reference_scene() {
        let scene = make_reference_scene();
        let document = export(&scene);

        assert_eq!(document.geometries.len(), 1);
        assert_eq!(document.materials.len(), 1);

        // scene root: synthesized ambient light, then the exported group
        assert_eq!(document.object.children.len(), 2);
        let group = &document.object.children[1];
        assert!(matches!(group.kind, ObjectKind::Group));
        assert_eq!(group.children.len(), 2);

        match &group.children[0].kind {
            ObjectKind::Mesh {
                geometry, material, ..
            } => {
                assert_eq!(geometry, &document.geometries[0].uuid);
                assert_eq!(material, &document.materials[0].uuid);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
        assert!(matches!(
            group.children[1].kind,
            ObjectKind::PointLight { .. }
        ));
    }

    #[test]
    fn test_sibling_order_is_preserved() {
        let mut scene = SceneDescription::new("order");
        let mut root = SceneNode::new("root");
        for name in ["first", "second", "third"] {
            root.children.push(SceneNode::new(name));
        }
        scene.roots.push(root);

        let document = export(&scene);
        let root = &document.object.children[1];
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}

mod integrity_tests {
    use super::*;

    #[test]
    fn test_identifier_uniqueness() {
        let mut scene = make_reference_scene();
        // add a second renderer sharing the same mesh and material
        let mesh = sceneforge_scene::MeshHandle(0);
        let material = sceneforge_scene::MaterialHandle(0);
        let mut twin = SceneNode::new("twin");
        twin.renderable = Some(Renderable::new(mesh, material));
        scene.roots.push(twin);

        let document = export(&scene);
        let uuids = collect_uuids(&document);
        let unique: HashSet<&String> = uuids.iter().collect();
        assert_eq!(unique.len(), uuids.len(), "duplicate identifier emitted");
    }

    #[test]
    fn test_referential_integrity() {
        let scene = make_reference_scene();
        let document = export(&scene);

        let geometry_ids: HashSet<&str> =
            document.geometries.iter().map(|g| g.uuid.as_str()).collect();
        let material_ids: HashSet<&str> =
            document.materials.iter().map(|m| m.uuid.as_str()).collect();

        fn check_node(
            node: &sceneforge_export::three::ObjectNode,
            geometries: &HashSet<&str>,
            materials: &HashSet<&str>,
        ) {
            if let ObjectKind::Mesh {
                geometry, material, ..
            } = &node.kind
            {
                assert!(geometries.contains(geometry.as_str()), "dangling geometry");
                assert!(materials.contains(material.as_str()), "dangling material");
            }
            for child in &node.children {
                check_node(child, geometries, materials);
            }
        }
        check_node(&document.object, &geometry_ids, &material_ids);
    }

    #[test]
    fn test_shared_mesh_dedup() {
        let mut scene = SceneDescription::new("dedup");
        let mesh = scene.add_mesh(make_quad_mesh("shared"));
        let material = scene.add_material(MaterialData::new("mat", LinearRgba::WHITE));
        for name in ["a", "b"] {
            let mut node = SceneNode::new(name);
            node.renderable = Some(Renderable::new(mesh, material));
            scene.roots.push(node);
        }

        let document = export(&scene);
        assert_eq!(document.geometries.len(), 1);
        assert_eq!(document.materials.len(), 1);

        let expected = document.geometries[0].uuid.as_str();
        let meshes: Vec<&str> = document.object.children[1..]
            .iter()
            .filter_map(|node| match &node.kind {
                ObjectKind::Mesh { geometry, .. } => Some(geometry.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(meshes, vec![expected, expected]);
    }

    #[test]
    fn test_multi_material_constituents_not_double_emitted() {
        let mut scene = SceneDescription::new("multi");
        let mut mesh = make_quad_mesh("grouped");
        mesh.submeshes = vec![vec![0, 1, 2], vec![1, 3, 2]];
        let mesh = scene.add_mesh(mesh);
        let front = scene.add_material(MaterialData::new("front", LinearRgba::WHITE));
        let back = scene.add_material(MaterialData::new("back", LinearRgba::BLACK));

        let mut node = SceneNode::new("panel");
        node.renderable = Some(Renderable::with_materials(mesh, vec![front, back]));
        scene.roots.push(node);

        let document = export(&scene);
        // a single top-level record: the multi-material
        assert_eq!(document.materials.len(), 1);
        let nested = document.materials[0].nested().unwrap();
        assert_eq!(nested.len(), 2);
        assert!(matches!(
            document.materials[0].kind,
            MaterialKind::MultiMaterial { .. }
        ));
    }
}

mod progress_tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedRecorder {
        fractions: Arc<Mutex<Vec<f32>>>,
        cleared: Arc<Mutex<bool>>,
    }

    impl ProgressSink for SharedRecorder {
        fn report(&mut self, fraction: f32) {
            self.fractions.lock().unwrap().push(fraction);
        }

        fn clear(&mut self) {
            *self.cleared.lock().unwrap() = true;
        }
    }

    #[test]
    fn test_full_traversal_reports_monotonic_progress_to_one() {
        let scene = make_reference_scene();
        let recorder = SharedRecorder::default();

        Exporter::new("out")
            .with_progress(Box::new(recorder.clone()))
            .export(&scene)
            .unwrap();

        let fractions = recorder.fractions.lock().unwrap();
        // group + mesh node + light node
        assert_eq!(fractions.len(), 3);
        for pair in fractions.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(*fractions.last().unwrap(), 1.0);
        assert!(*recorder.cleared.lock().unwrap());
    }
}

mod wire_tests {
    use super::*;

    #[test]
    fn test_document_wire_shape() {
        let scene = make_reference_scene();
        let document = export(&scene);
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["metadata"]["version"], 4.3);
        assert_eq!(value["metadata"]["type"], "Object");
        assert_eq!(value["metadata"]["generator"], "SceneForge Exporter");

        let geometry = &value["geometries"][0];
        assert_eq!(geometry["type"], "Geometry");
        assert_eq!(geometry["metadata"]["version"], 4.0);
        assert!(geometry["data"]["vertices"].is_array());
        assert!(geometry["data"]["faces"].is_array());
        // no optional attributes on this mesh, so no empty arrays either
        assert!(geometry["data"].get("normals").is_none());
        assert!(geometry["data"].get("uvs").is_none());

        assert_eq!(value["object"]["type"], "Scene");
        assert_eq!(value["object"]["children"][0]["type"], "AmbientLight");
        assert_eq!(value["object"]["children"][1]["type"], "Group");
    }

    #[test]
    fn test_mesh_node_wire_fields() {
        let scene = make_reference_scene();
        let document = export(&scene);
        let value = serde_json::to_value(&document).unwrap();

        let mesh = &value["object"]["children"][1]["children"][0];
        assert_eq!(mesh["type"], "Mesh");
        assert_eq!(mesh["geometry"], value["geometries"][0]["uuid"]);
        assert_eq!(mesh["material"], value["materials"][0]["uuid"]);
        assert_eq!(mesh["matrix"].as_array().unwrap().len(), 16);
        assert!(mesh["castShadow"].is_boolean());
        assert!(mesh["receiveShadow"].is_boolean());
    }

    #[test]
    fn test_material_wire_fields() {
        let scene = make_reference_scene();
        let document = export(&scene);
        let value = serde_json::to_value(&document).unwrap();

        let material = &value["materials"][0];
        assert_eq!(material["type"], "MeshPhongMaterial");
        // 0.8, 0.2, 0.2 quantized
        assert_eq!(material["color"], 0x00CC_3333);
        assert_eq!(material["opacity"], 1.0);
        assert_eq!(material["transparent"], false);
        // unexposed shader properties are omitted entirely
        assert!(material.get("specular").is_none());
        assert!(material.get("shininess").is_none());
    }

    #[test]
    fn test_disabled_subtree_absent_from_wire() {
        let mut scene = make_reference_scene();
        let mut hidden = SceneNode::new("hidden");
        hidden.active = false;
        scene.roots.push(hidden);

        let document = export(&scene);
        let value = serde_json::to_value(&document).unwrap();
        let children = value["object"]["children"].as_array().unwrap();
        assert!(children.iter().all(|child| child["name"] != "hidden"));
    }
}

mod options_tests {
    use super::*;

    #[test]
    fn test_light_toggle_demotes_to_group() {
        let scene = make_reference_scene();
        let options = ExportOptions {
            export_lights: false,
            ..ExportOptions::default()
        };
        let document = Exporter::with_options("out", options).export(&scene).unwrap();

        let group = &document.object.children[1];
        assert!(matches!(group.children[1].kind, ObjectKind::Group));
    }
}
