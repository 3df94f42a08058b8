//! Per-frame description of what the external renderer should draw.

use glam::Mat4;
use serde::Serialize;
use shared::{Color, Dimensions, ItemKind, ObjectId};

use super::camera::{OrbitCamera, Viewport};
use crate::assets::{SubMesh, Visual};
use crate::state::{NodeTag, SceneState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeGeometry {
    Model { path: String, meshes: Vec<SubMesh> },
    Box { size: Dimensions },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: ObjectId,
    pub tag: NodeTag,
    pub kind: ItemKind,
    pub geometry: NodeGeometry,
    /// Column-major world matrix
    pub matrix: [f32; 16],
    pub color: Color,
    pub opacity: f32,
    pub wireframe: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraFrame {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub view: [f32; 16],
    pub projection: [f32; 16],
}

impl CameraFrame {
    fn new(camera: &OrbitCamera, viewport: Viewport) -> Self {
        Self {
            position: camera.position.to_array(),
            target: camera.target.to_array(),
            fov: camera.fov,
            near: camera.near,
            far: camera.far,
            view: camera.view_matrix().to_cols_array(),
            projection: camera.projection_matrix(viewport.aspect()).to_cols_array(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub version: u64,
    pub nodes: Vec<RenderNode>,
    /// Side of the square floor grid (m)
    pub floor_extent: f32,
    pub grid_density: u32,
    pub camera: CameraFrame,
    pub controls_enabled: bool,
    pub transitioning: bool,
}

impl Frame {
    pub fn build(
        scene: &SceneState,
        camera: &OrbitCamera,
        viewport: Viewport,
        grid_density: u32,
        controls_enabled: bool,
        transitioning: bool,
    ) -> Self {
        let mut nodes = Vec::with_capacity(scene.len() + scene.placeholders().len());

        for object in scene.all() {
            let (geometry, color, opacity, wireframe) = match &object.visual {
                Visual::Model(model) => (
                    NodeGeometry::Model {
                        path: model.path.clone(),
                        meshes: model.meshes.clone(),
                    },
                    object.color,
                    1.0,
                    false,
                ),
                Visual::Primitive(b) | Visual::Loading(b) => {
                    (NodeGeometry::Box { size: b.size }, b.color, b.opacity, b.wireframe)
                }
            };
            nodes.push(RenderNode {
                id: object.id.clone(),
                tag: NodeTag::Furniture,
                kind: object.kind,
                geometry,
                matrix: object.world_matrix().to_cols_array(),
                color,
                opacity,
                wireframe,
                selected: object.selected,
            });
        }

        for placeholder in scene.placeholders() {
            let b = placeholder.primitive;
            nodes.push(RenderNode {
                id: placeholder.id.clone(),
                tag: NodeTag::Placeholder,
                kind: ItemKind::Unknown,
                geometry: NodeGeometry::Box { size: b.size },
                matrix: Mat4::from_translation(placeholder.position).to_cols_array(),
                color: b.color,
                opacity: b.opacity,
                wireframe: b.wireframe,
                selected: false,
            });
        }

        Self {
            version: scene.version(),
            nodes,
            floor_extent: scene.floor_extent(),
            grid_density,
            camera: CameraFrame::new(camera, viewport),
            controls_enabled,
            transitioning,
        }
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
