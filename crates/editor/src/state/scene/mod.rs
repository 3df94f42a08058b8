//! Scene object registry
//!
//! Owns every placed furniture object and the wireframe placeholders of
//! pending placements. Mutations bump `version` and queue a `SceneChange`
//! for the external scene graph.

mod display;
mod history;
mod object_ops;
mod persistence;
mod transform_ops;

pub use display::{object_label, short_id};
pub use history::{EditHistory, HistorySnapshot, HistoryState};
pub use transform_ops::Axis;

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use shared::{
    CatalogItem, Color, Dimensions, ItemKind, ObjectId, ObjectUserData, SceneObjectDescriptor,
    SizeClass, Vec3Data, FURNITURE_TAG,
};

use crate::assets::{BoxPrimitive, LoadTicket, Visual};
use crate::viewport::picking::Aabb;

/// Role of a node in the external scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTag {
    Furniture,
    Placeholder,
}

/// Notification for the external scene graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", content = "id", rename_all = "snake_case")]
pub enum SceneChange {
    Added(ObjectId),
    Removed(ObjectId),
    Updated(ObjectId),
}

pub(crate) fn to_vec3(v: Vec3Data) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

pub(crate) fn to_data(v: Vec3) -> Vec3Data {
    Vec3Data::new(v.x as f64, v.y as f64, v.z as f64)
}

/// A furniture object in the room
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub id: ObjectId,
    /// Catalog id; empty for objects whose catalog entry no longer exists
    pub item_id: String,
    pub name: String,
    pub kind: ItemKind,
    pub dimensions: Dimensions,
    pub color: Color,
    pub position: Vec3,
    /// Euler XYZ, radians
    pub rotation: Vec3,
    pub scale: Vec3,
    pub selected: bool,
    pub is_fallback: bool,
    pub visual: Visual,
}

impl PlacedObject {
    /// New object for `item` standing on the floor at `(x, z)`. Catalog
    /// scale and rotation only apply to real models.
    pub fn new(item: &CatalogItem, name: &str, x: f32, z: f32, visual: Visual) -> Self {
        let (rotation, scale) = match visual {
            Visual::Model(_) => (
                Vec3::new(
                    (item.rotation.x as f32).to_radians(),
                    (item.rotation.y as f32).to_radians(),
                    (item.rotation.z as f32).to_radians(),
                ),
                to_vec3(item.scale),
            ),
            _ => (Vec3::ZERO, Vec3::ONE),
        };
        // A box where a model was expected
        let is_fallback = matches!(visual, Visual::Primitive(_)) && item.asset_path().is_some();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            name: name.to_string(),
            kind: item.kind,
            dimensions: item.size,
            color: item.color,
            position: Vec3::new(x, item.size.half_height() as f32, z),
            rotation,
            scale,
            selected: false,
            is_fallback,
            visual,
        }
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    /// Height of the object's center when it stands on the floor
    pub fn rest_height(&self) -> f32 {
        self.dimensions.half_height() as f32
    }

    /// Pick volume: the item's bounding box in the object's orientation
    pub fn aabb(&self) -> Aabb {
        let size = Vec3::new(
            self.dimensions.width as f32,
            self.dimensions.height as f32,
            self.dimensions.depth as f32,
        );
        Aabb::from_box(
            size,
            Mat4::from_rotation_translation(self.rotation_quat(), self.position),
        )
    }

    pub fn to_descriptor(&self) -> SceneObjectDescriptor {
        let item_id = (!self.item_id.is_empty()).then(|| self.item_id.clone());
        SceneObjectDescriptor {
            uuid: self.id.clone(),
            object_type: FURNITURE_TAG.to_string(),
            model_id: item_id.clone(),
            name: self.name.clone(),
            position: to_data(self.position),
            rotation: to_data(self.rotation),
            scale: to_data(self.scale),
            user_data: ObjectUserData {
                item_id,
                kind: self.kind,
                is_fallback: self.is_fallback,
                ..ObjectUserData::default()
            },
        }
    }
}

/// Wireframe box shown while a placement's model loads
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingPlaceholder {
    pub id: ObjectId,
    pub item_id: String,
    pub ticket: LoadTicket,
    pub position: Vec3,
    pub primitive: BoxPrimitive,
}

/// Scene registry with change tracking
pub struct SceneState {
    pub(crate) objects: Vec<PlacedObject>,
    pub(crate) placeholders: Vec<LoadingPlaceholder>,
    pub(crate) size_class: SizeClass,
    pub(crate) rng: StdRng,
    pub(crate) spawn_spread: f32,
    /// Monotonically increasing version counter
    pub(crate) version: u64,
    pub(crate) changes: Vec<SceneChange>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(4.0, None)
    }
}

impl SceneState {
    pub fn new(spawn_spread: f32, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| uuid::Uuid::new_v4().as_u128() as u64);
        Self {
            objects: Vec::new(),
            placeholders: Vec::new(),
            size_class: SizeClass::default(),
            rng: StdRng::seed_from_u64(seed),
            spawn_spread,
            version: 0,
            changes: Vec::new(),
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    /// Side of the square floor in meters
    pub fn floor_extent(&self) -> f32 {
        self.size_class.grid_extent() as f32
    }

    pub fn set_size_class(&mut self, size_class: SizeClass) {
        if self.size_class != size_class {
            self.size_class = size_class;
            self.version += 1;
        }
    }

    pub fn get(&self, id: &str) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Changes since the last call
    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    pub(crate) fn record(&mut self, change: SceneChange) {
        self.version += 1;
        self.changes.push(change);
    }
}
