//! Transform operations

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{SceneChange, SceneState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl SceneState {
    /// Move an object across the floor; height stays at its rest height
    pub fn drag_to(&mut self, id: &str, x: f32, z: f32) -> bool {
        let Some(object) = self.get_mut(id) else {
            return false;
        };
        object.position = Vec3::new(x, object.rest_height(), z);
        self.record(SceneChange::Updated(id.to_string()));
        true
    }

    /// Set one Euler component (degrees) on every selected object.
    /// Returns how many objects changed.
    pub fn set_rotation_selected(&mut self, axis: Axis, degrees: f32) -> usize {
        let radians = degrees.to_radians();
        let ids = self.selected_ids();
        for id in &ids {
            if let Some(object) = self.get_mut(id) {
                match axis {
                    Axis::X => object.rotation.x = radians,
                    Axis::Y => object.rotation.y = radians,
                    Axis::Z => object.rotation.z = radians,
                }
            }
            self.record(SceneChange::Updated(id.clone()));
        }
        ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{BoxPrimitive, Visual};
    use crate::catalog::Catalog;

    #[test]
    fn drag_keeps_rest_height() {
        let catalog = Catalog::builtin();
        let wardrobe = catalog.get("wardrobe-01").unwrap();
        let mut scene = SceneState::new(4.0, Some(3));
        let id = scene.place(wardrobe, "Wardrobe", Visual::Primitive(BoxPrimitive::solid(wardrobe)));
        assert!(scene.drag_to(&id, 1.5, -2.0));
        assert_eq!(scene.get(&id).unwrap().position, Vec3::new(1.5, 1.0, -2.0));
        assert!(!scene.drag_to("nope", 0.0, 0.0));
    }

    #[test]
    fn rotation_applies_to_selection_only() {
        let catalog = Catalog::builtin();
        let desk = catalog.get("desk-01").unwrap();
        let mut scene = SceneState::new(4.0, Some(3));
        let a = scene.place(desk, "Desk", Visual::Primitive(BoxPrimitive::solid(desk)));
        let b = scene.place(desk, "Desk", Visual::Primitive(BoxPrimitive::solid(desk)));
        scene.select(&a);
        assert_eq!(scene.set_rotation_selected(Axis::Y, 90.0), 1);
        assert!((scene.get(&a).unwrap().rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(scene.get(&b).unwrap().rotation.y, 0.0);
    }
}
