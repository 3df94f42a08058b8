//! Placement, removal and selection

use rand::Rng;
use shared::{CatalogItem, ObjectId};

use super::{LoadingPlaceholder, PlacedObject, SceneChange, SceneState};
use crate::assets::Visual;
use crate::viewport::picking::{pick_nearest, Ray};

impl SceneState {
    /// Random drop point around the room center, kept on the floor
    pub fn spawn_point(&mut self) -> (f32, f32) {
        let half_spread = (self.spawn_spread * 0.5).max(0.0);
        let half_floor = self.floor_extent() * 0.5;
        let coord = |rng: &mut rand::rngs::StdRng| {
            rng.gen_range(-half_spread..=half_spread)
                .clamp(-half_floor, half_floor)
        };
        let x = coord(&mut self.rng);
        let z = coord(&mut self.rng);
        (x, z)
    }

    /// Place `item` at a random spot
    pub fn place(&mut self, item: &CatalogItem, name: &str, visual: Visual) -> ObjectId {
        let (x, z) = self.spawn_point();
        self.place_at(item, name, x, z, visual)
    }

    pub fn place_at(
        &mut self,
        item: &CatalogItem,
        name: &str,
        x: f32,
        z: f32,
        visual: Visual,
    ) -> ObjectId {
        self.insert(PlacedObject::new(item, name, x, z, visual))
    }

    pub fn insert(&mut self, object: PlacedObject) -> ObjectId {
        let id = object.id.clone();
        self.objects.push(object);
        self.record(SceneChange::Added(id.clone()));
        id
    }

    pub fn remove(&mut self, id: &str) -> Option<PlacedObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        let removed = self.objects.remove(idx);
        self.record(SceneChange::Removed(removed.id.clone()));
        Some(removed)
    }

    pub fn remove_selected(&mut self) -> Vec<PlacedObject> {
        let ids = self.selected_ids();
        ids.iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Remove every placed object (placeholders stay)
    pub fn clear(&mut self) {
        for object in std::mem::take(&mut self.objects) {
            self.record(SceneChange::Removed(object.id));
        }
    }

    /// Swap what an object shows once its model settles
    pub fn set_visual(&mut self, id: &str, visual: Visual, is_fallback: bool) -> bool {
        let Some(object) = self.get_mut(id) else {
            return false;
        };
        object.visual = visual;
        object.is_fallback = is_fallback;
        self.record(SceneChange::Updated(id.to_string()));
        true
    }

    pub fn all(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn selected(&self) -> Vec<&PlacedObject> {
        self.objects.iter().filter(|o| o.selected).collect()
    }

    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.id.clone())
            .collect()
    }

    fn set_selected(&mut self, id: &str, selected: bool) {
        let changed = match self.get_mut(id) {
            Some(o) if o.selected != selected => {
                o.selected = selected;
                true
            }
            _ => false,
        };
        if changed {
            self.record(SceneChange::Updated(id.to_string()));
        }
    }

    /// Exclusive selection. False if the object does not exist.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        for other in self.selected_ids() {
            if other != id {
                self.set_selected(&other, false);
            }
        }
        self.set_selected(id, true);
        true
    }

    /// Add to the selection without clearing it
    pub fn extend_selection(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.set_selected(id, true);
        true
    }

    pub fn clear_selection(&mut self) {
        for id in self.selected_ids() {
            self.set_selected(&id, false);
        }
    }

    pub fn add_placeholder(&mut self, placeholder: LoadingPlaceholder) {
        let id = placeholder.id.clone();
        self.placeholders.push(placeholder);
        self.record(SceneChange::Added(id));
    }

    /// Remove a placeholder; None if it is already gone
    pub fn take_placeholder(&mut self, id: &str) -> Option<LoadingPlaceholder> {
        let idx = self.placeholders.iter().position(|p| p.id == id)?;
        let placeholder = self.placeholders.remove(idx);
        self.record(SceneChange::Removed(placeholder.id.clone()));
        Some(placeholder)
    }

    /// Drop every pending placement; their loads settle as stale
    pub fn clear_placeholders(&mut self) {
        for placeholder in std::mem::take(&mut self.placeholders) {
            self.record(SceneChange::Removed(placeholder.id));
        }
    }

    pub fn placeholders(&self) -> &[LoadingPlaceholder] {
        &self.placeholders
    }

    /// Nearest furniture object under the ray. Placeholders and the floor
    /// are not pickable.
    pub fn pick(&self, ray: &Ray) -> Option<ObjectId> {
        pick_nearest(ray, self.objects.iter().map(|o| (o.id.as_str(), o.aabb()))).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::assets::BoxPrimitive;
    use crate::catalog::Catalog;

    fn scene_with(ids: &[&str]) -> (SceneState, Vec<ObjectId>) {
        let catalog = Catalog::builtin();
        let mut scene = SceneState::new(4.0, Some(7));
        let placed = ids
            .iter()
            .map(|id| {
                let item = catalog.get(id).unwrap();
                scene.place(item, &item.names.en, Visual::Primitive(BoxPrimitive::solid(item)))
            })
            .collect();
        (scene, placed)
    }

    #[test]
    fn placement_stands_on_floor_within_spread() {
        let (scene, ids) = scene_with(&["bed-01", "lamp-01", "tv-01"]);
        for id in &ids {
            let o = scene.get(id).unwrap();
            assert!((o.position.y - o.rest_height()).abs() < 1e-6);
            assert!(o.position.x.abs() <= 2.0 && o.position.z.abs() <= 2.0);
        }
    }

    #[test]
    fn spawn_clamped_to_small_floor() {
        let mut scene = SceneState::new(100.0, Some(1));
        scene.set_size_class(shared::SizeClass::Small);
        for _ in 0..20 {
            let (x, z) = scene.spawn_point();
            assert!(x.abs() <= 3.0 && z.abs() <= 3.0);
        }
    }

    #[test]
    fn selection_is_exclusive() {
        let (mut scene, ids) = scene_with(&["bed-01", "desk-01"]);
        assert!(scene.select(&ids[0]));
        assert!(scene.select(&ids[1]));
        assert_eq!(scene.selected_ids(), vec![ids[1].clone()]);
        assert!(scene.extend_selection(&ids[0]));
        assert_eq!(scene.selected().len(), 2);
        scene.clear_selection();
        assert!(scene.selected().is_empty());
        assert!(!scene.select("missing"));
    }

    #[test]
    fn remove_selected_records_changes() {
        let (mut scene, ids) = scene_with(&["bed-01", "desk-01"]);
        scene.drain_changes();
        scene.select(&ids[0]);
        let removed = scene.remove_selected();
        assert_eq!(removed.len(), 1);
        assert_eq!(scene.len(), 1);
        let changes = scene.drain_changes();
        assert!(changes.contains(&SceneChange::Removed(ids[0].clone())));
    }

    #[test]
    fn pick_ignores_floor() {
        let (mut scene, ids) = scene_with(&["bed-01"]);
        let pos = scene.get(&ids[0]).unwrap().position;
        let down = Ray { origin: Vec3::new(pos.x, 10.0, pos.z), direction: Vec3::NEG_Y };
        assert_eq!(scene.pick(&down), Some(ids[0].clone()));
        let away = Ray { origin: Vec3::new(50.0, 10.0, 50.0), direction: Vec3::NEG_Y };
        assert_eq!(scene.pick(&away), None);
        scene.clear();
        assert!(scene.pick(&down).is_none());
    }
}
