//! Conversion between live objects and stored descriptors

use shared::{Color, Dimensions, ItemKind, ObjectId, SceneObjectDescriptor};

use super::{to_vec3, PlacedObject, SceneState};
use crate::assets::{AssetResolver, BoxPrimitive, LoadTarget, Visual, FALLBACK_OPACITY};
use crate::catalog::Catalog;

/// Grey box for objects whose catalog entry no longer exists
fn unknown_box() -> BoxPrimitive {
    BoxPrimitive {
        size: Dimensions::UNIT,
        color: Color::PLACEHOLDER,
        opacity: FALLBACK_OPACITY,
        wireframe: false,
    }
}

impl SceneState {
    /// Snapshot of every placed object, in placement order
    pub fn to_descriptors(&self) -> Vec<SceneObjectDescriptor> {
        self.objects.iter().map(PlacedObject::to_descriptor).collect()
    }

    /// Recreate one object from its descriptor, keeping its id and
    /// transform. Models missing from the cache are requested again.
    pub fn rebuild(
        &mut self,
        desc: &SceneObjectDescriptor,
        catalog: &Catalog,
        assets: &mut AssetResolver,
    ) -> ObjectId {
        let id = if desc.uuid.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            desc.uuid.clone()
        };

        let item = desc
            .catalog_id()
            .and_then(|item_id| catalog.get(item_id))
            .or_else(|| desc.lookup_name().and_then(|name| catalog.find_by_name(name)));

        let mut object = match item {
            Some(item) => {
                let visual = match item.asset_path() {
                    Some(path) => match assets.cached(path) {
                        Some(result) => Visual::for_result(item, result),
                        None => {
                            assets.request(path, &item.id, LoadTarget::Refresh { object: id.clone() });
                            Visual::Loading(BoxPrimitive::placeholder(item.size))
                        }
                    },
                    None => Visual::Primitive(BoxPrimitive::solid(item)),
                };
                PlacedObject::new(item, &item.names.th, 0.0, 0.0, visual)
            }
            None => {
                tracing::warn!(name = %desc.name, item = ?desc.catalog_id(), "catalog item not found, restoring as unknown box");
                PlacedObject {
                    id: String::new(),
                    item_id: desc.catalog_id().unwrap_or_default().to_string(),
                    name: desc.name.clone(),
                    kind: ItemKind::Unknown,
                    dimensions: Dimensions::UNIT,
                    color: Color::PLACEHOLDER,
                    position: glam::Vec3::ZERO,
                    rotation: glam::Vec3::ZERO,
                    scale: glam::Vec3::ONE,
                    selected: false,
                    is_fallback: true,
                    visual: Visual::Primitive(unknown_box()),
                }
            }
        };

        object.id = id;
        if !desc.name.is_empty() {
            object.name = desc.name.clone();
        }
        object.position = to_vec3(desc.position);
        object.rotation = to_vec3(desc.rotation);
        object.scale = to_vec3(desc.scale);
        self.insert(object)
    }

    /// Replace every placed object with the given descriptors
    pub fn restore(
        &mut self,
        descriptors: &[SceneObjectDescriptor],
        catalog: &Catalog,
        assets: &mut AssetResolver,
    ) {
        self.clear();
        for desc in descriptors {
            self.rebuild(desc, catalog, assets);
        }
        tracing::debug!(objects = descriptors.len(), "scene restored");
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use shared::{ObjectUserData, Vec3Data};

    use super::*;

    fn descriptor(model_id: Option<&str>, name: &str) -> SceneObjectDescriptor {
        SceneObjectDescriptor {
            uuid: "obj-1".into(),
            object_type: "furniture".into(),
            model_id: model_id.map(str::to_string),
            name: name.into(),
            position: Vec3Data::new(1.0, 0.4, -1.0),
            rotation: Vec3Data::new(0.0, 1.0, 0.0),
            scale: Vec3Data::ONE,
            user_data: ObjectUserData::default(),
        }
    }

    #[test]
    fn restore_by_id_keeps_transform() {
        let catalog = Catalog::builtin();
        let mut assets = AssetResolver::deferred();
        let mut scene = SceneState::new(4.0, Some(1));
        scene.restore(&[descriptor(Some("desk-01"), "Desk")], &catalog, &mut assets);
        let o = scene.get("obj-1").unwrap();
        assert_eq!(o.item_id, "desk-01");
        assert_eq!(o.position, Vec3::new(1.0, 0.4, -1.0));
        assert_eq!(o.rotation.y, 1.0);
        assert!(!o.is_fallback);
        assert_eq!(assets.pending_len(), 0);
    }

    #[test]
    fn restore_by_name_requests_model() {
        let catalog = Catalog::builtin();
        let mut assets = AssetResolver::deferred();
        let mut scene = SceneState::new(4.0, Some(1));
        scene.restore(&[descriptor(None, "เตียง")], &catalog, &mut assets);
        let o = scene.get("obj-1").unwrap();
        assert_eq!(o.item_id, "bed-01");
        assert!(o.visual.is_loading());
        assert!(assets.is_pending_for(&LoadTarget::Refresh { object: "obj-1".into() }));
    }

    #[test]
    fn unknown_item_becomes_grey_box() {
        let catalog = Catalog::builtin();
        let mut assets = AssetResolver::deferred();
        let mut scene = SceneState::new(4.0, Some(1));
        scene.restore(&[descriptor(Some("hammock-01"), "Hammock")], &catalog, &mut assets);
        let o = scene.get("obj-1").unwrap();
        assert_eq!(o.kind, ItemKind::Unknown);
        assert_eq!(o.dimensions, Dimensions::UNIT);
        assert!(o.is_fallback);
        assert_eq!(o.to_descriptor().model_id.as_deref(), Some("hammock-01"));
    }

    #[test]
    fn descriptors_roundtrip_through_restore() {
        let catalog = Catalog::builtin();
        let mut assets = AssetResolver::deferred();
        let mut scene = SceneState::new(4.0, Some(1));
        let desk = catalog.get("desk-01").unwrap();
        scene.place(desk, "Desk", Visual::Primitive(BoxPrimitive::solid(desk)));
        let saved = scene.to_descriptors();
        scene.restore(&saved, &catalog, &mut assets);
        assert_eq!(scene.to_descriptors(), saved);
    }
}
