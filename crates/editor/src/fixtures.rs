//! Factory functions for test data: saved scene entries and projects.

use shared::*;

// ── Scene descriptors ───────────────────────────────────────────

/// Saved furniture entry referencing a catalog item by id.
pub fn descriptor(uuid: &str, item_id: &str, name: &str, pos: [f64; 3]) -> SceneObjectDescriptor {
    SceneObjectDescriptor {
        uuid: uuid.to_string(),
        object_type: FURNITURE_TAG.to_string(),
        model_id: Some(item_id.to_string()),
        name: name.to_string(),
        position: Vec3Data::new(pos[0], pos[1], pos[2]),
        rotation: Vec3Data::ZERO,
        scale: Vec3Data::ONE,
        user_data: ObjectUserData {
            item_id: Some(item_id.to_string()),
            ..ObjectUserData::default()
        },
    }
}

/// Entry written by the old editor: no catalog id, only `userData.item.name`.
pub fn legacy_descriptor(uuid: &str, item_name: &str, pos: [f64; 3]) -> SceneObjectDescriptor {
    SceneObjectDescriptor {
        uuid: uuid.to_string(),
        object_type: FURNITURE_TAG.to_string(),
        model_id: None,
        name: String::new(),
        position: Vec3Data::new(pos[0], pos[1], pos[2]),
        rotation: Vec3Data::ZERO,
        scale: Vec3Data::ONE,
        user_data: ObjectUserData {
            legacy_item: Some(LegacyItemRef {
                id: None,
                name: item_name.to_string(),
            }),
            ..ObjectUserData::default()
        },
    }
}

/// Entry for an item that is not in any catalog.
pub fn unknown_descriptor(uuid: &str, pos: [f64; 3]) -> SceneObjectDescriptor {
    descriptor(uuid, "hammock-99", "Hammock", pos)
}

// ── Projects ────────────────────────────────────────────────────

/// Project with an empty scene.
pub fn empty_project(id: ProjectId, name: &str, size: SizeClass) -> Project {
    Project {
        id,
        name: name.to_string(),
        size,
        date: "2024-01-01".to_string(),
        favorite: false,
        last_modified: None,
        color: None,
        scene_data: None,
    }
}

/// Project whose saved scene is `objects`.
pub fn project_with_scene(id: ProjectId, name: &str, objects: Vec<SceneObjectDescriptor>) -> Project {
    Project {
        scene_data: Some(objects),
        ..empty_project(id, name, SizeClass::Medium)
    }
}

/// Bedroom with a bed, a desk and a chair.
pub fn bedroom_project(id: ProjectId) -> Project {
    project_with_scene(
        id,
        "Bedroom",
        vec![
            descriptor("bed-1", "bed-01", "Bed", [0.0, 0.3, 0.0]),
            descriptor("desk-1", "desk-01", "Desk", [2.0, 0.4, -1.0]),
            descriptor("chair-1", "chair-01", "Chair", [2.0, 0.5, -0.3]),
        ],
    )
}
