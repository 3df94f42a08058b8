//! Asset resolution: turns a catalog item into something the scene can show,
//! either the real model or a fallback box.

pub mod gltf;
pub mod loader;
pub mod primitives;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::{CatalogItem, Color, Dimensions, ObjectId};

pub use gltf::{ModelFormat, ModelInfo};
pub use loader::{DeferredLoader, LoadCompletion, LoadRequest, LoadTicket, ModelLoader};
#[cfg(not(target_arch = "wasm32"))]
pub use loader::FsModelLoader;

use crate::error::{AssetError, EditorError, EditorResult};

/// Opacity of the box shown when a model could not be loaded
pub const FALLBACK_OPACITY: f32 = 0.8;
/// Opacity of the wireframe shown while a model loads
pub const PLACEHOLDER_OPACITY: f32 = 0.5;

/// Asset paths are relative to the asset root.
pub fn normalize_path(path: &str) -> &str {
    path.trim_start_matches('/')
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMesh {
    pub name: String,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// A successfully loaded model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub path: String,
    pub meshes: Vec<SubMesh>,
}

impl ResolvedModel {
    fn from_info(path: &str, info: ModelInfo) -> Self {
        let meshes = info
            .mesh_names
            .into_iter()
            .map(|name| SubMesh {
                name,
                cast_shadow: true,
                receive_shadow: true,
            })
            .collect();
        Self {
            path: path.to_string(),
            meshes,
        }
    }
}

/// Box stand-in sized to an item's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPrimitive {
    pub size: Dimensions,
    pub color: Color,
    pub opacity: f32,
    pub wireframe: bool,
}

impl BoxPrimitive {
    /// Solid box for items without a usable model
    pub fn solid(item: &CatalogItem) -> Self {
        Self {
            size: item.size,
            color: item.color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn fallback(item: &CatalogItem) -> Self {
        Self {
            opacity: FALLBACK_OPACITY,
            ..Self::solid(item)
        }
    }

    pub fn placeholder(size: Dimensions) -> Self {
        Self {
            size,
            color: Color::PLACEHOLDER,
            opacity: PLACEHOLDER_OPACITY,
            wireframe: true,
        }
    }

    pub fn mesh(&self) -> primitives::MeshData {
        let [w, h, d] = self.size.to_array();
        primitives::cube(w as f32, h as f32, d as f32, self.color.rgb_f32())
    }

    pub fn outline(&self) -> primitives::LineMeshData {
        let [w, h, d] = self.size.to_array();
        let [r, g, b] = self.color.rgb_f32();
        primitives::wire_box(w as f32, h as f32, d as f32, [r, g, b, self.opacity])
    }
}

/// What a placed object currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visual {
    Model(ResolvedModel),
    Primitive(BoxPrimitive),
    /// Model requested, not settled yet
    Loading(BoxPrimitive),
}

impl Visual {
    /// Visual for an item given its settled load result
    pub fn for_result(item: &CatalogItem, result: &Result<ResolvedModel, AssetError>) -> Self {
        match result {
            Ok(model) => Visual::Model(model.clone()),
            Err(_) => Visual::Primitive(BoxPrimitive::fallback(item)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Visual::Loading(_))
    }
}

/// Where a settled load goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum LoadTarget {
    /// New placement; the placeholder is swapped for the object
    Placement { placeholder: ObjectId },
    /// Existing object rebuilt from history or a saved scene
    Refresh { object: ObjectId },
}

#[derive(Debug, Clone)]
struct PendingLoad {
    path: String,
    item_id: String,
    target: LoadTarget,
}

/// A load that finished
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub ticket: LoadTicket,
    pub item_id: String,
    pub target: LoadTarget,
    pub result: Result<ResolvedModel, AssetError>,
}

/// Tracks in-flight loads and caches settled results per path. A failed
/// result is kept for objects rebuilt from history so they are not retried;
/// new placements only reuse successful loads.
pub struct AssetResolver {
    loader: Box<dyn ModelLoader>,
    next_ticket: u64,
    pending: HashMap<LoadTicket, PendingLoad>,
    cache: HashMap<String, Result<ResolvedModel, AssetError>>,
}

impl AssetResolver {
    pub fn new(loader: Box<dyn ModelLoader>) -> Self {
        Self {
            loader,
            next_ticket: 1,
            pending: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    pub fn deferred() -> Self {
        Self::new(Box::new(DeferredLoader::new()))
    }

    /// Settled result for `path`, if any
    pub fn cached(&self, path: &str) -> Option<&Result<ResolvedModel, AssetError>> {
        self.cache.get(normalize_path(path))
    }

    pub fn request(&mut self, path: &str, item_id: &str, target: LoadTarget) -> LoadTicket {
        let path = normalize_path(path).to_string();
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.loader.request(ticket, &path);
        tracing::debug!(ticket = ticket.0, %path, ?target, "model requested");
        self.pending.insert(
            ticket,
            PendingLoad {
                path,
                item_id: item_id.to_string(),
                target,
            },
        );
        ticket
    }

    /// Record the result of a load. Errors on tickets that were never issued
    /// or already settled.
    pub fn settle(
        &mut self,
        ticket: LoadTicket,
        result: Result<ModelInfo, AssetError>,
    ) -> EditorResult<Settled> {
        let pending = self
            .pending
            .remove(&ticket)
            .ok_or(EditorError::UnknownTicket(ticket.0))?;

        let result = result.map(|info| ResolvedModel::from_info(&pending.path, info));
        match &result {
            Ok(model) => {
                tracing::debug!(path = %model.path, meshes = model.meshes.len(), "model loaded")
            }
            Err(e) => tracing::warn!(error = %e, "model load failed, using fallback box"),
        }
        self.cache.insert(pending.path, result.clone());

        Ok(Settled {
            ticket,
            item_id: pending.item_id,
            target: pending.target,
            result,
        })
    }

    /// Settle everything the loader has finished
    pub fn poll(&mut self) -> Vec<Settled> {
        let done = self.loader.poll();
        self.settle_all(done)
    }

    /// Block until the loader is idle, then settle
    pub fn wait(&mut self) -> Vec<Settled> {
        let done = self.loader.wait();
        self.settle_all(done)
    }

    fn settle_all(&mut self, done: Vec<LoadCompletion>) -> Vec<Settled> {
        done.into_iter()
            .filter_map(|c| match self.settle(c.ticket, c.result) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping completion");
                    None
                }
            })
            .collect()
    }

    pub fn drain_requests(&mut self) -> Vec<LoadRequest> {
        self.loader.drain_requests()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Asset path an in-flight ticket is loading
    pub fn pending_path(&self, ticket: LoadTicket) -> Option<&str> {
        self.pending.get(&ticket).map(|p| p.path.as_str())
    }

    /// Whether a load aimed at `target` is still in flight
    pub fn is_pending_for(&self, target: &LoadTarget) -> bool {
        self.pending.values().any(|p| &p.target == target)
    }
}
