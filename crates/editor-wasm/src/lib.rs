use wasm_bindgen::prelude::*;

use room_editor_lib::assets::{BoxPrimitive, DeferredLoader, LoadTicket, ModelInfo};
use room_editor_lib::catalog::Catalog;
use room_editor_lib::command::execute_json;
use room_editor_lib::error::{AssetError, EditorError, EditorResult};
use room_editor_lib::project::{KeyValueStore, MemoryStore};
use room_editor_lib::state::EditorSettings;
use room_editor_lib::viewport::Viewport;
use room_editor_lib::EditorSession;
use shared::{Color, Dimensions, Locale, ProjectId, SizeClass};

/// Initialize WASM module with panic hook and logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("Room editor WASM initialized");
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(js_err)
}

fn store_err(e: JsValue) -> EditorError {
    EditorError::Store(std::io::Error::other(format!("{e:?}")))
}

/// Vertex data for a box node of the frame. Solid boxes are interleaved
/// position/normal/rgb triangles (indexed by `box_indices`); wireframes are
/// position/rgba line segments.
#[wasm_bindgen]
pub fn box_vertices(
    width: f64,
    height: f64,
    depth: f64,
    color: &str,
    opacity: f32,
    wireframe: bool,
) -> Vec<f32> {
    let primitive = BoxPrimitive {
        size: Dimensions::new(width, height, depth),
        color: Color::from_hex(color).unwrap_or(Color::PLACEHOLDER),
        opacity,
        wireframe,
    };
    if wireframe {
        primitive.outline().vertices
    } else {
        primitive.mesh().vertices
    }
}

#[wasm_bindgen]
pub fn box_indices() -> Vec<u32> {
    BoxPrimitive::placeholder(Dimensions::UNIT).mesh().indices
}

/// Browser local storage as the project key-value store
struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> EditorResult<Option<String>> {
        self.storage.get_item(key).map_err(store_err)
    }

    fn set(&mut self, key: &str, value: &str) -> EditorResult<()> {
        self.storage.set_item(key, value).map_err(store_err)
    }

    fn remove(&mut self, key: &str) -> EditorResult<()> {
        self.storage.remove_item(key).map_err(store_err)
    }
}

fn default_store() -> Box<dyn KeyValueStore> {
    match LocalStorageStore::open() {
        Some(store) => Box::new(store),
        None => {
            tracing::warn!("localStorage unavailable, projects will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn parse_locale(locale: &str) -> Locale {
    match locale {
        "en" => Locale::En,
        _ => Locale::Th,
    }
}

/// Editor session owned by the page. Model files are fetched by the page:
/// it drains `take_load_requests` and reports back through `complete_load`.
#[wasm_bindgen]
pub struct EditorHandle {
    session: EditorSession,
}

#[wasm_bindgen]
impl EditorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(locale: &str) -> Self {
        let settings = EditorSettings {
            locale: parse_locale(locale),
            ..EditorSettings::default()
        };
        Self {
            session: EditorSession::new(
                Catalog::builtin(),
                settings,
                default_store(),
                Box::new(DeferredLoader::new()),
            ),
        }
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.session.set_locale(parse_locale(locale));
    }

    /// Catalog items grouped by category
    pub fn catalog(&self) -> Result<JsValue, JsError> {
        let catalog = self.session.catalog();
        let groups: Vec<_> = catalog
            .categories()
            .into_iter()
            .map(|c| (c, catalog.by_category(c).collect::<Vec<_>>()))
            .collect();
        to_js(&groups)
    }

    // ── Projects ─────────────────────────────────────────────

    pub fn list_projects(&self) -> Result<JsValue, JsError> {
        let projects = self.session.store().list().map_err(js_err)?;
        to_js(&projects)
    }

    pub fn create_project(&mut self, name: &str, size: &str) -> Result<JsValue, JsError> {
        let size = SizeClass::from(size.to_string());
        let project = self
            .session
            .store_mut()
            .create(name, size)
            .map_err(js_err)?;
        to_js(&project)
    }

    pub fn toggle_favorite(&mut self, id: f64) -> Result<bool, JsError> {
        self.session
            .toggle_favorite(id as ProjectId)
            .map_err(js_err)
    }

    /// Open a project into a canvas of the given size. Fails on a zero-sized
    /// canvas; retry once layout has settled.
    pub fn open_project(&mut self, id: f64, width: f32, height: f32) -> Result<(), JsError> {
        let id = id as ProjectId;
        let project = self
            .session
            .store()
            .get(id)
            .map_err(js_err)?
            .ok_or(EditorError::ProjectNotFound(id))
            .map_err(js_err)?;
        self.session
            .open(project, Viewport::new(width, height))
            .map_err(js_err)
    }

    pub fn open_current(&mut self, width: f32, height: f32) -> Result<(), JsError> {
        self.session
            .open_current(Viewport::new(width, height))
            .map_err(js_err)
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsError> {
        self.session
            .resize(Viewport::new(width, height))
            .map_err(js_err)
    }

    /// Ask before leaving with unsaved changes. Returns false when the user
    /// chose to stay.
    pub fn leave_editor(&mut self) -> bool {
        self.session.leave_editor(|message| {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        })
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.session.has_unsaved_changes()
    }

    // ── Commands ─────────────────────────────────────────────

    /// Execute one JSON command; returns the JSON response
    pub fn execute(&mut self, json: &str) -> Result<String, JsError> {
        let response = execute_json(&mut self.session, json).map_err(|e| JsError::new(&e))?;
        serde_json::to_string(&response).map_err(js_err)
    }

    // ── Model loading ────────────────────────────────────────

    pub fn take_load_requests(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.session.take_load_requests())
    }

    /// Report a fetch/decode result. `meshes` are the sub-mesh names of
    /// the loaded model; a non-empty `error` marks the load as failed.
    pub fn complete_load(
        &mut self,
        ticket: f64,
        meshes: JsValue,
        error: Option<String>,
    ) -> Result<JsValue, JsError> {
        let ticket = LoadTicket(ticket as u64);
        let result = match error {
            Some(message) if !message.is_empty() => Err(AssetError::Io {
                path: self
                    .session
                    .pending_path(ticket)
                    .unwrap_or_default()
                    .to_string(),
                message,
            }),
            _ => {
                let names: Vec<String> = if meshes.is_undefined() || meshes.is_null() {
                    Vec::new()
                } else {
                    serde_wasm_bindgen::from_value(meshes).map_err(js_err)?
                };
                Ok(ModelInfo::from_host(names))
            }
        };
        let object = self.session.complete_load(ticket, result).map_err(js_err)?;
        to_js(&object)
    }

    // ── Per-frame output ─────────────────────────────────────

    /// Advance `dt` seconds and return the frame to render
    pub fn frame(&mut self, dt: f32) -> Result<JsValue, JsError> {
        let frame = self.session.tick(dt);
        to_js(&frame)
    }

    pub fn take_notices(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.session.take_notices())
    }

    /// Scene graph changes since the last call
    pub fn take_changes(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.session.drain_changes())
    }
}
