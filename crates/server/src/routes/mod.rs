use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use room_editor_lib::EditorError;
use serde_json::{json, Value};
use shared::{CreateProjectRequest, Project, ProjectId};

use crate::AppState;

fn internal(e: EditorError) -> StatusCode {
    tracing::error!("Store error: {e}");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// All projects, in creation order
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, StatusCode> {
    let store = state.projects.lock().await;
    let projects = store.list().map_err(internal)?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), StatusCode> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.projects.lock().await;
    let project = store.create(name, request.size).map_err(internal)?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<Json<Project>, StatusCode> {
    let store = state.projects.lock().await;
    store
        .get(id)
        .map_err(internal)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Replace a stored project (save from the editor)
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Json(project): Json<Project>,
) -> Result<Json<Project>, StatusCode> {
    if project.id != id {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.projects.lock().await;
    if !store.update(&project).map_err(internal)? {
        return Err(StatusCode::NOT_FOUND);
    }
    tracing::info!("Saved project {id} ({} objects)", project.object_count());
    Ok(Json(project))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = state.projects.lock().await;
    match store.toggle_favorite(id) {
        Ok(favorite) => Ok(Json(json!({ "id": id, "favorite": favorite }))),
        Err(EditorError::ProjectNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(internal(e)),
    }
}

/// The project last opened in the editor
pub async fn current_project(State(state): State<AppState>) -> Result<Json<Project>, StatusCode> {
    let store = state.projects.lock().await;
    store
        .current()
        .map_err(internal)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn set_current_project(
    State(state): State<AppState>,
    Json(project): Json<Project>,
) -> Result<StatusCode, StatusCode> {
    let mut store = state.projects.lock().await;
    store.set_current(&project).map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_editor_lib::fixtures::bedroom_project;
    use room_editor_lib::project::FileStore;
    use shared::SizeClass;

    fn temp_state() -> (AppState, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "room-server-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        (AppState::new(FileStore::new(&dir)), dir)
    }

    #[tokio::test]
    async fn test_create_then_list_and_get() {
        let (state, dir) = temp_state();
        let request = CreateProjectRequest {
            name: "Bedroom".into(),
            size: SizeClass::Small,
        };
        let (status, Json(created)) = create_project(State(state.clone()), Json(request))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.size, SizeClass::Small);

        let Json(projects) = list_projects(State(state.clone())).await.unwrap();
        assert_eq!(projects.len(), 1);

        let Json(fetched) = get_project(State(state.clone()), Path(created.id)).await.unwrap();
        assert_eq!(fetched, created);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (state, dir) = temp_state();
        let request = CreateProjectRequest {
            name: "   ".into(),
            size: SizeClass::Medium,
        };
        let result = create_project(State(state), Json(request)).await;
        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let (state, dir) = temp_state();
        let project = bedroom_project(42);
        let result = update_project(State(state), Path(42), Json(project)).await;
        assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_scene_and_toggle_favorite() {
        let (state, dir) = temp_state();
        let request = CreateProjectRequest {
            name: "Bedroom".into(),
            size: SizeClass::Medium,
        };
        let (_, Json(created)) = create_project(State(state.clone()), Json(request))
            .await
            .unwrap();

        let mut saved = bedroom_project(created.id);
        saved.name = created.name.clone();
        update_project(State(state.clone()), Path(created.id), Json(saved))
            .await
            .unwrap();
        let Json(fetched) = get_project(State(state.clone()), Path(created.id)).await.unwrap();
        assert_eq!(fetched.object_count(), 3);

        let Json(body) = toggle_favorite(State(state.clone()), Path(created.id)).await.unwrap();
        assert_eq!(body["favorite"], true);
        assert_eq!(
            toggle_favorite(State(state), Path(7)).await.unwrap_err(),
            StatusCode::NOT_FOUND
        );
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_current_project_slot() {
        let (state, dir) = temp_state();
        assert_eq!(
            current_project(State(state.clone())).await.unwrap_err(),
            StatusCode::NOT_FOUND
        );
        let project = bedroom_project(5);
        set_current_project(State(state.clone()), Json(project.clone()))
            .await
            .unwrap();
        let Json(current) = current_project(State(state)).await.unwrap();
        assert_eq!(current, project);
        let _ = std::fs::remove_dir_all(dir);
    }
}
