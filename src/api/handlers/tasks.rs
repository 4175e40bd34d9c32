//! Task API handlers

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::error::Result;
use crate::operations::tasks::{NewTask, TaskPatch};
use crate::storage::tasks::Task;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Create task request. Fields are optional here so a missing one is
/// reported as a 400 by validation instead of a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default, alias = "tag")]
    pub etiqueta: Option<String>,
    #[serde(default, alias = "description")]
    pub descripcion: Option<String>,
    #[serde(default, alias = "due_date")]
    pub fecha_limite: Option<String>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            tag: req.etiqueta,
            description: req.descripcion,
            due_date: req.fecha_limite,
        }
    }
}

/// Partial update request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, alias = "tag")]
    pub etiqueta: Option<String>,
    #[serde(default, alias = "description")]
    pub descripcion: Option<String>,
    #[serde(default, alias = "due_date")]
    pub fecha_limite: Option<String>,
    #[serde(default, alias = "completed")]
    pub completado: Option<bool>,
}

impl From<UpdateTaskRequest> for TaskPatch {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            tag: req.etiqueta,
            description: req.descripcion,
            due_date: req.fecha_limite,
            completed: req.completado,
        }
    }
}

/// Form body of the form-based delete
#[derive(Debug, Deserialize)]
pub struct DeleteTaskForm {
    pub id: u64,
}

/// Response of update / complete / toggle
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskUpdatedResponse {
    pub message: String,
    #[serde(rename = "updatedTask")]
    pub updated_task: Task,
}

/// Response of delete
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDeletedResponse {
    pub message: String,
    #[serde(rename = "deletedTask")]
    pub deleted_task: Task,
}

fn updated(message: &str, task: Task) -> Json<TaskUpdatedResponse> {
    Json(TaskUpdatedResponse {
        message: message.to_string(),
        updated_task: task,
    })
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.tasks.list())
}

/// GET /tasks/grouped
/// Tasks keyed by tag, stored order kept inside each group
pub async fn list_tasks_grouped(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, Vec<Task>>> {
    Json(state.tasks.list_grouped())
}

/// GET /tasks/{id}
pub async fn get_task(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Task>> {
    state.tasks.get(id).map(Json)
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(req.into())?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id}
/// Merge the supplied fields; absent fields keep their stored value
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskUpdatedResponse>> {
    let task = state.tasks.update(id, req.into())?;
    Ok(updated("Task updated", task))
}

/// POST /tasks/complete/{id}
/// One-way: sets completado=true. Kicks off the quote fetch in the background.
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TaskUpdatedResponse>> {
    let task = state.tasks.complete(id)?;
    Ok(updated("Task completed", task))
}

/// POST /tasks/toggle/{id}
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TaskUpdatedResponse>> {
    let task = state.tasks.toggle(id)?;
    let message = if task.completed {
        "Task marked as completed"
    } else {
        "Task marked as pending"
    };
    Ok(updated(message, task))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TaskDeletedResponse>> {
    let task = state.tasks.delete(id)?;
    Ok(Json(TaskDeletedResponse {
        message: "Task deleted".to_string(),
        deleted_task: task,
    }))
}

/// POST /tasks/delete
/// Form-based delete, redirects back to the list
pub async fn delete_task_form(
    State(state): State<AppState>,
    Form(form): Form<DeleteTaskForm>,
) -> Result<Redirect> {
    state.tasks.delete(form.id)?;
    Ok(Redirect::to("/tasks"))
}
