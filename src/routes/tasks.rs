use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Acknowledgement, TaskInput, TaskUpdate},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// Retrieves the authenticated user's tasks.
///
/// Tasks are returned in creation order. Other users' tasks never appear.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized` / `403 Forbidden`: Missing or invalid token.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.store.list_for_owner(caller.id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-empty.
///
/// ## Responses:
/// - `200 OK`: The created task, status "Pending".
/// - `400 Bad Request`: Missing or empty title.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let title = task_data
        .title()
        .ok_or_else(|| AppError::InvalidArgument("Task title is required".into()))?;

    let task = state.store.insert(caller.id, title).await?;
    log::info!("User {} created task {}", caller.id, task.id);

    Ok(HttpResponse::Ok().json(task))
}

/// Updates the title and/or status of a task the caller owns.
///
/// Fields absent from the body are left unchanged.
///
/// ## Responses:
/// - `200 OK`: The updated task.
/// - `404 Not Found`: The task does not exist or belongs to someone else.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_id = task_id.into_inner();

    let task = state
        .store
        .update_owned(task_id, caller.id, task_data.into_inner().into())
        .await?
        .ok_or_else(task_not_found)?;

    log::info!("User {} updated task {}", caller.id, task.id);
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task the caller owns.
///
/// ## Responses:
/// - `200 OK`: `{success: true, message}`.
/// - `404 Not Found`: The task does not exist or belongs to someone else.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    if !state.store.delete_owned(task_id, caller.id).await? {
        return Err(task_not_found());
    }

    log::info!("User {} deleted task {}", caller.id, task_id);
    Ok(HttpResponse::Ok().json(Acknowledgement::ok("Task deleted successfully")))
}
