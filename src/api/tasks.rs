use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{
    CreateTaskRequest, InsertTaskResponse, MarkTaskRequest, TaskResponse, UpdateTaskRequest,
    UpdateTaskResponse,
};
use crate::services::task_service;
use crate::utils::error::AppError;

fn error_response(e: AppError) -> HttpResponse {
    let body = serde_json::json!({
        "success": false,
        "error": e.to_string()
    });
    match e {
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::InvalidRequest(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[utoipa::path(
    post,
    path = "/task",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Task stored", body = InsertTaskResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    db: web::Data<MongoDB>,
    request: web::Json<CreateTaskRequest>,
) -> HttpResponse {
    log::info!("📝 POST /task");

    match task_service::insert_task(&db, request.into_inner()).await {
        Ok(response) => {
            log::info!("✅ Task stored: {}", response.inserted_id);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Failed to store task: {}", e);
            error_response(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/task/{email}",
    tag = "Tasks",
    params(
        ("email" = String, Path, description = "Owner identity (email)")
    ),
    responses(
        (status = 200, description = "Active (non-archived) tasks", body = [TaskResponse])
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_tasks(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("📋 GET /task/{}", email);

    list_by_archive_state(&db, &email, false).await
}

#[utoipa::path(
    get,
    path = "/archive/{email}",
    tag = "Tasks",
    params(
        ("email" = String, Path, description = "Owner identity (email)")
    ),
    responses(
        (status = 200, description = "Archived tasks", body = [TaskResponse])
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_archived_tasks(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("🗄️  GET /archive/{}", email);

    list_by_archive_state(&db, &email, true).await
}

async fn list_by_archive_state(db: &MongoDB, email: &str, archived: bool) -> HttpResponse {
    match task_service::list_tasks(db, email, archived).await {
        Ok(tasks) => {
            let tasks: Vec<TaskResponse> = tasks.into_iter().map(TaskResponse::from).collect();
            HttpResponse::Ok().json(tasks)
        }
        Err(e) => {
            log::error!("❌ Failed to list tasks for {}: {}", email, e);
            error_response(e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/task/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task id (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Task archived", body = UpdateTaskResponse),
        (status = 400, description = "Invalid task id"),
        (status = 404, description = "No task with that id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn archive_task(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("📦 PUT /task/{} - archiving", id);

    match task_service::archive_task(&db, &id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::warn!("⚠️ Archive failed for {}: {}", id, e);
            error_response(e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/task/mark/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task id (hex ObjectId)")
    ),
    request_body = MarkTaskRequest,
    responses(
        (status = 200, description = "Completion flag set", body = UpdateTaskResponse),
        (status = 400, description = "Invalid task id"),
        (status = 404, description = "No task with that id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_task(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<MarkTaskRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("☑️  PUT /task/mark/{} - checked: {:?}", id, request.checked);

    match task_service::mark_task(&db, &id, request.checked).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::warn!("⚠️ Mark failed for {}: {}", id, e);
            error_response(e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/task/update/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task id (hex ObjectId)")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task text updated", body = UpdateTaskResponse),
        (status = 400, description = "Invalid task id"),
        (status = 404, description = "No task with that id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<UpdateTaskRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("✏️  PUT /task/update/{}", id);

    let request = request.into_inner();
    match task_service::update_task(&db, &id, request.task_name, request.task_details).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::warn!("⚠️ Update failed for {}: {}", id, e);
            error_response(e)
        }
    }
}
