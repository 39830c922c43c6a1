use crate::{error::AppError, models::TaskInput, store};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Creates a new task.
///
/// Expects a JSON payload conforming to `TaskInput`.
///
/// ## Request Body:
/// - `title`: The title of the task (required, 1-100 characters).
/// - `description` (optional): A description of the task (up to 500 characters).
/// - `completed` (optional): Whether the task is already completed. Defaults to false.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created task, including its assigned id.
/// - `400 Bad Request`: If the payload is malformed or missing required fields.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `422 Unprocessable Entity`: If input validation on `TaskInput` fails.
/// - `500 Internal Server Error`: For database errors.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = store::tasks::create(&pool, &task_data).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves the list of all tasks, ordered by ascending id.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of task records.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn list_tasks(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let tasks = store::tasks::list_all(&pool).await?;

    Ok(HttpResponse::Ok().json(tasks))
}
