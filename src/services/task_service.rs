use crate::database::MongoDB;
use crate::models::{CreateTaskRequest, InsertTaskResponse, Task, UpdateTaskResponse};
use crate::utils::error::AppError;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

fn parse_task_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("Invalid task ID: {}", id)))
}

/// Insert a new task. Fields the client did not send are written as nulls;
/// no shape validation happens here.
pub async fn insert_task(
    db: &MongoDB,
    request: CreateTaskRequest,
) -> Result<InsertTaskResponse, AppError> {
    let collection = db.collection::<Document>("tasks");

    let new_task = doc! {
        "email": request.email,
        "taskName": request.task_name,
        "taskDetails": request.task_details,
        "archive": request.archive,
        "checked": request.checked,
    };

    let result = collection
        .insert_one(new_task)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let inserted_id = match result.inserted_id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    };

    Ok(InsertTaskResponse { inserted_id })
}

/// Load all tasks for an email, scoped by archive flag. Documents that fail
/// to decode are logged and skipped rather than failing the whole listing.
pub async fn list_tasks(db: &MongoDB, email: &str, archived: bool) -> Result<Vec<Task>, AppError> {
    let collection = db.collection::<Task>("tasks");

    let mut cursor = collection
        .find(doc! { "email": email, "archive": archived })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut tasks = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(task) => tasks.push(task),
            Err(e) => {
                log::warn!("⚠️ Skipping undecodable task document: {}", e);
            }
        }
    }

    Ok(tasks)
}

/// Move a task to the archive. One-way: there is no route that clears the
/// flag again. Calling it on an already-archived task is a no-op match.
pub async fn archive_task(db: &MongoDB, id: &str) -> Result<UpdateTaskResponse, AppError> {
    set_task_fields(db, id, doc! { "archive": true }).await
}

/// Set the completion flag to whatever the client sent (including null).
pub async fn mark_task(
    db: &MongoDB,
    id: &str,
    checked: Option<bool>,
) -> Result<UpdateTaskResponse, AppError> {
    set_task_fields(db, id, doc! { "checked": checked }).await
}

/// Edit taskName/taskDetails, leaving archive and checked untouched.
pub async fn update_task(
    db: &MongoDB,
    id: &str,
    task_name: Option<String>,
    task_details: Option<String>,
) -> Result<UpdateTaskResponse, AppError> {
    set_task_fields(
        db,
        id,
        doc! { "taskName": task_name, "taskDetails": task_details },
    )
    .await
}

/// Shared update path for the id-keyed routes. Deliberately NOT an upsert:
/// an unknown id is a NotFound, never a fresh field-partial document.
async fn set_task_fields(
    db: &MongoDB,
    id: &str,
    fields: Document,
) -> Result<UpdateTaskResponse, AppError> {
    let object_id = parse_task_id(id)?;
    let collection = db.collection::<Document>("tasks");

    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": fields })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    Ok(UpdateTaskResponse {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id_rejects_garbage() {
        assert!(parse_task_id("not-an-oid").is_err());
        assert!(parse_task_id("").is_err());

        let oid = ObjectId::new();
        assert_eq!(parse_task_id(&oid.to_hex()).unwrap(), oid);
    }

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/taskade-test".to_string());
        MongoDB::new(&uri).await.unwrap()
    }

    fn new_task(email: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            email: Some(email.to_string()),
            task_name: Some("n".to_string()),
            task_details: Some("d".to_string()),
            archive: Some(false),
            checked: Some(false),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_insert_then_list_round_trip() {
        let db = test_db().await;
        let email = "round-trip@x.com";
        db.collection::<Document>("tasks")
            .delete_many(doc! { "email": email })
            .await
            .unwrap();

        let inserted = insert_task(&db, new_task(email)).await.unwrap();
        assert_eq!(inserted.inserted_id.len(), 24);

        let tasks = list_tasks(&db, email, false).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.unwrap().to_hex(), inserted.inserted_id);
        assert_eq!(tasks[0].task_name, "n");
        assert_eq!(tasks[0].task_details, "d");
        assert!(!tasks[0].checked);

        let archived = list_tasks(&db, email, true).await.unwrap();
        assert!(archived.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_archive_is_idempotent() {
        let db = test_db().await;
        let email = "archive-twice@x.com";
        db.collection::<Document>("tasks")
            .delete_many(doc! { "email": email })
            .await
            .unwrap();

        let inserted = insert_task(&db, new_task(email)).await.unwrap();

        let first = archive_task(&db, &inserted.inserted_id).await.unwrap();
        assert_eq!(first.matched_count, 1);
        assert_eq!(first.modified_count, 1);

        // Second call matches but changes nothing; archive stays true
        let second = archive_task(&db, &inserted.inserted_id).await.unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 0);

        let archived = list_tasks(&db, email, true).await.unwrap();
        assert_eq!(archived.len(), 1);
        assert!(archived[0].archive);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mark_touches_only_checked() {
        let db = test_db().await;
        let email = "mark-only@x.com";
        db.collection::<Document>("tasks")
            .delete_many(doc! { "email": email })
            .await
            .unwrap();

        let inserted = insert_task(&db, new_task(email)).await.unwrap();
        mark_task(&db, &inserted.inserted_id, Some(true))
            .await
            .unwrap();

        let tasks = list_tasks(&db, email, false).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].checked);
        assert_eq!(tasks[0].task_name, "n");
        assert_eq!(tasks[0].task_details, "d");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_update_touches_only_text_fields() {
        let db = test_db().await;
        let email = "edit-only@x.com";
        db.collection::<Document>("tasks")
            .delete_many(doc! { "email": email })
            .await
            .unwrap();

        let inserted = insert_task(&db, new_task(email)).await.unwrap();
        update_task(
            &db,
            &inserted.inserted_id,
            Some("new".to_string()),
            Some("nd".to_string()),
        )
        .await
        .unwrap();

        let tasks = list_tasks(&db, email, false).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_name, "new");
        assert_eq!(tasks[0].task_details, "nd");
        assert!(!tasks[0].archive);
        assert!(!tasks[0].checked);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_unknown_id_is_not_found_and_creates_nothing() {
        let db = test_db().await;

        let missing = ObjectId::new().to_hex();
        let result = archive_task(&db, &missing).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let object_id = ObjectId::parse_str(&missing).unwrap();
        let created = db
            .collection::<Document>("tasks")
            .find_one(doc! { "_id": object_id })
            .await
            .unwrap();
        assert!(created.is_none());
    }
}
