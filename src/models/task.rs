use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Task document (stored in MongoDB, "tasks" collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owner identity - set by the client at creation, never changed by these routes
    pub email: String,

    #[serde(rename = "taskName")]
    pub task_name: String,

    #[serde(rename = "taskDetails")]
    pub task_details: String,

    /// Flips to true via the archive route, never back
    #[serde(default)]
    pub archive: bool,

    /// Completion flag, set to whatever the client sends on the mark route
    #[serde(default)]
    pub checked: bool,
}

/// Request to create a task. Fields are deliberately optional: the server
/// performs no shape validation, absent fields are stored as nulls.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTaskRequest {
    pub email: Option<String>,
    #[serde(rename = "taskName")]
    pub task_name: Option<String>,
    #[serde(rename = "taskDetails")]
    pub task_details: Option<String>,
    pub archive: Option<bool>,
    pub checked: Option<bool>,
}

/// Request body for the mark (completion) route
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MarkTaskRequest {
    pub checked: Option<bool>,
}

/// Request body for the edit route. Only taskName/taskDetails are settable.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(rename = "taskName")]
    pub task_name: Option<String>,
    #[serde(rename = "taskDetails")]
    pub task_details: Option<String>,
}

/// Task as returned to clients (id rendered as hex string)
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TaskResponse {
    pub id: String,
    pub email: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    #[serde(rename = "taskDetails")]
    pub task_details: String,
    pub archive: bool,
    pub checked: bool,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        TaskResponse {
            id: task.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: task.email,
            task_name: task.task_name,
            task_details: task.task_details,
            archive: task.archive,
            checked: task.checked,
        }
    }
}

/// Insert outcome, wire-compatible with the frontend (camelCase)
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertTaskResponse {
    pub inserted_id: String,
}

/// Update outcome for the archive/mark/edit routes
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_wire_names() {
        let json = r#"{
            "email": "a@x.com",
            "taskName": "n",
            "taskDetails": "d",
            "archive": false,
            "checked": false
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.email, "a@x.com");
        assert_eq!(task.task_name, "n");
        assert_eq!(task.task_details, "d");
        assert!(!task.archive);
        assert!(!task.checked);
    }

    #[test]
    fn test_task_flags_default_false() {
        // Documents written before the flags existed deserialize with defaults
        let json = r#"{"email": "a@x.com", "taskName": "n", "taskDetails": "d"}"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert!(!task.archive);
        assert!(!task.checked);
    }

    #[test]
    fn test_create_request_accepts_missing_fields() {
        let request: CreateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_none());
        assert!(request.task_name.is_none());
        assert!(request.archive.is_none());
    }

    #[test]
    fn test_response_renders_hex_id() {
        let oid = ObjectId::new();
        let task = Task {
            id: Some(oid),
            email: "a@x.com".to_string(),
            task_name: "n".to_string(),
            task_details: "d".to_string(),
            archive: false,
            checked: true,
        };

        let response = TaskResponse::from(task);
        assert_eq!(response.id, oid.to_hex());
        assert!(response.checked);
    }
}
