use serde::Serialize;

/// Outcome of the login upsert, wire-compatible with the frontend (camelCase).
/// The user document itself is schema-less: whatever profile fields the client
/// sends are stored as-is under the email key.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Response for PUT /users/{email}: the upsert outcome plus a fresh token
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpsertUserResponse {
    pub result: UpsertOutcome,
    pub token: String,
}
