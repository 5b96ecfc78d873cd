use actix_web::{web, HttpResponse};
use mongodb::bson::to_document;

use crate::database::MongoDB;
use crate::models::{UpsertUserResponse, UpsertOutcome};
use crate::services::token_service::TokenService;
use crate::services::user_service;

#[utoipa::path(
    put,
    path = "/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User identity (email)")
    ),
    responses(
        (status = 200, description = "Profile stored, token issued", body = UpsertUserResponse),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn upsert_user(
    db: web::Data<MongoDB>,
    token_service: web::Data<TokenService>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let email = path.into_inner();
    log::info!("👤 PUT /users/{} - login upsert", email);

    // The profile is schema-less, but $set needs a document
    let profile = match to_document(&body.into_inner()) {
        Ok(doc) => doc,
        Err(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Request body must be a JSON object"
            }))
        }
    };

    let result: UpsertOutcome = match user_service::upsert_user(&db, &email, profile).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("❌ Failed to upsert user {}: {}", email, e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }));
        }
    };

    // Token is issued unconditionally once the profile write succeeds
    match token_service.issue(&email) {
        Ok(token) => {
            log::info!("✅ User stored and token issued: {}", email);
            HttpResponse::Ok().json(UpsertUserResponse { result, token })
        }
        Err(e) => {
            log::error!("❌ Failed to issue token for {}: {}", email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
