use actix_web::{web, HttpResponse};

use crate::services::mail_service::{ContactEmailRequest, Mailer};

#[utoipa::path(
    post,
    path = "/email",
    tag = "Contact",
    request_body = ContactEmailRequest,
    responses(
        (status = 200, description = "Email delivered"),
        (status = 502, description = "Downstream send failure")
    ),
    security(("bearer_auth" = []))
)]
pub async fn send_email(
    mailer: web::Data<Mailer>,
    request: web::Json<ContactEmailRequest>,
) -> HttpResponse {
    let sender = request.user_email.as_deref().unwrap_or("unknown");
    log::info!("📧 POST /email - from {}", sender);

    match mailer.send_contact_email(&request).await {
        Ok(()) => {
            log::info!("✅ Contact email sent for {}", sender);
            HttpResponse::Ok().json(serde_json::json!({ "message": "success" }))
        }
        Err(e) => {
            log::error!("❌ Contact email failed for {}: {}", sender, e);
            HttpResponse::BadGateway().json(serde_json::json!({ "message": "failed" }))
        }
    }
}
