use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "tasKade API",
        version = "1.0.0",
        description = "Backend for the tasKade personal task manager.\n\n**Authentication:** all task and contact endpoints require a JWT Bearer token obtained from `PUT /users/{email}`."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users / login
        crate::api::users::upsert_user,

        // Tasks
        crate::api::tasks::create_task,
        crate::api::tasks::get_tasks,
        crate::api::tasks::get_archived_tasks,
        crate::api::tasks::archive_task,
        crate::api::tasks::mark_task,
        crate::api::tasks::update_task,

        // Contact form
        crate::api::contact::send_email,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::UpsertOutcome,
            crate::models::UpsertUserResponse,
            crate::models::CreateTaskRequest,
            crate::models::MarkTaskRequest,
            crate::models::UpdateTaskRequest,
            crate::models::TaskResponse,
            crate::models::InsertTaskResponse,
            crate::models::UpdateTaskResponse,
            crate::services::mail_service::ContactEmailRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints."),
        (name = "Users", description = "Email-keyed login upsert. Issues the bearer token."),
        (name = "Tasks", description = "Task storage: create, list by archive state, archive, mark complete, edit."),
        (name = "Contact", description = "Contact-form email relay."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
