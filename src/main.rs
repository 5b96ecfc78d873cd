mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use services::mail_service::Mailer;
use services::token_service::TokenService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            // Atlas-style URI assembled from discrete credentials
            let user = env::var("DB_USER").expect("DATABASE_URL or DB_USER must be set");
            let password = env::var("DB_PASSWORD").expect("DB_PASSWORD must be set");
            let cluster =
                env::var("DB_CLUSTER").unwrap_or_else(|_| "cluster0.mongodb.net".to_string());
            format!(
                "mongodb+srv://{}:{}@{}/taskade-todoList?retryWrites=true&w=majority",
                user, password, cluster
            )
        }
    };

    let token_secret = env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set");
    let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
    let email_receiver = env::var("EMAIL_RECEIVER").expect("EMAIL_RECEIVER must be set");
    let email_password = env::var("EMAIL_PASSWORD").expect("EMAIL_PASSWORD must be set");

    log::info!("🚀 Starting tasKade service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    let token_service = TokenService::new(token_secret);
    let token_data = web::Data::new(token_service.clone());

    let mailer = Mailer::new(smtp_host, email_receiver.clone(), email_password, email_receiver);
    let mailer_data = web::Data::new(mailer);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(token_data.clone())
            .app_data(mailer_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Liveness
            .route("/", web::get().to(api::health::greeting))
            .route("/health", web::get().to(api::health::health_check))
            // Login upsert - the only unguarded write; issues the bearer token
            .route("/users/{email}", web::put().to(api::users::upsert_user))
            // Task routes - all guarded. /mark and /update are registered
            // before the catch-all /{...} routes so they match first.
            .service(
                web::scope("/task")
                    .wrap(middleware::auth::AuthMiddleware::new(token_service.clone()))
                    .route("", web::post().to(api::tasks::create_task))
                    .route("/mark/{id}", web::put().to(api::tasks::mark_task))
                    .route("/update/{id}", web::put().to(api::tasks::update_task))
                    .route("/{email}", web::get().to(api::tasks::get_tasks))
                    .route("/{id}", web::put().to(api::tasks::archive_task)),
            )
            .service(
                web::scope("/archive")
                    .wrap(middleware::auth::AuthMiddleware::new(token_service.clone()))
                    .route("/{email}", web::get().to(api::tasks::get_archived_tasks)),
            )
            .service(
                web::scope("/email")
                    .wrap(middleware::auth::AuthMiddleware::new(token_service.clone()))
                    .route("", web::post().to(api::contact::send_email)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
