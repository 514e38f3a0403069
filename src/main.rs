use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::{web, App, HttpServer};

use solarconnect::db;
use solarconnect::handlers;
use solarconnect::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "5001".to_string())
        .parse::<u16>()
        .unwrap_or(5001);
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://solarconnect.db".to_string());

    let pool = db::init_pool(&database_url)
        .await
        .expect("Failed to initialize SQLite pool");
    let app_state = web::Data::new(AppState::new(pool));

    log::info!("Server running on port {port}");

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            // configure CORS more strictly for production
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .route("/", web::get().to(handlers::index))
            .route("/health", web::get().to(handlers::health_check))

            .route("/api/engineers/join", web::post().to(handlers::engineers::join_network))
            .route("/api/engineers/profile/{id}", web::get().to(handlers::engineers::get_engineer_profile))

            .route("/api/auth/register", web::post().to(handlers::auth::register))
            .route("/api/auth/login", web::post().to(handlers::auth::login))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
