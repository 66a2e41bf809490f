use actix_cors::Cors;
use anyhow::Context;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use placement_portal::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::stop_on_signal,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    shared_repos::SharedRepositories,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Failed to load configuration")?;

    init_tracing(config.is_production());
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url, (config.worker_count as u32 * 4).max(5))
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool).await.context("Failed to run migrations")?;

    let app_state = web::Data::new(AppState::new(&config, SharedRepositories::postgres(pool)));
    app_state
        .uploads
        .ensure_dir()
        .await
        .context("Failed to create upload directory")?;

    let server_addr = config.server_addr();
    let cors_origins = config.cors_origins();
    let max_upload_bytes = config.max_upload_bytes;

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, max_upload_bytes))
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(stop_on_signal(server.handle()));
    server.await?;
    Ok(())
}
