mod model;
mod server;

use axum::extract::DefaultBodyLimit;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    router,
    scheduler::event_reminders,
    service::{
        setup_code::SetupCodeService,
        upload::{UploadStorage, UPLOADS_URL_PREFIX},
    },
    startup,
    state::AppState,
};

/// Room for the text fields of a multipart form on top of the attachment.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let cors = startup::cors_layer(&config)?;

    let setup_code_service = SetupCodeService::new();
    startup::check_for_admin(&db, &setup_code_service).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let uploads = UploadStorage::new(config.upload_dir.clone(), config.max_upload_bytes);

    let _scheduler = event_reminders::start_scheduler(db.clone()).await?;

    let mut app = router::router()
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.upload_dir))
        .with_state(AppState::new(db, setup_code_service, uploads))
        .layer(session)
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes + FORM_OVERHEAD_BYTES,
        ))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
