use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, AppError},
    service::setup_code::SetupCodeService,
};

/// Interval between sweeps of expired sessions.
const EXPIRED_SESSION_SWEEP_SECS: u64 = 60 * 60;

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Migrates the session table, spawns the background task that deletes expired
/// sessions and configures the cookie: 7 day inactivity expiry, `HttpOnly`,
/// `SameSite=Lax`, `Secure` when configured.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to install on the router
/// - `Err(AppError::SqlxErr)` - Session table migration failed
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    use tower_sessions::session_store::ExpiredDeletion;

    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let deletion_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = deletion_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(
                EXPIRED_SESSION_SWEEP_SECS,
            ))
            .await
        {
            tracing::error!("Expired session cleanup stopped: {}", e);
        }
    });

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session_layer)
}

/// Prints a setup code when no active admin account exists yet.
///
/// The code is logged at warn level so it shows with the default filter; the operator
/// posts it to `/api/auth/setup` to create the first admin.
///
/// # Returns
/// - `Ok(())` - Admin exists or code was generated
/// - `Err(AppError::DbErr)` - Failed to check for admins
pub async fn check_for_admin(
    db: &DatabaseConnection,
    setup_code_service: &SetupCodeService,
) -> Result<(), AppError> {
    let user_repo = UserRepository::new(db);

    if !user_repo.admin_exists().await? {
        let code = setup_code_service.generate().await;

        tracing::warn!(
            "No admin account exists. Create one within {} seconds by posting this code to /api/auth/setup: {}",
            setup_code_service.ttl_seconds(),
            code
        );
    }

    Ok(())
}

/// Builds the CORS layer for a separately hosted frontend.
///
/// Credentials are allowed so the session cookie is sent, which requires an explicit
/// origin, method and header list.
///
/// # Returns
/// - `Ok(Some(CorsLayer))` - `CORS_ORIGIN` is configured
/// - `Ok(None)` - Same-origin deployment, no CORS headers
/// - `Err(ConfigError::InvalidEnvVar)` - Origin is not a valid header value
pub fn cors_layer(config: &Config) -> Result<Option<tower_http::cors::CorsLayer>, AppError> {
    use axum::http::{header, HeaderValue, Method};
    use tower_http::cors::CorsLayer;

    let Some(origin) = config.cors_origin.as_deref() else {
        return Ok(None);
    };

    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "CORS_ORIGIN".to_string(),
            reason: e.to_string(),
        })?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
    ))
}
