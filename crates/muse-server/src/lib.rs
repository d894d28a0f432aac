//! Muse Web Server
//!
//! Axum-based REST API for the Muse content planner.
//!
//! - Session-cookie authentication (register/login/logout); handlers receive
//!   the authenticated user as an explicit extractor value
//! - Per-user scoping on every content/library query
//! - Restrictive CORS policy and security headers
//! - Input validation (schedule-time parsing, upload type/size limits)
//! - Sanitized error responses; full errors go to the log

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use muse_core::db::Database;
use muse_core::mail::{HttpMailer, Mailer};

mod auth;
mod handlers;
mod scheduler;

pub use auth::AuthUser;
pub use scheduler::{run_reminder_pass, start_reminder_scheduler, ReminderScheduleConfig};

/// Maximum file upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "muse_session";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only in production)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Outbound mail, when configured; reminder endpoints degrade without it
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Directory where uploaded images are stored
    pub uploads_dir: std::path::PathBuf,
}

/// Build a Set-Cookie value for a fresh session token
pub(crate) fn session_cookie(token: &str) -> String {
    // Max-Age mirrors the DB-side session TTL.
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        muse_core::db::SESSION_TTL_DAYS * 24 * 3600
    )
}

/// Build a Set-Cookie value that clears the session cookie
pub(crate) fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let mailer: Option<Arc<dyn Mailer>> = HttpMailer::from_env().map(|m| {
        info!("Mail API configured (sender: {})", m.sender());
        Arc::new(m) as Arc<dyn Mailer>
    });
    if mailer.is_none() {
        info!("Mail API not configured (set MUSE_MAIL_URL and MUSE_MAIL_SENDER to enable reminders)");
    }

    let uploads_dir = std::path::PathBuf::from("uploads");
    create_router_with_options(db, static_dir, config, mailer, uploads_dir)
}

/// Create the application router with explicit collaborators (for testing)
pub fn create_router_with_options(
    db: Database,
    static_dir: Option<&str>,
    config: ServerConfig,
    mailer: Option<Arc<dyn Mailer>>,
    uploads_dir: std::path::PathBuf,
) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        mailer,
        uploads_dir: uploads_dir.clone(),
    });

    let api_routes = Router::new()
        // Health / auth
        .route("/health", get(handlers::health))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::get_me))
        .route("/me/reminders", patch(handlers::update_reminders))
        // Ideas
        .route(
            "/ideas",
            get(handlers::list_ideas).post(handlers::create_idea),
        )
        .route(
            "/ideas/:id",
            axum::routing::patch(handlers::update_idea).delete(handlers::delete_idea),
        )
        // Library
        .route(
            "/library",
            get(handlers::list_library).post(handlers::create_library_item),
        )
        .route(
            "/library/:id",
            axum::routing::delete(handlers::delete_library_item),
        )
        // Calendar
        .route("/calendar-events", get(handlers::calendar_events))
        // Insights
        .route("/insights", get(handlers::get_insights))
        // Uploads
        .route(
            "/upload-image",
            post(handlers::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE)),
        )
        // Export
        .route("/export/content", get(handlers::export_content))
        // Reminders
        .route("/reminders/test", post(handlers::test_reminder));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    // Security headers
    // CSP: same-origin scripts, inline styles allowed for the frontend bundle,
    // blob/data images for thumbnails
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' blob: data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    // Expired sessions accumulate silently; clear them on boot.
    match db.purge_expired_sessions(chrono::Utc::now().naive_utc()) {
        Ok(purged) if purged > 0 => info!("Purged {} expired session(s)", purged),
        Ok(_) => {}
        Err(e) => error!("Failed to purge expired sessions: {}", e),
    }

    // Start the reminder scheduler if configured
    if let Some(reminder_config) = ReminderScheduleConfig::from_env() {
        match HttpMailer::from_env() {
            Some(mailer) => {
                start_reminder_scheduler(db.clone(), Arc::new(mailer), reminder_config);
            }
            None => {
                info!("Reminder schedule set but mail is not configured; reminders disabled");
            }
        }
    }

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<muse_core::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn service_unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<muse_core::Error> for AppError {
    fn from(err: muse_core::Error) -> Self {
        use muse_core::Error;
        match err {
            Error::InvalidData(msg) => Self::bad_request(&msg),
            Error::NotFound(msg) => Self::not_found(&msg),
            Error::Conflict(msg) => Self::conflict(&msg),
            err => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(err),
            },
        }
    }
}
