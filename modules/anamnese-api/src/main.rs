use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::OpenAi;
use anamnese_core::{Config, Session};
use anamnese_api::{rest, AppState};

// The instructor UI may submit base64-encoded exam images inline.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("anamnese=info".parse()?))
        .init();

    let config = Config::from_env();

    let public_dir = Path::new(&config.public_dir);
    let exams_dir = public_dir.join("uploads").join("exams");
    let audio_dir = public_dir.join("uploads").join("audio");
    std::fs::create_dir_all(&exams_dir)?;
    std::fs::create_dir_all(&audio_dir)?;

    let oracle = Arc::new(
        OpenAi::new(&config.openai_api_key, &config.chat_model).with_tts_model(&config.tts_model),
    );

    let state = Arc::new(AppState {
        session: Mutex::new(Session::new()),
        chat: oracle.clone(),
        speech: oracle,
        tts_voice: config.tts_voice.clone(),
        exams_dir,
        audio_dir,
    });

    let app = Router::new()
        // Health check
        .route("/health", get(|| async { "ok" }))
        // Instructor setup
        .route("/api/patient", post(rest::patient::configure).get(rest::patient::get_configuration))
        .route("/api/session/reset", post(rest::patient::reset_history))
        .route("/api/uploads/exams", post(rest::upload::upload_exam_image))
        // Student interaction
        .route("/api/interact", post(rest::interact::interact))
        .route("/api/evaluation", post(rest::evaluation::evaluate))
        .route("/api/tts", post(rest::speech::synthesize))
        // Frontend and uploaded assets
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Anamnese API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
