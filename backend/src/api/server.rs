//! HTTP server for the survey dashboard and CSV viewer.
//!
//! # Routes
//!
//! | Method   | Path               | Description                          |
//! |----------|--------------------|--------------------------------------|
//! | GET      | `/`                | Survey dashboard                     |
//! | GET      | `/upload`          | Upload form                          |
//! | POST     | `/upload`          | Store a CSV, redirect to its viewer  |
//! | GET      | `/view/{filename}` | Generic viewer for an uploaded CSV   |
//! | GET      | `/health`          | Health check                         |

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::pages;
use crate::config::AppConfig;
use crate::error::{LoadResult, ServerError, ServerResult, ValidationError};
use crate::storage::UploadStore;
use crate::transform::pipeline::{build_dashboard, view_file};
use crate::validation::{sanitize_filename, validate_upload};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: UploadStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = UploadStore::with_dir(&config.upload_dir);
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

/// Build the application router.
pub fn router(config: AppConfig) -> Router {
    let body_limit = config.max_body_bytes;
    let state = AppState::new(config);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/upload",
            get(upload_form)
                .post(upload_submit)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/view/{filename}", get(view))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    UploadStore::with_dir(&config.upload_dir).ensure_dir()?;

    let addr = config.socket_addr();
    info!("mindstats server running on http://{}", addr);
    info!("   dataset:     {}", config.data_path.display());
    info!("   uploads:     {}", config.upload_dir.display());
    info!("   GET  /                  - Survey dashboard");
    info!("   GET  /upload            - Upload form");
    info!("   POST /upload            - Upload CSV file");
    info!("   GET  /view/{{filename}}  - View uploaded CSV");

    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let title = match &self {
            ServerError::NotFound(_) => "Arquivo não encontrado",
            ServerError::Load(crate::error::LoadError::NotFound(_)) => "Arquivo não encontrado",
            ServerError::Load(_) => "Erro ao ler CSV",
            ServerError::Validation(_) | ServerError::Multipart(_) | ServerError::TooLarge(_) => {
                "Envio inválido"
            }
            ServerError::Storage(_) => "Erro ao salvar arquivo",
            ServerError::Task(_) => "Erro interno",
        };
        (status, Html(pages::error_page(title, &self.to_string()))).into_response()
    }
}

/// Run a file load on the blocking pool.
async fn run_blocking<T, F>(job: F) -> ServerResult<T>
where
    F: FnOnce() -> LoadResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(job).await??)
}

/// Health check endpoint
async fn health() -> &'static str {
    "ok"
}

/// Survey dashboard
async fn index(State(state): State<AppState>) -> Response {
    let job_config = Arc::clone(&state.config);
    let result =
        run_blocking(move || build_dashboard(&job_config.data_path, job_config.index_preview_rows))
            .await;
    let config = &state.config;

    match result {
        Ok(dashboard) => Html(pages::dashboard_page(&dashboard)).into_response(),
        Err(err) => {
            warn!(error = %err, "dashboard unavailable");
            let file_name = config
                .data_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let directory = config
                .data_path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default();

            let status =
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let page = pages::dashboard_error_page(&err.to_string(), &file_name, &directory);
            (status, Html(page)).into_response()
        }
    }
}

/// Upload form
async fn upload_form(State(state): State<AppState>) -> Html<String> {
    Html(pages::upload_page(
        None,
        &state.store.list(),
        state.config.max_body_bytes,
    ))
}

/// Upload CSV endpoint
///
/// A body that is not `multipart/form-data` is treated as a form without a
/// file, so the form is shown again instead of a bare rejection.
async fn upload_submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let result = match multipart {
        Ok(multipart) => receive_upload(&state, multipart).await,
        Err(rejection) => {
            warn!(error = %rejection, "upload is not multipart");
            Err(ValidationError::MissingFile.into())
        }
    };

    match result {
        Ok(name) => Redirect::to(&format!("/view/{}", name)).into_response(),
        Err(e) => {
            warn!(error = %e, "upload rejected");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
            let page = pages::upload_page(
                Some(&e.to_string()),
                &state.store.list(),
                state.config.max_body_bytes,
            );
            (status, Html(page)).into_response()
        }
    }
}

/// Read the `file` field, validate it and store it. Returns the stored name.
async fn receive_upload(state: &AppState, mut multipart: Multipart) -> ServerResult<String> {
    let limit = state.config.max_body_bytes;
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) = upload.ok_or(ValidationError::MissingFile)?;
    let name = validate_upload(&state.config, file_name.as_deref())?;

    info!(file = %name, bytes = bytes.len(), "new upload");
    state.store.save(&name, &bytes).await?;

    Ok(name)
}

fn multipart_error(err: axum::extract::multipart::MultipartError, limit: usize) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::TooLarge(limit)
    } else {
        ServerError::Multipart(err.body_text())
    }
}

/// Generic viewer for an uploaded file
async fn view(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ServerResult<Html<String>> {
    let path = state
        .store
        .path_for(&filename)
        .filter(|p| p.is_file())
        .ok_or_else(|| ServerError::NotFound(filename.clone()))?;

    let name = sanitize_filename(&filename);
    let cap = state.config.viewer_preview_rows;
    let report = run_blocking(move || view_file(&path, &name, cap)).await?;
    Ok(Html(pages::viewer_page(&report)))
}
