use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, Query, State},
    http::{Method, StatusCode},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use folio_content::{
    image_extension, is_allowed_image_file, BlogPost, ContentDomain, ContentStore, Entry,
    Project, Tag,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::gate::{admin_guard, AdminGate};
use crate::uploads::UploadStore;

/// Multipart framing allowance on top of the upload size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub uploads: Arc<UploadStore>,
    pub gate: AdminGate,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    // route_layer: the guard runs only for matched admin routes, ahead of
    // every extractor, so a denied request never reaches a body parser.
    let admin = Router::new()
        .route("/content/:domain", put(admin_save_content))
        .route("/posts", get(admin_list_posts).post(create_entry::<BlogPost>))
        .route(
            "/posts/:slug",
            put(update_entry::<BlogPost>).delete(delete_entry::<BlogPost>),
        )
        .route("/tags", post(create_entry::<Tag>))
        .route(
            "/tags/:slug",
            put(update_entry::<Tag>).delete(delete_entry::<Tag>),
        )
        .route("/projects", post(create_entry::<Project>))
        .route(
            "/projects/:slug",
            put(update_entry::<Project>).delete(delete_entry::<Project>),
        )
        .route("/uploads", get(admin_list_uploads).post(admin_upload))
        .route("/uploads/:name", delete(admin_delete_upload))
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            admin_guard,
        ));

    let body_limit = state.uploads.max_size() + MULTIPART_OVERHEAD;
    let upload_dir = ServeDir::new(state.uploads.base_path());

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route("/api/content/:domain", get(get_content))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/tags", get(list_tags))
        .route("/api/projects", get(list_projects))
        .nest("/api/admin", admin)
        .nest_service("/uploads", upload_dir)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    admin_enabled: bool,
}

#[derive(Deserialize)]
struct PostQuery {
    tag: Option<String>,
}

#[derive(Serialize)]
struct DeletedResponse {
    deleted: bool,
    slug: String,
}

#[derive(Serialize)]
struct UploadResponse {
    url: String,
}

fn upload_url(name: &str) -> String {
    format!("/uploads/{name}")
}

/// Run synchronous store work off the async executor.
async fn blocking<T, F>(store: &ContentStore, f: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&ContentStore) -> Result<T, ServerError> + Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| ServerError::Internal(format!("Store task failed: {e}")))?
}

fn parse_domain(raw: &str) -> Result<ContentDomain, ServerError> {
    raw.parse::<ContentDomain>()
        .map_err(|e| ServerError::NotFound(e.to_string()))
}

// ─── Public ───

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.site_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        admin_enabled: state.gate.is_admin_enabled(),
    })
}

async fn get_content(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let domain = parse_domain(&domain)?;
    let doc = blocking(&state.store, move |s| Ok(s.read_json(domain)?)).await?;
    Ok(Json(doc))
}

async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Result<Json<Vec<BlogPost>>, ServerError> {
    let posts = blocking(&state.store, move |s| match query.tag {
        Some(tag) => Ok(s.posts_tagged(&tag)?),
        None => Ok(s.posts(false)?),
    })
    .await?;
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ServerError> {
    let post = blocking(&state.store, move |s| Ok(s.published_post(&slug)?)).await?;
    Ok(Json(post))
}

async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ServerError> {
    let tags = blocking(&state.store, |s| Ok(s.list::<Tag>()?)).await?;
    Ok(Json(tags))
}

async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, ServerError> {
    let projects = blocking(&state.store, |s| Ok(s.list::<Project>()?)).await?;
    Ok(Json(projects))
}

// ─── Admin (behind admin_guard) ───

async fn admin_save_content(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(doc): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let domain = parse_domain(&domain)?;
    let saved = blocking(&state.store, move |s| {
        s.save_json(domain, doc)?;
        Ok(s.read_json(domain)?)
    })
    .await?;

    info!(domain = %domain, "Admin saved content document");
    Ok(Json(saved))
}

async fn admin_list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPost>>, ServerError> {
    let posts = blocking(&state.store, |s| Ok(s.posts(true)?)).await?;
    Ok(Json(posts))
}

async fn create_entry<E>(
    State(state): State<AppState>,
    Json(entry): Json<E>,
) -> Result<(StatusCode, Json<E>), ServerError>
where
    E: Entry + Send + Sync + 'static,
{
    let created = blocking(&state.store, move |s| Ok(s.insert(entry)?)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_entry<E>(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(entry): Json<E>,
) -> Result<Json<E>, ServerError>
where
    E: Entry + Send + Sync + 'static,
{
    let updated = blocking(&state.store, move |s| Ok(s.update(&slug, entry)?)).await?;
    Ok(Json(updated))
}

async fn delete_entry<E>(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DeletedResponse>, ServerError>
where
    E: Entry + Send + Sync + 'static,
{
    let removed = blocking(&state.store, move |s| Ok(s.remove::<E>(&slug)?)).await?;
    Ok(Json(DeletedResponse {
        deleted: true,
        slug: removed.slug().to_string(),
    }))
}

fn multipart_error(err: MultipartError, max: usize) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::BodyTooLarge { max }
    } else {
        ServerError::BadRequest(format!("Multipart error: {}", err))
    }
}

async fn admin_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ServerError> {
    let max = state.uploads.max_size();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let mime = field.content_type().map(str::to_string);

        if !is_allowed_image_file(mime.as_deref(), &filename) {
            info!(filename = %filename, mime = ?mime, "Rejected upload");
            return Err(ServerError::UnsupportedMedia(
                mime.unwrap_or_else(|| filename.clone()),
            ));
        }
        let extension = image_extension(mime.as_deref(), &filename)
            .ok_or_else(|| ServerError::UnsupportedMedia(filename.clone()))?;

        let data = field.bytes().await.map_err(|e| multipart_error(e, max))?;

        let name = state.uploads.store(&data, extension).await?;
        info!(name = %name, original = %filename, size = data.len(), "Image uploaded");

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url: upload_url(&name),
            }),
        ));
    }

    Err(ServerError::BadRequest(
        "Missing 'file' field in multipart form".to_string(),
    ))
}

async fn admin_list_uploads(
    State(state): State<AppState>,
) -> Result<Json<Vec<UploadResponse>>, ServerError> {
    let names = state.uploads.list().await?;
    Ok(Json(
        names
            .iter()
            .map(|name| UploadResponse {
                url: upload_url(name),
            })
            .collect(),
    ))
}

async fn admin_delete_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    state.uploads.remove(&name).await?;
    info!(name = %name, "Upload deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
