use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use super::store::{self, Document};

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 20;

pub struct AppState {
    conn: Mutex<Connection>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(conn: Connection) -> anyhow::Result<SharedState> {
        store::init_schema(&conn)?;
        Ok(Arc::new(Self {
            conn: Mutex::new(conn),
        }))
    }

    pub fn in_memory() -> anyhow::Result<SharedState> {
        Self::new(Connection::open_in_memory()?)
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("share store lock poisoned"))
    }
}

#[derive(Serialize)]
struct Success<T> {
    success: bool,
    data: T,
}

#[derive(Serialize)]
struct Failure<'a> {
    success: bool,
    error: &'a str,
}

fn ok<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success { success: true, data })
}

/// `NotFound` is the only failure a client can cause; everything else is a 500.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal(anyhow::Error),
}

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(e: E) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::BAD_REQUEST, "Share not found"),
            ApiError::Internal(e) => {
                tracing::error!("share request failed: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        let body = Failure {
            success: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/shares", get(list_shares).post(create_share))
        .route("/shares/:id", delete(delete_share))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: SharedState) -> anyhow::Result<()> {
    let app = router(state);
    tracing::info!("shares API listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ──

async fn list_shares(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Success<Vec<Document>>>, ApiError> {
    let limit = match params.get("limit") {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .with_context(|| format!("invalid limit {raw:?}"))?,
        None => DEFAULT_LIMIT,
    };
    let limit = limit.clamp(0, MAX_LIMIT) as usize;

    let docs = store::list_recent(&*state.conn()?, limit)?;
    Ok(ok(docs.into_iter().map(store::public_view).collect()))
}

async fn create_share(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Success<Document>>, ApiError> {
    let payload: Value = serde_json::from_slice(&body)?;
    let field = |key: &str| {
        payload
            .get(key)
            .cloned()
            .with_context(|| format!("share body has no `{key}`"))
    };
    let (name, params) = (field("name")?, field("params")?);

    let created = store::create_share(&*state.conn()?, name, params)?;
    tracing::info!(id = %created["id"], "created share");
    Ok(ok(store::public_view(created)))
}

async fn delete_share(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Success<()>>, ApiError> {
    if !store::delete(&*state.conn()?, &id)? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(%id, "deleted share");
    Ok(ok(()))
}
