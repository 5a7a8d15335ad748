use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::service::{ServiceResponse, country_search_response};

use super::state::AppState;

fn into_http(resp: ServiceResponse) -> Response {
    let status = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, resp.content_type)], resp.body).into_response()
}

// ─── GET /health ─────────────────────────────────────────────────

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ─── GET /api/countries ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct CountrySearchQuery {
    pub query: Option<String>,
}

pub async fn country_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountrySearchQuery>,
) -> Response {
    into_http(country_search_response(&state.lookup, params.query.as_deref()).await)
}

// ─── GET /api/extensions/schema ──────────────────────────────────

pub async fn extensions_sdl(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.extensions.to_sdl(),
    )
        .into_response()
}

// ─── POST /api/extensions/{type_name}/{field_name} ───────────────

pub async fn resolve_extension(
    State(state): State<Arc<AppState>>,
    Path((type_name, field_name)): Path<(String, String)>,
    Json(source): Json<Value>,
) -> Response {
    if state.extensions.field(&type_name, &field_name).is_none() {
        return into_http(ServiceResponse::error(
            404,
            &format!("unknown extension field '{type_name}.{field_name}'"),
        ));
    }

    match state
        .extensions
        .resolve(&type_name, &field_name, &source)
        .await
    {
        Ok(value) => {
            debug!(%type_name, %field_name, "Extension field resolved");
            (StatusCode::OK, Json(value)).into_response()
        }
        Err(e) => {
            error!(%type_name, %field_name, error = %e, "Extension field failed");
            into_http(ServiceResponse::error(500, &e.to_string()))
        }
    }
}
