use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    candidates::{dto::CandidateRequest, repo},
    error::ApiError,
    export,
    pagination::{ListQuery, Page},
    state::AppState,
};

use super::repo::Candidate;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/candidates", get(list_candidates))
        .route("/candidates/export", get(export_candidates))
        .route("/candidates/:id", get(get_candidate))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/candidates", post(create_candidate))
        .route("/candidates/:id", put(update_candidate))
        .route("/candidates/:id", delete(delete_candidate))
}

#[instrument(skip(state))]
pub async fn list_candidates(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Candidate>>, ApiError> {
    let filter = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let page = repo::list_page(&state.db, filter, query.page).await?;
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn get_candidate(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Candidate>, ApiError> {
    let candidate = repo::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Candidate"))?;
    Ok(Json(candidate))
}

#[instrument(skip(state, payload))]
pub async fn create_candidate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CandidateRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Candidate>), ApiError> {
    let fields = payload.validate()?;
    let candidate = repo::insert(&state.db, &fields).await?;

    info!(candidate_id = candidate.id, %user_id, "candidate created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/candidates/{}", candidate.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(candidate)))
}

#[instrument(skip(state, payload))]
pub async fn update_candidate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<CandidateRequest>,
) -> Result<Json<Candidate>, ApiError> {
    let fields = payload.validate()?;
    let candidate = repo::update(&state.db, id, &fields)
        .await?
        .ok_or(ApiError::NotFound("Candidate"))?;

    info!(candidate_id = id, %user_id, "candidate updated");
    Ok(Json(candidate))
}

#[instrument(skip(state))]
pub async fn delete_candidate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Candidate"));
    }
    info!(candidate_id = id, %user_id, "candidate deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn export_candidates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let candidates = repo::list_all(&state.db).await?;
    let bytes = export::candidates_to_xlsx(&candidates).map_err(ApiError::Export)?;

    info!(rows = candidates.len(), %user_id, "candidates exported");

    let headers = [
        (axum::http::header::CONTENT_TYPE, export::XLSX_CONTENT_TYPE.to_string()),
        (
            axum::http::header::CONTENT_DISPOSITION,
            export::attachment_disposition("candidates.xlsx"),
        ),
    ];
    Ok((headers, bytes))
}
