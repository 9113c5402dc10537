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
    employees::{dto::EmployeeRequest, repo},
    error::ApiError,
    export,
    pagination::{ListQuery, Page},
    state::AppState,
};

use super::repo::Employee;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/export", get(export_employees))
        .route("/employees/:id", get(get_employee))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", post(create_employee))
        .route("/employees/:id", put(update_employee))
        .route("/employees/:id", delete(delete_employee))
}

#[instrument(skip(state))]
pub async fn list_employees(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Employee>>, ApiError> {
    let filter = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let page = repo::list_page(&state.db, filter, query.page).await?;
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    let employee = repo::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;
    Ok(Json(employee))
}

#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<EmployeeRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Employee>), ApiError> {
    let fields = payload.validate()?;
    let employee = repo::insert(&state.db, &fields).await?;

    info!(employee_id = employee.id, %user_id, "employee created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/employees/{}", employee.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(employee)))
}

#[instrument(skip(state, payload))]
pub async fn update_employee(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    let fields = payload.validate()?;
    let employee = repo::update(&state.db, id, &fields)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;

    info!(employee_id = id, %user_id, "employee updated");
    Ok(Json(employee))
}

#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Employee"));
    }
    info!(employee_id = id, %user_id, "employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Full unfiltered set as an xlsx attachment. A failed serialization is
/// reported without touching the records.
#[instrument(skip(state))]
pub async fn export_employees(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let employees = repo::list_all(&state.db).await?;
    let bytes = export::employees_to_xlsx(&employees).map_err(ApiError::Export)?;

    info!(rows = employees.len(), %user_id, "employees exported");

    let headers = [
        (axum::http::header::CONTENT_TYPE, export::XLSX_CONTENT_TYPE.to_string()),
        (
            axum::http::header::CONTENT_DISPOSITION,
            export::attachment_disposition("employees.xlsx"),
        ),
    ];
    Ok((headers, bytes))
}
