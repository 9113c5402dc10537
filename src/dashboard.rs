use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{auth::jwt::AuthUser, candidates, employees, error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub employees: i64,
    pub candidates: i64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<DashboardCounts>, ApiError> {
    let employees = employees::repo::count(&state.db).await?;
    let candidates = candidates::repo::count(&state.db).await?;
    Ok(Json(DashboardCounts {
        employees,
        candidates,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_serialize_by_entity() {
        let counts = DashboardCounts {
            employees: 12,
            candidates: 3,
        };
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"employees":12,"candidates":3}"#);
    }
}
