mod app;
mod auth;
mod candidates;
mod config;
mod dashboard;
mod employees;
mod error;
mod export;
mod pagination;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "hrdesk=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    // One-time bootstrap: schema, then the seed admin. Both idempotent.
    sqlx::migrate!("./migrations").run(&app_state.db).await?;
    auth::repo::ensure_seed_admin(&app_state.db, &app_state.config.seed_admin).await?;

    let app = app::build_app(app_state);
    app::serve(app).await
}
