use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Credentials seeded at bootstrap so that first login is always possible.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedAdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub seed_admin: SeedAdminConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "hrdesk".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "hrdesk-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let seed_admin = SeedAdminConfig {
            username: std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "adm".into()),
            email: std::env::var("SEED_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@correo.com".into()),
            password: std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
        };
        Ok(Self {
            database_url,
            jwt,
            seed_admin,
        })
    }
}
