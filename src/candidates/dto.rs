use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_STATUS: &str = "Applied";

/// Request body for creating or fully replacing a candidate. Validation
/// rules mirror the employee ones: mandatory fields are checked for both
/// entity types.
#[derive(Debug, Deserialize)]
pub struct CandidateRequest {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CandidateFields {
    pub name: String,
    pub position: String,
    pub status: String,
}

impl CandidateRequest {
    pub fn validate(self) -> Result<CandidateFields, ApiError> {
        let name = self.name.trim().to_string();
        let position = self.position.trim().to_string();

        if name.is_empty() {
            return Err(ApiError::Validation("Name is required".into()));
        }
        if position.is_empty() {
            return Err(ApiError::Validation("Position is required".into()));
        }

        let status = match self.status.map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_STATUS.to_string(),
        };

        Ok(CandidateFields {
            name,
            position,
            status,
        })
    }
}
