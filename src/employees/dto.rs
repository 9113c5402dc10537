use serde::Deserialize;
use time::macros::format_description;
use time::Date;

use crate::error::ApiError;

pub const DEFAULT_STATUS: &str = "Active";

/// Request body for creating or fully replacing an employee. Updates are a
/// full overwrite: every mutable field must be resupplied.
#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub hire_date: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Validated employee fields, ready for the store.
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub hire_date: Date,
    pub status: String,
}

impl EmployeeRequest {
    /// Presence checks plus strict `YYYY-MM-DD` date parsing. Nothing is
    /// written to the store when this fails.
    pub fn validate(self) -> Result<EmployeeFields, ApiError> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let position = self.position.trim().to_string();

        if first_name.is_empty() {
            return Err(ApiError::Validation("First name is required".into()));
        }
        if last_name.is_empty() {
            return Err(ApiError::Validation("Last name is required".into()));
        }
        if position.is_empty() {
            return Err(ApiError::Validation("Position is required".into()));
        }

        let hire_date = parse_hire_date(&self.hire_date)?;

        let status = match self.status.map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_STATUS.to_string(),
        };

        Ok(EmployeeFields {
            first_name,
            last_name,
            position,
            hire_date,
            status,
        })
    }
}

pub fn parse_hire_date(raw: &str) -> Result<Date, ApiError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw.trim(), &format)
        .map_err(|_| ApiError::Validation("Hire date must be YYYY-MM-DD".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EmployeeRequest {
        EmployeeRequest {
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            position: "Engineer".into(),
            hire_date: "2024-01-10".into(),
            status: Some("Active".into()),
        }
    }

    #[test]
    fn valid_request_passes() {
        let fields = request().validate().expect("valid");
        assert_eq!(fields.first_name, "Ana");
        assert_eq!(fields.hire_date.to_string(), "2024-01-10");
    }

    #[test]
    fn empty_first_name_is_rejected() {
        let mut req = request();
        req.first_name = "   ".into();
        assert!(matches!(req.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn empty_position_is_rejected() {
        let mut req = request();
        req.position = String::new();
        assert!(matches!(req.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn omitted_status_defaults_to_active() {
        let mut req = request();
        req.status = None;
        assert_eq!(req.validate().expect("valid").status, "Active");

        let mut req = request();
        req.status = Some("  ".into());
        assert_eq!(req.validate().expect("valid").status, "Active");
    }

    #[test]
    fn hire_date_parsing_is_strict() {
        assert!(parse_hire_date("2024-01-10").is_ok());
        assert!(parse_hire_date(" 2024-01-10 ").is_ok());
        assert!(parse_hire_date("2024-13-01").is_err());
        assert!(parse_hire_date("10/01/2024").is_err());
        assert!(parse_hire_date("2024-1-5").is_err());
        assert!(parse_hire_date("").is_err());
    }
}
