use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum PageSpyError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Duplicate(String),
    Unauthenticated(String),
    Serialization(String),
    FileOperation(String),
}

impl PageSpyError {
    pub fn code(&self) -> &'static str {
        match self {
            PageSpyError::DatabaseConfig(_) => "E001",
            PageSpyError::DatabaseConnection(_) => "E002",
            PageSpyError::DatabaseOperation(_) => "E003",
            PageSpyError::Validation(_) => "E004",
            PageSpyError::NotFound(_) => "E005",
            PageSpyError::Duplicate(_) => "E006",
            PageSpyError::Unauthenticated(_) => "E007",
            PageSpyError::Serialization(_) => "E008",
            PageSpyError::FileOperation(_) => "E009",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            PageSpyError::DatabaseConfig(_) => "Database Configuration Error",
            PageSpyError::DatabaseConnection(_) => "Database Connection Error",
            PageSpyError::DatabaseOperation(_) => "Database Operation Error",
            PageSpyError::Validation(_) => "Validation Error",
            PageSpyError::NotFound(_) => "Resource Not Found",
            PageSpyError::Duplicate(_) => "Duplicate Resource",
            PageSpyError::Unauthenticated(_) => "Unauthenticated",
            PageSpyError::Serialization(_) => "Serialization Error",
            PageSpyError::FileOperation(_) => "File Operation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PageSpyError::DatabaseConfig(msg)
            | PageSpyError::DatabaseConnection(msg)
            | PageSpyError::DatabaseOperation(msg)
            | PageSpyError::Validation(msg)
            | PageSpyError::NotFound(msg)
            | PageSpyError::Duplicate(msg)
            | PageSpyError::Unauthenticated(msg)
            | PageSpyError::Serialization(msg)
            | PageSpyError::FileOperation(msg) => msg,
        }
    }

    /// HTTP status for the API boundary. Anything not explicitly mapped
    /// is an internal error and must not leak detail to the client.
    pub fn http_status(&self) -> StatusCode {
        match self {
            PageSpyError::Validation(_) => StatusCode::BAD_REQUEST,
            PageSpyError::NotFound(_) => StatusCode::NOT_FOUND,
            PageSpyError::Duplicate(_) => StatusCode::CONFLICT,
            PageSpyError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PageSpyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PageSpyError {}

impl PageSpyError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        PageSpyError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        PageSpyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        PageSpyError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PageSpyError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PageSpyError::NotFound(msg.into())
    }

    pub fn duplicate<T: Into<String>>(msg: T) -> Self {
        PageSpyError::Duplicate(msg.into())
    }

    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        PageSpyError::Unauthenticated(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PageSpyError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PageSpyError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for PageSpyError {
    fn from(err: sea_orm::DbErr) -> Self {
        // Unique-constraint violations surface as their own error kind so
        // the API boundary can answer 409 instead of 500.
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return PageSpyError::Duplicate(msg);
        }
        PageSpyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PageSpyError {
    fn from(err: std::io::Error) -> Self {
        PageSpyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PageSpyError {
    fn from(err: serde_json::Error) -> Self {
        PageSpyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PageSpyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(PageSpyError::validation("x").code(), "E004");
        assert_eq!(PageSpyError::not_found("x").code(), "E005");
        assert_eq!(PageSpyError::duplicate("x").code(), "E006");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            PageSpyError::validation("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PageSpyError::not_found("gone").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PageSpyError::duplicate("twice").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PageSpyError::unauthenticated("who").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PageSpyError::database_operation("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = PageSpyError::not_found("lure missing");
        assert_eq!(err.to_string(), "Resource Not Found: lure missing");
    }
}
