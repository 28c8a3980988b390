use crate::config::ConfigError;
use crate::riasec::{InvalidInput, QuizError};
use crate::student::ProfileError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Failure while loading or writing a data file (question bank, formations,
/// statistics snapshot).
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Input(#[from] InvalidInput),
}

/// Opens a data file for buffered reading, keeping the path on failure.
pub(crate) fn open_data_file(path: &Path) -> Result<BufReader<File>, CatalogueError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CatalogueError::Read {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Input(InvalidInput),
    Quiz(QuizError),
    Profile(ProfileError),
    Catalogue(CatalogueError),
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Input(err) => write!(f, "invalid input: {}", err),
            AppError::Quiz(err) => write!(f, "quiz error: {}", err),
            AppError::Profile(err) => write!(f, "invalid profile: {}", err),
            AppError::Catalogue(err) => write!(f, "catalogue error: {}", err),
            AppError::NotFound(what) => write!(f, "{} not found", what),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Quiz(err) => Some(err),
            AppError::Profile(err) => Some(err),
            AppError::Catalogue(err) => Some(err),
            AppError::NotFound(_) => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) | AppError::Quiz(_) => StatusCode::BAD_REQUEST,
            AppError::Catalogue(CatalogueError::Input(_)) => StatusCode::BAD_REQUEST,
            AppError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalogue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<InvalidInput> for AppError {
    fn from(value: InvalidInput) -> Self {
        Self::Input(value)
    }
}

impl From<QuizError> for AppError {
    fn from(value: QuizError) -> Self {
        Self::Quiz(value)
    }
}

impl From<ProfileError> for AppError {
    fn from(value: ProfileError) -> Self {
        Self::Profile(value)
    }
}

impl From<CatalogueError> for AppError {
    fn from(value: CatalogueError) -> Self {
        Self::Catalogue(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riasec::Category;

    #[test]
    fn input_errors_map_to_bad_request() {
        let error = AppError::from(InvalidInput::MissingCategory(Category::Social));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.to_string(),
            "invalid input: score table is missing category S"
        );
    }

    #[test]
    fn missing_records_map_to_not_found() {
        let response = AppError::NotFound("career 'pilote'".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn io_backed_catalogue_errors_are_internal() {
        let error = AppError::from(CatalogueError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        )));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unreadable_files_name_their_path() {
        let error = open_data_file(Path::new("/nonexistent/oriento/stats.json"))
            .expect_err("missing file");
        assert!(matches!(error, CatalogueError::Read { ref path, .. }
            if path == Path::new("/nonexistent/oriento/stats.json")));

        let error = AppError::from(error);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error
            .to_string()
            .starts_with("catalogue error: failed to read /nonexistent/oriento/stats.json: "));
    }
}
