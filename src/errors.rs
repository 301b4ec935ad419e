use actix_web::error::{BlockingError, ResponseError};
use actix_web::{http::StatusCode, HttpResponse};
use derive_more::Display;
use std::convert::From;

#[derive(Debug, Display, PartialEq)]
pub enum ServiceError {
    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),

    #[display(fmt = "Conflict: {}", _0)]
    Conflict(String),

    #[display(fmt = "Not Found")]
    NotFound,

    /// one or more required booking fields are blank
    #[display(fmt = "Missing required fields: {}", "_0.join(\", \")")]
    MissingFields(Vec<&'static str>),

    /// the submitted pricing table is incomplete or holds negative values
    #[display(fmt = "Invalid pricing: {}", _0)]
    InvalidPricing(String),

    /// the storage layer failed, the operation was not applied and can be retried
    #[display(fmt = "Storage unavailable: {}", _0)]
    Persistence(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [&'static str]>,
}

// impl ResponseError trait allows to convert our errors into http responses with appropriate data
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_)
            | ServiceError::MissingFields(_)
            | ServiceError::InvalidPricing(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::Persistence(_) => ErrorResponse {
                error: "Storage unavailable, please try again".to_string(),
                fields: None,
            },
            ServiceError::MissingFields(fields) => ErrorResponse {
                error: self.to_string(),
                fields: Some(fields.as_slice()),
            },
            _ => ErrorResponse {
                error: self.to_string(),
                fields: None,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl std::error::Error for ServiceError {}

impl From<std::io::Error> for ServiceError {
    fn from(error: std::io::Error) -> ServiceError {
        error!("storage io error: {}", error);
        ServiceError::Persistence(error.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> ServiceError {
        error!("unable to (de)serialize snapshot: {}", error);
        ServiceError::Persistence(error.to_string())
    }
}

impl From<BlockingError<ServiceError>> for ServiceError {
    fn from(error: BlockingError<ServiceError>) -> ServiceError {
        match error {
            BlockingError::Error(e) => e,
            BlockingError::Canceled => {
                error!("actix threadpool task was canceled");
                ServiceError::Persistence("storage task was canceled".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> ServiceError {
        ServiceError::BadRequest(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_listed() {
        let err = ServiceError::MissingFields(vec!["name", "game"]);

        assert_eq!(err.to_string(), "Missing required fields: name, game");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_are_retryable() {
        let err = ServiceError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        ));

        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn blocking_errors_unwrap_the_inner_error() {
        let err = ServiceError::from(BlockingError::Error(ServiceError::NotFound));

        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn canceled_storage_tasks_are_retryable() {
        let err = ServiceError::from(BlockingError::<ServiceError>::Canceled);

        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
