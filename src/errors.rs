use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use diesel::result::DatabaseErrorKind;
use serde::Serialize;
use thiserror::Error;

/// Wire shape shared by every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found.")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Authentication credentials were not provided.")]
    Unauthorized,
    #[error("database error: {0}")]
    Database(diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("blocking task error: {0}")]
    Blocking(#[from] error::BlockingError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => ApiError::NotFound,
            // The only foreign keys point at listings, so a violation means
            // the request addressed a listing that is not there.
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                ApiError::Validation("Referenced listing does not exist.".to_owned())
            }
            other => ApiError::Database(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::Pool(_) | ApiError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Database(e) => log::error!("database error: {:?}", e),
            ApiError::Pool(e) => log::error!("connection pool error: {:?}", e),
            ApiError::Blocking(e) => log::error!("blocking task error: {:?}", e),
            _ => {}
        }

        let detail = if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error.".to_owned()
        } else {
            self.to_string()
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { detail })
    }
}

/// Malformed request bodies become 400s with the deserializer's message
/// instead of the framework default.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    let response = match &err {
        error::JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType()
            .json(ErrorBody { detail: "Unsupported media type.".to_owned() }),
        error::JsonPayloadError::Deserialize(e) => {
            HttpResponse::BadRequest().json(ErrorBody { detail: e.to_string() })
        }
        _ => HttpResponse::BadRequest().json(ErrorBody { detail }),
    };
    error::InternalError::from_response(err, response).into()
}

/// Malformed query strings (for example a non-numeric `max_price`) are a
/// client error, not something silently ignored.
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    let response = HttpResponse::BadRequest().json(ErrorBody { detail });
    error::InternalError::from_response(err, response).into()
}

/// A non-numeric id in the path can never address a record, so it reads as
/// not-found rather than as a malformed request.
pub fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::NotFound().json(ErrorBody { detail: "Not found.".to_owned() });
    error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_detail(err: ApiError) -> String {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["detail"].as_str().unwrap().to_owned()
    }

    #[actix_web::test]
    async fn not_found_renders_a_404_detail() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body_detail(ApiError::NotFound).await, "Not found.");
    }

    #[actix_web::test]
    async fn validation_renders_a_400_with_the_message() {
        let err = ApiError::Validation("Cannot delete a confirmed booking.".to_owned());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body_detail(err).await, "Cannot delete a confirmed booking.");
    }

    #[actix_web::test]
    async fn unauthorized_renders_a_401() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_detail(ApiError::Unauthorized).await,
            "Authentication credentials were not provided."
        );
    }

    #[actix_web::test]
    async fn backend_failures_stay_opaque() {
        let err = ApiError::from(diesel::result::Error::BrokenTransactionManager);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_detail(err).await, "Internal server error.");
    }

    #[test]
    fn diesel_not_found_becomes_not_found() {
        let err = ApiError::from(diesel::result::Error::NotFound);
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn foreign_key_violations_become_validation_errors() {
        let err = ApiError::from(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("insert or update on table \"bookings\" violates foreign key constraint".to_owned()),
        ));
        match err {
            ApiError::Validation(detail) => {
                assert_eq!(detail, "Referenced listing does not exist.")
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }
}
