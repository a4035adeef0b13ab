//! Error types for the post service.
//!
//! [`StorageError`] covers everything the repository adapters can fail with.
//! [`PostError`] is the outcome taxonomy the controller hands to the HTTP
//! layer, and it renders itself as a JSON response.

use crate::validation::ValidationErrors;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::{json, Json, Value};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] mysql_async::Error),

    #[error("corrupt row for post {id}: {reason}")]
    CorruptRow { id: String, reason: String },
}

#[derive(Error, Debug)]
pub enum PostError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("post not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ValidationErrors> for PostError {
    fn from(errors: ValidationErrors) -> Self {
        PostError::Validation(errors)
    }
}

impl PostError {
    pub fn status(&self) -> Status {
        match self {
            PostError::Validation(_) => Status::BadRequest,
            PostError::NotFound(_) => Status::NotFound,
            PostError::Storage(_) => Status::InternalServerError,
        }
    }

    /// JSON body sent to the client. Storage causes stay in the logs.
    pub fn body(&self) -> Value {
        match self {
            PostError::Validation(errors) => json!({
                "message": "Validation failed",
                "details": errors,
            }),
            PostError::NotFound(_) => json!({ "message": "Post not found" }),
            PostError::Storage(_) => json!({ "message": "Internal Server Error" }),
        }
    }
}

impl<'r> Responder<'r, 'static> for PostError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status(), Json(self.body())).respond_to(request)
    }
}
